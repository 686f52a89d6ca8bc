// src/filter/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    /// 制約範囲外のパラメータが設定された
    #[error("パラメータ `{name}` の値 {value} が不正です: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

impl FilterError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        FilterError::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}

/// `0 < value < ∞` を検証する
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<f64, FilterError> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(FilterError::invalid(name, value, "正の有限値である必要があります"))
    }
}

pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<f64, FilterError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FilterError::invalid(name, value, "有限値である必要があります"))
    }
}
