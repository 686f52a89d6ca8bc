// src/config/parameters.rs

use serde::Deserialize;

use crate::filter::one_euro::{DEFAULT_BETA, DEFAULT_DERIVATE_CUTOFF, DEFAULT_MIN_CUTOFF};
use crate::filter::{FilterError, OneEuroFilter};

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FilterParameters {
    pub frequency: f64, // サンプリング周波数 (Hz)
    #[serde(default = "default_min_cutoff")]
    pub min_cutoff: f64, // 最小カットオフ周波数 (Hz)
    #[serde(default = "default_beta")]
    pub beta: f64, // 速度係数
    #[serde(default = "default_derivate_cutoff")]
    pub derivate_cutoff: f64, // 微分値のカットオフ周波数 (Hz)
}

impl FilterParameters {
    /// 既定値で埋めたパラメータ
    pub fn with_frequency(frequency: f64) -> Self {
        FilterParameters {
            frequency,
            min_cutoff: DEFAULT_MIN_CUTOFF,
            beta: DEFAULT_BETA,
            derivate_cutoff: DEFAULT_DERIVATE_CUTOFF,
        }
    }

    /// パラメータを検証してフィルタを生成する
    pub fn build(&self) -> Result<OneEuroFilter, FilterError> {
        OneEuroFilter::with_parameters(
            self.frequency,
            self.min_cutoff,
            self.beta,
            self.derivate_cutoff,
        )
    }
}

fn default_min_cutoff() -> f64 {
    DEFAULT_MIN_CUTOFF
}

fn default_beta() -> f64 {
    DEFAULT_BETA
}

fn default_derivate_cutoff() -> f64 {
    DEFAULT_DERIVATE_CUTOFF
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameters_from_yaml() {
        let yaml = "frequency: 120.0\nmin_cutoff: 1.0\nbeta: 0.1\nderivate_cutoff: 1.0\n";
        let params: FilterParameters = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            params,
            FilterParameters {
                frequency: 120.0,
                min_cutoff: 1.0,
                beta: 0.1,
                derivate_cutoff: 1.0,
            }
        );
    }

    #[test]
    fn test_parameters_defaults() {
        let params: FilterParameters = serde_yaml::from_str("frequency: 60.0\n").unwrap();
        assert_eq!(params, FilterParameters::with_frequency(60.0));
    }

    #[test]
    fn test_parameters_require_frequency() {
        let result: Result<FilterParameters, _> = serde_yaml::from_str("beta: 0.5\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_build_validates() {
        let mut params = FilterParameters::with_frequency(120.0);
        assert!(params.build().is_ok());

        params.derivate_cutoff = 0.0;
        assert!(matches!(
            params.build(),
            Err(FilterError::InvalidParameter { name: "derivate_cutoff", .. })
        ));
    }
}
