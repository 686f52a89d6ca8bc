// src/filter/low_pass.rs

use crate::filter::error::FilterError;

/// 一階ローパスフィルタ
///
/// y[n] = alpha * x[n] + (1 - alpha) * y[n-1]
///
/// 初回の入力はそのまま出力される。
#[derive(Debug, Clone, PartialEq)]
pub struct LowPassFilter {
    alpha: f64,
    initval: f64,
    raw: f64,
    filtered: f64,
    initialized: bool,
}

impl LowPassFilter {
    /// 初期値 0.0 でフィルタを生成する
    pub fn new(alpha: f64) -> Result<Self, FilterError> {
        Self::with_initial_value(alpha, 0.0)
    }

    /// 初期値を指定してフィルタを生成する
    ///
    /// # 引数
    /// - `alpha`: フィルタ係数 (0, 1]
    /// - `initval`: 初回入力前に返される出力値と直前入力値
    pub fn with_initial_value(alpha: f64, initval: f64) -> Result<Self, FilterError> {
        Ok(LowPassFilter {
            alpha: validate_alpha(alpha)?,
            initval,
            raw: initval,
            filtered: initval,
            initialized: false,
        })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// フィルタ係数の更新。検証に失敗した場合は元の値を保持する。
    pub fn set_alpha(&mut self, alpha: f64) -> Result<(), FilterError> {
        self.alpha = validate_alpha(alpha)?;
        Ok(())
    }

    /// 入力値 value に対してフィルタを適用する
    pub fn filter(&mut self, value: f64) -> f64 {
        let filtered = if self.initialized {
            self.alpha * value + (1.0 - self.alpha) * self.filtered
        } else {
            self.initialized = true;
            value
        };
        self.raw = value;
        self.filtered = filtered;
        filtered
    }

    /// 係数を差し替えてからフィルタを適用する
    ///
    /// # 戻り値
    /// - フィルタ後の値
    /// - 係数が (0, 1] の範囲外の場合は `FilterError::InvalidParameter`
    pub fn filter_with_alpha(&mut self, value: f64, alpha: f64) -> Result<f64, FilterError> {
        self.set_alpha(alpha)?;
        Ok(self.filter(value))
    }

    pub fn has_last_raw_value(&self) -> bool {
        self.initialized
    }

    pub fn last_raw_value(&self) -> f64 {
        self.raw
    }

    pub fn last_filtered_value(&self) -> f64 {
        self.filtered
    }

    /// 生成直後の状態に戻す（係数はそのまま）
    pub fn reset(&mut self) {
        self.raw = self.initval;
        self.filtered = self.initval;
        self.initialized = false;
    }
}

fn validate_alpha(alpha: f64) -> Result<f64, FilterError> {
    if alpha > 0.0 && alpha <= 1.0 {
        Ok(alpha)
    } else {
        Err(FilterError::invalid(
            "alpha",
            alpha,
            "(0, 1] の範囲内である必要があります",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_pass_filter_first_sample_passes_through() {
        let mut filter = LowPassFilter::new(0.5).unwrap();
        assert!(!filter.has_last_raw_value());

        let filtered = filter.filter(10.0);

        assert_eq!(filtered, 10.0);
        assert!(filter.has_last_raw_value());
        assert_eq!(filter.last_raw_value(), 10.0);
        assert_eq!(filter.last_filtered_value(), 10.0);
    }

    #[test]
    fn test_low_pass_filter_subsequent_steps() {
        let mut filter = LowPassFilter::new(0.3).unwrap();
        filter.filter(5.0);

        let filtered = filter.filter(15.0);

        let expected_filtered = 0.3 * 15.0 + 0.7 * 5.0; // 8.0
        assert!((filtered - expected_filtered).abs() < 1e-12);
        assert_eq!(filter.last_raw_value(), 15.0);
        assert!((filter.last_filtered_value() - expected_filtered).abs() < 1e-12);
    }

    #[test]
    fn test_low_pass_filter_initial_value_before_first_sample() {
        let filter = LowPassFilter::with_initial_value(0.5, 2.5).unwrap();
        assert_eq!(filter.last_raw_value(), 2.5);
        assert_eq!(filter.last_filtered_value(), 2.5);
        assert!(!filter.has_last_raw_value());
    }

    #[test]
    fn test_low_pass_filter_initial_value_is_not_blended() {
        // 初期値は初回出力に影響しない
        let mut filter = LowPassFilter::with_initial_value(0.5, 100.0).unwrap();
        assert_eq!(filter.filter(3.0), 3.0);
    }

    #[test]
    fn test_low_pass_filter_full_alpha() {
        let mut filter = LowPassFilter::new(1.0).unwrap();
        filter.filter(3.0);
        assert_eq!(filter.filter(7.0), 7.0);
    }

    #[test]
    fn test_low_pass_filter_rejects_alpha_out_of_range() {
        assert!(matches!(
            LowPassFilter::new(0.0),
            Err(FilterError::InvalidParameter { name: "alpha", .. })
        ));
        assert!(LowPassFilter::new(1.5).is_err());
        assert!(LowPassFilter::new(-0.2).is_err());
        assert!(LowPassFilter::new(f64::NAN).is_err());
    }

    #[test]
    fn test_filter_with_alpha_keeps_previous_alpha_on_error() {
        let mut filter = LowPassFilter::new(0.4).unwrap();
        filter.filter(1.0);

        assert!(filter.filter_with_alpha(2.0, 0.0).is_err());

        // 状態も係数も変化しない
        assert_eq!(filter.alpha(), 0.4);
        assert_eq!(filter.last_raw_value(), 1.0);
        assert_eq!(filter.last_filtered_value(), 1.0);
    }

    #[test]
    fn test_filter_with_same_alpha_matches_fixed_alpha() {
        let inputs = [1.0, 4.0, -2.0, 0.5, 9.0, 9.0, 3.25];
        let mut fixed = LowPassFilter::new(0.25).unwrap();
        let mut overridden = LowPassFilter::new(0.25).unwrap();

        for input in inputs {
            let expected = fixed.filter(input);
            let actual = overridden.filter_with_alpha(input, 0.25).unwrap();
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn test_low_pass_filter_reset() {
        let mut filter = LowPassFilter::with_initial_value(0.5, 1.0).unwrap();
        filter.filter(4.0);
        filter.filter(8.0);

        filter.reset();

        assert!(!filter.has_last_raw_value());
        assert_eq!(filter.last_raw_value(), 1.0);
        assert_eq!(filter.last_filtered_value(), 1.0);
        assert_eq!(filter.filter(6.0), 6.0);
    }
}
