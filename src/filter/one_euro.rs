// src/filter/one_euro.rs

use std::f64::consts::PI;

use crate::filter::error::{ensure_finite, ensure_positive, FilterError};
use crate::filter::low_pass::LowPassFilter;

/// 最小カットオフ周波数の既定値 (Hz)
pub const DEFAULT_MIN_CUTOFF: f64 = 1.0;
/// 速度係数の既定値
pub const DEFAULT_BETA: f64 = 0.0;
/// 微分値平滑化用カットオフ周波数の既定値 (Hz)
pub const DEFAULT_DERIVATE_CUTOFF: f64 = 1.0;

/// 1€ フィルタ
///
/// 信号の変化速度からカットオフ周波数を毎サンプル決め直す適応ローパスフィルタ。
/// 速度が小さいときは強く平滑化してジッタを抑え、速度が大きいときは
/// カットオフを上げて遅れを抑える。
///
/// 多軸の信号を扱う場合は軸ごとにインスタンスを生成する。
#[derive(Debug, Clone, PartialEq)]
pub struct OneEuroFilter {
    frequency: f64,
    min_cutoff: f64,
    beta: f64,
    derivate_cutoff: f64,
    signal: LowPassFilter,
    derivate: LowPassFilter,
    last_timestamp: Option<f64>,
}

impl OneEuroFilter {
    /// 既定のパラメータでフィルタを生成する
    pub fn new(frequency: f64) -> Result<Self, FilterError> {
        Self::with_parameters(
            frequency,
            DEFAULT_MIN_CUTOFF,
            DEFAULT_BETA,
            DEFAULT_DERIVATE_CUTOFF,
        )
    }

    /// パラメータを指定してフィルタを生成する
    ///
    /// # 引数
    /// - `frequency`: サンプリング周波数 (Hz)、正の値
    /// - `min_cutoff`: 最小カットオフ周波数 (Hz)、正の値
    /// - `beta`: 速度係数、0 以上
    /// - `derivate_cutoff`: 微分値平滑化用カットオフ周波数 (Hz)、正の値
    ///
    /// # 戻り値
    /// - 生成したフィルタ
    /// - いずれかの値が範囲外の場合は `FilterError::InvalidParameter`
    pub fn with_parameters(
        frequency: f64,
        min_cutoff: f64,
        beta: f64,
        derivate_cutoff: f64,
    ) -> Result<Self, FilterError> {
        let frequency = ensure_positive("frequency", frequency)?;
        let min_cutoff = ensure_positive("min_cutoff", min_cutoff)?;
        let beta = ensure_non_negative("beta", beta)?;
        let derivate_cutoff = ensure_positive("derivate_cutoff", derivate_cutoff)?;

        let signal = LowPassFilter::new(smoothing_factor(frequency, min_cutoff))?;
        let derivate = LowPassFilter::new(smoothing_factor(frequency, derivate_cutoff))?;

        log::debug!(
            "One euro filter: freq={} min_cutoff={} beta={} d_cutoff={}",
            frequency,
            min_cutoff,
            beta,
            derivate_cutoff
        );

        Ok(OneEuroFilter {
            frequency,
            min_cutoff,
            beta,
            derivate_cutoff,
            signal,
            derivate,
            last_timestamp: None,
        })
    }

    /// 1 サンプル分のフィルタ処理
    ///
    /// 途中で検証に失敗した場合、フィルタの状態は呼び出し前のまま保たれる。
    ///
    /// # 引数
    /// - `value`: 入力値（有限値）
    /// - `timestamp`: 入力値の時刻 (秒)。`None` の場合は周波数を更新しない。
    ///
    /// # 戻り値
    /// - フィルタ後の値
    /// - 入力値・時刻や推定した微分値・周波数が有限でない場合は `FilterError::InvalidParameter`
    pub fn filter(&mut self, value: f64, timestamp: Option<f64>) -> Result<f64, FilterError> {
        let value = ensure_finite("value", value)?;
        let timestamp = timestamp
            .map(|timestamp| ensure_finite("timestamp", timestamp))
            .transpose()?;

        // 時刻差からサンプリング周波数を推定し直す
        let frequency = match (self.last_timestamp, timestamp) {
            (Some(last), Some(now)) if now > last => {
                let frequency = ensure_positive("frequency", 1.0 / (now - last))?;
                log::debug!("Sampling frequency re-estimated: {:.3}Hz", frequency);
                frequency
            }
            (Some(last), Some(now)) => {
                log::debug!("Timestamp {} not after {}, frequency kept", now, last);
                self.frequency
            }
            _ => self.frequency,
        };

        // 前回のフィルタ後の値を基準に微分値を推定する
        let dvalue = if self.signal.has_last_raw_value() {
            ensure_finite(
                "derivate",
                (value - self.signal.last_filtered_value()) * frequency,
            )?
        } else {
            0.0
        };

        let mut derivate = self.derivate.clone();
        let edvalue = ensure_finite(
            "derivate",
            derivate.filter_with_alpha(dvalue, smoothing_factor(frequency, self.derivate_cutoff))?,
        )?;

        let cutoff = self.min_cutoff + self.beta * edvalue.abs();
        let mut signal = self.signal.clone();
        let filtered = signal.filter_with_alpha(value, smoothing_factor(frequency, cutoff))?;

        log::trace!(
            "value={} dvalue={:.5} edvalue={:.5} cutoff={:.5} filtered={}",
            value,
            dvalue,
            edvalue,
            cutoff,
            filtered
        );

        self.frequency = frequency;
        // 時刻が None でも上書きする
        self.last_timestamp = timestamp;
        self.derivate = derivate;
        self.signal = signal;

        Ok(filtered)
    }

    /// 内部状態を生成直後に戻す。パラメータと現在の周波数は保持する。
    pub fn reset(&mut self) {
        self.signal.reset();
        self.derivate.reset();
        self.last_timestamp = None;
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn min_cutoff(&self) -> f64 {
        self.min_cutoff
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn derivate_cutoff(&self) -> f64 {
        self.derivate_cutoff
    }

    pub fn last_timestamp(&self) -> Option<f64> {
        self.last_timestamp
    }

    pub fn set_frequency(&mut self, frequency: f64) -> Result<(), FilterError> {
        self.frequency = ensure_positive("frequency", frequency)?;
        Ok(())
    }

    pub fn set_min_cutoff(&mut self, min_cutoff: f64) -> Result<(), FilterError> {
        self.min_cutoff = ensure_positive("min_cutoff", min_cutoff)?;
        Ok(())
    }

    pub fn set_beta(&mut self, beta: f64) -> Result<(), FilterError> {
        self.beta = ensure_non_negative("beta", beta)?;
        Ok(())
    }

    pub fn set_derivate_cutoff(&mut self, derivate_cutoff: f64) -> Result<(), FilterError> {
        self.derivate_cutoff = ensure_positive("derivate_cutoff", derivate_cutoff)?;
        Ok(())
    }
}

/// カットオフ周波数とサンプリング周波数から平滑化係数を求める
///
/// te = 1 / frequency, tau = 1 / (2π cutoff) として 1 / (1 + tau / te)
pub fn smoothing_factor(frequency: f64, cutoff: f64) -> f64 {
    let te = 1.0 / frequency;
    let tau = 1.0 / (2.0 * PI * cutoff);
    1.0 / (1.0 + tau / te)
}

fn ensure_non_negative(name: &'static str, value: f64) -> Result<f64, FilterError> {
    if value >= 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(FilterError::invalid(name, value, "0 以上の有限値である必要があります"))
    }
}
