// src/replay/mod.rs

pub mod csv;
pub mod load_parameters;

use serde::Serialize;
use thiserror::Error;

use crate::filter::{FilterError, OneEuroFilter};

pub use self::csv::{read_samples, write_records, Sample};
pub use self::load_parameters::load_filter_parameters;

/// 参照データとの比較に使う既定の許容誤差
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("入出力エラー: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV の読み書きに失敗しました: {0}")]
    Csv(#[from] ::csv::Error),
    #[error("YAML の読み込みに失敗しました: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error("{index} 行目が参照値と一致しません: 期待値 {expected}, 実際 {actual} (許容誤差 {tolerance})")]
    Mismatch {
        index: usize,
        expected: f64,
        actual: f64,
        tolerance: f64,
    },
}

/// 1 サンプル分のフィルタ結果
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ReplayRecord {
    pub timestamp: Option<f64>,
    pub value: f64,
    pub filtered: f64,
    #[serde(skip_serializing)]
    pub expected: Option<f64>,
}

/// 参照値との比較結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplaySummary {
    pub samples: usize,
    pub compared: usize,
    pub max_error: f64,
}

/// サンプル列を順にフィルタへ入力する
pub fn run(filter: &mut OneEuroFilter, samples: &[Sample]) -> Result<Vec<ReplayRecord>, ReplayError> {
    samples
        .iter()
        .map(|sample| {
            let filtered = filter.filter(sample.value, sample.timestamp)?;
            Ok(ReplayRecord {
                timestamp: sample.timestamp,
                value: sample.value,
                filtered,
                expected: sample.expected,
            })
        })
        .collect()
}

/// フィルタ結果を参照値と比較する
///
/// # 引数
/// - `records`: フィルタ結果
/// - `tolerance`: 許容する絶対誤差
///
/// # 戻り値
/// - 比較結果の集計
/// - 許容誤差を超えた最初の行で `ReplayError::Mismatch`
pub fn verify(records: &[ReplayRecord], tolerance: f64) -> Result<ReplaySummary, ReplayError> {
    let mut compared = 0;
    let mut max_error: f64 = 0.0;

    for (index, record) in records.iter().enumerate() {
        let Some(expected) = record.expected else {
            continue;
        };

        let error = (record.filtered - expected).abs();
        if !(error <= tolerance) {
            return Err(ReplayError::Mismatch {
                index,
                expected,
                actual: record.filtered,
                tolerance,
            });
        }

        compared += 1;
        max_error = max_error.max(error);
    }

    Ok(ReplaySummary {
        samples: records.len(),
        compared,
        max_error,
    })
}
