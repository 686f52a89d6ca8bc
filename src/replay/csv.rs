// src/replay/csv.rs

use std::io::{Read, Write};

use serde::Deserialize;

use crate::replay::{ReplayError, ReplayRecord};

/// 入力サンプル
///
/// CSV の列は `timestamp,value[,expected]`。`timestamp` が空欄の行は時刻なしとして扱う。
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Sample {
    pub timestamp: Option<f64>,
    pub value: f64,
    pub expected: Option<f64>,
}

/// CSV からサンプル列を読み込む
pub fn read_samples<R: Read>(reader: R) -> Result<Vec<Sample>, ReplayError> {
    let mut reader = ::csv::ReaderBuilder::new()
        .trim(::csv::Trim::All)
        .from_reader(reader);

    let mut samples = Vec::new();
    for row in reader.deserialize() {
        let sample: Sample = row?;
        samples.push(sample);
    }
    Ok(samples)
}

/// フィルタ結果を CSV に書き出す
pub fn write_records<W: Write>(writer: W, records: &[ReplayRecord]) -> Result<(), ReplayError> {
    let mut writer = ::csv::Writer::from_writer(writer);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
