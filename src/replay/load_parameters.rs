// src/replay/load_parameters.rs

use std::fs::File;
use std::path::Path;

use serde_yaml::from_reader;

use crate::config::FilterParameters;
use crate::replay::ReplayError;

/// フィルタパラメータの読み込み
pub fn load_filter_parameters<P: AsRef<Path>>(path: P) -> Result<FilterParameters, ReplayError> {
    let file = File::open(path)?;
    let params: FilterParameters = from_reader(file)?;
    Ok(params)
}
