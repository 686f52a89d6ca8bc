// src/lib.rs

//! 1€ フィルタ（適応ローパスフィルタ）とその検証用リプレイ処理

pub mod config;
pub mod filter;
pub mod replay;

pub use filter::{FilterError, LowPassFilter, OneEuroFilter};
