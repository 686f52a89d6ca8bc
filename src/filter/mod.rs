// src/filter/mod.rs

pub mod error;
pub mod low_pass;
pub mod one_euro;

pub use error::FilterError;
pub use low_pass::LowPassFilter;
pub use one_euro::{smoothing_factor, OneEuroFilter};
