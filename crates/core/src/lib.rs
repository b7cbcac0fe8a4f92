pub mod config;
pub mod error;
pub mod matrix;

pub use config::{AggregationConfig, Config};
pub use error::*;
pub use matrix::Matrix;
