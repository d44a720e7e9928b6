// Engine errors. Missing or short data is never an error; only caller contract violations are.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForecastError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
