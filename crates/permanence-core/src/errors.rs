use crate::timeseries::FloatValue;
use thiserror::Error;

/// Error type for invalid operations.
#[derive(Error, Debug)]
pub enum PermanenceError {
    #[error("{0}")]
    Error(String),
    #[error("O:C ratio must be finite and non-negative, got {0}")]
    InvalidRatio(FloatValue),
    #[error("{quantity} must be strictly positive, got {value}")]
    NumericDomain {
        quantity: String,
        value: FloatValue,
    },
    #[error("Failed to read observation table: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience type for `Result<T, PermanenceError>`.
pub type PermanenceResult<T> = Result<T, PermanenceError>;
