//! Bootstrap estimation of biochar half-life from O:C ratio.
//!
//! Fits `ln(half_life) = intercept + slope * ratio` by ordinary least
//! squares on repeated resamples (with replacement) of a small observation
//! table, producing an empirical distribution of fitted lines. Queries
//! against the resulting [`bootstrap::BootstrapFit`] return percentile
//! point estimates of half-life at a given O:C ratio, so the risk posture
//! (median, conservative 2.5th percentile, ...) stays a caller decision
//! rather than a property of the estimator.
//!
//! Randomness is injected: [`bootstrap::fit`] takes any [`rand::Rng`], and
//! [`bootstrap::fit_seeded`] wraps a seeded ChaCha generator so runs are
//! reproducible.

pub mod bootstrap;
pub mod regression;
pub mod stats;

use permanence_core::errors::PermanenceError;
use permanence_core::timeseries::FloatValue;
use thiserror::Error;

/// Error type for estimation failures.
#[derive(Error, Debug)]
pub enum Error {
    #[error("At least {required} observations are required to fit a line, got {actual}")]
    InsufficientData { required: usize, actual: usize },
    #[error("Percentile must lie in [0, 100], got {0}")]
    InvalidPercentile(FloatValue),
    #[error("{0}")]
    EstimationError(String),
    #[error(transparent)]
    Core(#[from] PermanenceError),
}

/// Convenience type for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

pub use bootstrap::{fit, fit_seeded, predict, BootstrapFit, BootstrapOptions};
