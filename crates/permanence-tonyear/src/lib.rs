//! Ton-year accounting for temporary carbon storage.
//!
//! Quantifies the atmospheric benefit of delaying a 1 tCO2 emission by
//! comparing the time-integrated atmospheric burden of a baseline pulse
//! against a delayed-emission scenario. The baseline burden comes from a
//! published CO2 impulse response function ([`irf::IrfCurve`]); the
//! comparison follows one of three published accounting methods
//! ([`accounting::Method`]): Moura-Costa, IPCC, or Lashof.

pub mod accounting;
pub mod irf;

use thiserror::Error;

/// Error type for invalid accounting inputs.
#[derive(Error, Debug)]
pub enum Error {
    #[error("No impulse response curve named '{0}'")]
    UnknownCurve(String),
    #[error("No ton-year accounting method named '{0}'. Options include: Moura-Costa ('mc'), Lashof ('lashof'), and IPCC ('ipcc')")]
    UnknownMethod(String),
    #[error("Time horizon must be greater than zero")]
    InvalidTimeHorizon,
    #[error("Cannot analyze over a time horizon ({horizon}) longer than the baseline scenario ({len} values)")]
    BaselineTooShort { horizon: usize, len: usize },
    #[error("Failed to write report: {0}")]
    Report(String),
}

/// Convenience type for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

pub use accounting::{calculate_benefit, discount, AccountingParameters, BenefitReport, Method};
pub use irf::IrfCurve;
