//! Ton-year benefit accounting.
//!
//! Each method compares the discounted, time-integrated atmospheric burden
//! of an undelayed 1 tCO2 pulse (the baseline) against a scenario in which
//! the emission is delayed by some number of years:
//!
//! - **Moura-Costa** counts the ton-years of storage during the delay
//!   itself as the benefit.
//! - **IPCC** counts the burden the delay removes from inside the
//!   accounting horizon.
//! - **Lashof** counts the baseline burden pushed beyond the accounting
//!   horizon.
//!
//! The ratio of baseline impact to benefit, `num_for_equivalence`, is the
//! number of tonnes that must be stored (with the given delay) to claim
//! equivalence with avoiding 1 tCO2 of emission today.

use crate::{Error, Result};
use log::debug;
use ndarray::Array1;
use permanence_core::timeseries::FloatValue;
use permanence_core::utils::integrate::trapz;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// Ton-year accounting methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    MouraCosta,
    Ipcc,
    Lashof,
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "mc" => Ok(Method::MouraCosta),
            "ipcc" => Ok(Method::Ipcc),
            "lashof" => Ok(Method::Lashof),
            other => Err(Error::UnknownMethod(other.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::MouraCosta => "mc",
            Method::Ipcc => "ipcc",
            Method::Lashof => "lashof",
        };
        write!(f, "{}", name)
    }
}

/// Inputs echoed into every benefit report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccountingParameters {
    pub method: Method,
    /// Accounting horizon
    /// unit: yr
    pub time_horizon: usize,
    /// Years the emission is delayed
    /// unit: yr
    pub delay: usize,
    /// Annual discount rate applied to future burdens
    /// unit: 1 / yr
    pub discount_rate: FloatValue,
}

/// Outcome of a ton-year benefit calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenefitReport {
    pub parameters: AccountingParameters,
    /// Discounted baseline burden over the horizon
    pub baseline: Array1<FloatValue>,
    /// Discounted scenario burden (length depends on the method)
    pub scenario: Array1<FloatValue>,
    /// Time-integrated baseline burden
    /// unit: ton-years
    pub baseline_atm_impact: FloatValue,
    /// Burden avoided by the delay
    /// unit: ton-years
    pub benefit: FloatValue,
    /// Tonnes of delayed storage equivalent to 1 tCO2 emitted today
    pub num_for_equivalence: FloatValue,
}

impl BenefitReport {
    /// Serialize the report to a JSON file.
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)
            .map_err(|e| Error::Report(format!("Failed to create report file: {}", e)))?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer(&mut writer, self)
            .map_err(|e| Error::Report(format!("Failed to serialize report: {}", e)))?;

        writer
            .flush()
            .map_err(|e| Error::Report(format!("Failed to flush report file: {}", e)))?;

        Ok(())
    }
}

/// Discount a curve at a constant annual rate: `values[i] / (1 + rate)^i`.
pub fn discount(rate: FloatValue, values: &[FloatValue]) -> Vec<FloatValue> {
    values
        .iter()
        .enumerate()
        .map(|(i, &x)| x / (1.0 + rate).powi(i as i32))
        .collect()
}

/// Calculate the ton-year benefit of delaying a 1 tCO2 emission.
///
/// # Arguments
///
/// * `method` - Accounting method
/// * `baseline` - Atmospheric burden of the undelayed pulse, sampled
///   annually from year 0 (typically an [`crate::IrfCurve`] evaluation);
///   must cover the accounting horizon
/// * `time_horizon` - Accounting horizon in years, at least 1
/// * `delay` - Years the emission is delayed
/// * `discount_rate` - Annual discount rate (0 disables discounting)
pub fn calculate_benefit(
    method: Method,
    baseline: &[FloatValue],
    time_horizon: usize,
    delay: usize,
    discount_rate: FloatValue,
) -> Result<BenefitReport> {
    if time_horizon == 0 {
        return Err(Error::InvalidTimeHorizon);
    }
    if baseline.len() < time_horizon {
        return Err(Error::BaselineTooShort {
            horizon: time_horizon,
            len: baseline.len(),
        });
    }

    let truncated = &baseline[..baseline.len().min(time_horizon + 1)];
    let baseline_discounted = discount(discount_rate, truncated);
    let baseline_atm_impact = trapz(&baseline_discounted);

    let (scenario, benefit) = match method {
        Method::MouraCosta => {
            // 1 ton held out of the atmosphere for the delay period
            let mut scenario = vec![-1.0; delay + 1];
            if time_horizon > delay {
                scenario.extend(std::iter::repeat(0.0).take(time_horizon - delay));
            }
            let scenario = discount(discount_rate, &scenario);
            let benefit = -trapz(&scenario[..=delay]);
            (scenario, benefit)
        }
        Method::Ipcc => {
            // Emission shifted into the future, accounted within the horizon
            let mut shifted = vec![0.0; delay];
            shifted.extend_from_slice(baseline);
            shifted.truncate(time_horizon + 1);
            let scenario = discount(discount_rate, &shifted);
            let benefit = baseline_atm_impact - trapz(&scenario[delay.min(scenario.len())..]);
            (scenario, benefit)
        }
        Method::Lashof => {
            // Emission shifted into the future; the benefit is the burden
            // pushed beyond the horizon
            let mut shifted = vec![0.0; delay];
            shifted.extend_from_slice(baseline);
            let scenario = discount(discount_rate, &shifted);
            let benefit = if time_horizon < delay {
                trapz(&scenario[delay..])
            } else {
                trapz(&scenario[time_horizon..])
            };
            (scenario, benefit)
        }
    };

    let num_for_equivalence = baseline_atm_impact / benefit;
    debug!(
        "{} benefit over a {}-year horizon with {}-year delay: {:.2} ton-years ({:.1} needed for equivalence)",
        method, time_horizon, delay, benefit, num_for_equivalence
    );

    Ok(BenefitReport {
        parameters: AccountingParameters {
            method,
            time_horizon,
            delay,
            discount_rate,
        },
        baseline: Array1::from(baseline_discounted),
        scenario: Array1::from(scenario),
        baseline_atm_impact,
        benefit,
        num_for_equivalence,
    })
}
