//! CO2 impulse response functions.
//!
//! An impulse response function (IRF) gives the fraction of a pulse CO2
//! emission remaining in the atmosphere `t` years after release, as a sum
//! of exponentials
//! $$ IRF(t) = a_0 + \sum_i a_i e^{-t/\tau_i} $$
//! where $a_0$ is the long-term airborne fraction. The coefficient sets
//! here are the published parameterisations used throughout the ton-year
//! accounting literature.

use crate::{Error, Result};
use ndarray::Array1;
use permanence_core::timeseries::{annual_time_grid, FloatValue, Time};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Published CO2 impulse response parameterisations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IrfCurve {
    /// Joos et al. (2013), Table 5
    Joos2013,
    /// IPCC Fourth Assessment Report (2007), page 213
    Ipcc2007,
    /// IPCC Special Report on Land Use, Land-Use Change and Forestry
    /// (2000), Chapter 2 footnote 4
    Ipcc2000,
}

impl IrfCurve {
    /// Exponential amplitudes `a`. `a[0]` is the long-term airborne
    /// fraction and does not decay.
    pub fn amplitudes(&self) -> &'static [FloatValue] {
        match self {
            IrfCurve::Joos2013 => &[0.2173, 0.2240, 0.2824, 0.2763],
            IrfCurve::Ipcc2007 => &[0.217, 0.259, 0.338, 0.186],
            IrfCurve::Ipcc2000 => &[0.175602, 0.137467, 0.18576, 0.242302, 0.258868],
        }
    }

    /// Decay timescales `tau` in years, index-aligned with
    /// [`IrfCurve::amplitudes`]. `tau[0]` is unused.
    pub fn timescales(&self) -> &'static [FloatValue] {
        match self {
            IrfCurve::Joos2013 => &[0.0, 394.4, 36.54, 4.304],
            IrfCurve::Ipcc2007 => &[0.0, 172.9, 18.51, 1.186],
            IrfCurve::Ipcc2000 => &[0.0, 421.093, 70.5965, 21.42165, 3.41537],
        }
    }

    /// Fraction of the pulse remaining airborne after `t` years.
    pub fn evaluate(&self, t: Time) -> FloatValue {
        let a = self.amplitudes();
        let tau = self.timescales();

        let mut remaining = a[0];
        for i in 1..a.len() {
            remaining += a[i] * (-t / tau[i]).exp();
        }
        remaining
    }

    /// The curve over the annual grid `0..=horizon`.
    ///
    /// The published analyses evaluate over a 1000-year horizon.
    pub fn curve(&self, horizon: usize) -> Array1<FloatValue> {
        annual_time_grid(horizon).mapv(|t| self.evaluate(t))
    }
}

impl FromStr for IrfCurve {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "joos_2013" => Ok(IrfCurve::Joos2013),
            "ipcc_2007" => Ok(IrfCurve::Ipcc2007),
            "ipcc_2000" => Ok(IrfCurve::Ipcc2000),
            other => Err(Error::UnknownCurve(other.to_string())),
        }
    }
}

impl fmt::Display for IrfCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IrfCurve::Joos2013 => "joos_2013",
            IrfCurve::Ipcc2007 => "ipcc_2007",
            IrfCurve::Ipcc2000 => "ipcc_2000",
        };
        write!(f, "{}", name)
    }
}
