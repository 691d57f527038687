//! First-order exponential decay.
//!
//! Biochar carbon loss is modelled as first-order decay
//! $$ m(t) = m_0 e^{-kt} $$
//! with the decay constant tied to the half-life by $k = \ln 2 / t_{1/2}$.
//! Published figures depend on these exact closed forms (natural log,
//! natural exponential, IEEE double precision), so the conversions live
//! here rather than being re-derived at each call site.

use crate::errors::{PermanenceError, PermanenceResult};
use crate::timeseries::{FloatValue, Time};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::f64::consts::LN_2;

fn ensure_positive(quantity: &str, value: FloatValue) -> PermanenceResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(PermanenceError::NumericDomain {
            quantity: quantity.to_string(),
            value,
        });
    }
    Ok(())
}

/// Decay constant for a given half-life: $k = \ln 2 / t_{1/2}$.
pub fn decay_rate_from_half_life(half_life: FloatValue) -> PermanenceResult<FloatValue> {
    ensure_positive("half-life", half_life)?;
    Ok(LN_2 / half_life)
}

/// Half-life for a given decay constant: $t_{1/2} = \ln 2 / k$.
pub fn half_life_from_decay_rate(decay_rate: FloatValue) -> PermanenceResult<FloatValue> {
    ensure_positive("decay rate", decay_rate)?;
    Ok(LN_2 / decay_rate)
}

/// Time until only `fraction` of the initial stock remains:
/// $t = -\ln(f) / k$.
///
/// `fraction` must lie in (0, 1]; a fraction of exactly 1 gives t = 0.
pub fn time_to_fraction(decay_rate: FloatValue, fraction: FloatValue) -> PermanenceResult<Time> {
    ensure_positive("decay rate", decay_rate)?;
    if !(fraction > 0.0 && fraction <= 1.0) {
        return Err(PermanenceError::Error(format!(
            "Fraction remaining must lie in (0, 1], got {}",
            fraction
        )));
    }
    Ok(-fraction.ln() / decay_rate)
}

/// A decaying carbon stock.
///
/// Derived, not stored: evaluated pointwise over a time grid when a
/// trajectory is needed, with no state retained between calls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayCurve {
    /// Stock at t = 0
    /// unit: mass, caller-defined (tC in the published analysis)
    initial_mass: FloatValue,
    /// First-order decay constant
    /// unit: 1 / yr
    decay_rate: FloatValue,
}

impl DecayCurve {
    /// Create a curve from an initial stock and decay constant.
    pub fn new(initial_mass: FloatValue, decay_rate: FloatValue) -> PermanenceResult<Self> {
        if !initial_mass.is_finite() || initial_mass < 0.0 {
            return Err(PermanenceError::Error(format!(
                "Initial mass must be finite and non-negative, got {}",
                initial_mass
            )));
        }
        ensure_positive("decay rate", decay_rate)?;
        Ok(Self {
            initial_mass,
            decay_rate,
        })
    }

    /// Create a curve from an initial stock and half-life.
    pub fn from_half_life(initial_mass: FloatValue, half_life: FloatValue) -> PermanenceResult<Self> {
        Self::new(initial_mass, decay_rate_from_half_life(half_life)?)
    }

    pub fn initial_mass(&self) -> FloatValue {
        self.initial_mass
    }

    pub fn decay_rate(&self) -> FloatValue {
        self.decay_rate
    }

    /// Half-life of the stock.
    pub fn half_life(&self) -> FloatValue {
        LN_2 / self.decay_rate
    }

    /// Remaining mass after `t` years.
    pub fn mass_at(&self, t: Time) -> FloatValue {
        self.initial_mass * (-self.decay_rate * t).exp()
    }

    /// Remaining mass at each point of a time grid.
    pub fn evaluate(&self, times: &Array1<Time>) -> Array1<FloatValue> {
        times.mapv(|t| self.mass_at(t))
    }

    /// Time until only `fraction` of the initial stock remains.
    pub fn time_to_fraction(&self, fraction: FloatValue) -> PermanenceResult<Time> {
        time_to_fraction(self.decay_rate, fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeseries::annual_time_grid;
    use approx::assert_relative_eq;

    #[test]
    fn half_life_round_trip() {
        // Half-life definition: after one half-life, half the stock remains
        let curve = DecayCurve::from_half_life(100.0, 50.0).unwrap();
        assert_relative_eq!(curve.mass_at(50.0), 50.0, max_relative = 1e-9);
    }

    #[test]
    fn rate_and_half_life_are_inverse() {
        let k = decay_rate_from_half_life(37.5).unwrap();
        let h = half_life_from_decay_rate(k).unwrap();
        assert_relative_eq!(h, 37.5, max_relative = 1e-12);
    }

    #[test]
    fn mass_at_zero_is_initial() {
        let curve = DecayCurve::from_half_life(42.0, 10.0).unwrap();
        assert_eq!(curve.mass_at(0.0), 42.0);
    }

    #[test]
    fn time_to_half_equals_half_life() {
        let curve = DecayCurve::from_half_life(1.0, 25.0).unwrap();
        let t = curve.time_to_fraction(0.5).unwrap();
        assert_relative_eq!(t, 25.0, max_relative = 1e-12);
    }

    #[test]
    fn time_to_full_fraction_is_zero() {
        let k = decay_rate_from_half_life(10.0).unwrap();
        assert_eq!(time_to_fraction(k, 1.0).unwrap(), 0.0);
    }

    #[test]
    fn rejects_non_positive_half_life() {
        assert!(decay_rate_from_half_life(0.0).is_err());
        assert!(decay_rate_from_half_life(-3.0).is_err());
        assert!(decay_rate_from_half_life(FloatValue::NAN).is_err());
    }

    #[test]
    fn rejects_fraction_outside_unit_interval() {
        let k = decay_rate_from_half_life(10.0).unwrap();
        assert!(time_to_fraction(k, 0.0).is_err());
        assert!(time_to_fraction(k, 1.5).is_err());
        assert!(time_to_fraction(k, FloatValue::NAN).is_err());
    }

    #[test]
    fn evaluate_matches_pointwise() {
        let curve = DecayCurve::from_half_life(100.0, 50.0).unwrap();
        let grid = annual_time_grid(200);
        let trajectory = curve.evaluate(&grid);

        assert_eq!(trajectory.len(), 201);
        assert_eq!(trajectory[0], 100.0);
        assert_relative_eq!(trajectory[50], 50.0, max_relative = 1e-9);
        assert_relative_eq!(trajectory[100], 25.0, max_relative = 1e-9);
        for i in 1..trajectory.len() {
            assert!(trajectory[i] < trajectory[i - 1], "decay must be monotone");
        }
    }
}
