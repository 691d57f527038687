//! Paired (O:C ratio, half-life) observations.
//!
//! The decay behaviour of biochar is predicted from its oxygen-to-carbon
//! molar ratio, calibrated against laboratory incubation studies. Each
//! observation pairs a measured O:C ratio with the half-life inferred from
//! the incubation. The set is small (tens of rows), loaded once from a
//! two-column table, and immutable thereafter.

use crate::errors::{PermanenceError, PermanenceResult};
use crate::timeseries::FloatValue;
use log::warn;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// A single laboratory observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Oxygen-to-carbon molar ratio
    /// unit: dimensionless, expected range [0, 1]
    pub ratio: FloatValue,
    /// Decay half-life
    /// unit: yr
    pub half_life: FloatValue,
}

/// Immutable, validated collection of observations.
///
/// Construction fails fast on values the downstream log-linear model cannot
/// handle, rather than letting `ln` of a bad half-life propagate NaN into
/// fitted curves:
/// - a non-finite or negative ratio is rejected with
///   [`PermanenceError::InvalidRatio`]
/// - a non-finite or non-positive half-life is rejected with
///   [`PermanenceError::NumericDomain`]
/// - a ratio above 1 is accepted with a warning, since the model formula is
///   defined there but the calibrated domain is [0, 1]
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationTable {
    observations: Vec<Observation>,
}

impl ObservationTable {
    /// Validate and wrap a set of observations.
    pub fn new(observations: Vec<Observation>) -> PermanenceResult<Self> {
        for obs in &observations {
            if !obs.ratio.is_finite() || obs.ratio < 0.0 {
                return Err(PermanenceError::InvalidRatio(obs.ratio));
            }
            if obs.ratio > 1.0 {
                warn!(
                    "O:C ratio {} lies outside the calibrated range [0, 1]",
                    obs.ratio
                );
            }
            if !obs.half_life.is_finite() || obs.half_life <= 0.0 {
                return Err(PermanenceError::NumericDomain {
                    quantity: "half-life".to_string(),
                    value: obs.half_life,
                });
            }
        }
        Ok(Self { observations })
    }

    /// Read observations from CSV with a `ratio,half_life` header row.
    pub fn from_reader<R: Read>(reader: R) -> PermanenceResult<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut observations = Vec::new();
        for record in csv_reader.deserialize() {
            observations.push(record?);
        }
        Self::new(observations)
    }

    /// Read observations from a CSV file on disk.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> PermanenceResult<Self> {
        let mut csv_reader = csv::Reader::from_path(path)?;
        let mut observations = Vec::new();
        for record in csv_reader.deserialize() {
            observations.push(record?);
        }
        Self::new(observations)
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.observations.iter()
    }

    /// O:C ratios in table order.
    pub fn ratios(&self) -> Array1<FloatValue> {
        self.observations.iter().map(|obs| obs.ratio).collect()
    }

    /// Natural log of each half-life, in table order.
    ///
    /// Safe to evaluate because construction rejects non-positive
    /// half-lives.
    pub fn log_half_lives(&self) -> Array1<FloatValue> {
        self.observations
            .iter()
            .map(|obs| obs.half_life.ln())
            .collect()
    }
}
