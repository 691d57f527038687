//! Bootstrap log-linear estimator of biochar half-life.
//!
//! For each bootstrap iteration the observation table is resampled with
//! replacement (by index, so duplicate rows are expected) and an ordinary
//! least squares line of `ln(half_life)` on `ratio` is fitted to the
//! resample. The recorded (intercept, slope) pairs form an empirical
//! distribution of decay models; [`predict`] evaluates every recorded line
//! at a query ratio and reads off the requested percentile of the
//! predicted half-lives.
//!
//! Index draws happen sequentially on the caller-supplied random source,
//! then the per-resample line fits run in parallel, so a seeded run is
//! bit-reproducible regardless of thread scheduling.
//!
//! # References
//!
//! Spokas, K. A. (2010). Review of the stability of biochar in soils:
//! predictability of O:C molar ratios. Carbon Management, 1(2), 289-303.

use crate::regression::{fit_line, LineFit};
use crate::stats::percentile_of;
use crate::{Error, Result};
use indexmap::IndexMap;
use log::{debug, warn};
use ndarray::Array1;
use permanence_core::observation::ObservationTable;
use permanence_core::timeseries::FloatValue;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Redraw cap per iteration before a degenerate observation set is
/// reported as an error instead of looping.
const MAX_REDRAWS: usize = 1000;

/// Options controlling the bootstrap fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapOptions {
    /// Number of bootstrap resamples to fit. Must be at least 1.
    pub iterations: usize,
}

impl Default for BootstrapOptions {
    /// 10,000 iterations, the convention used in the published analysis.
    fn default() -> Self {
        Self { iterations: 10_000 }
    }
}

/// Empirical distribution of fitted log-linear decay models.
///
/// Two equal-length sample vectors, one (intercept, slope) pair per
/// bootstrap iteration. Produced once by [`fit`] and read-only thereafter:
/// prediction never mutates or reorders the recorded pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootstrapFit {
    intercepts: Array1<FloatValue>,
    slopes: Array1<FloatValue>,
}

impl BootstrapFit {
    fn from_lines(lines: Vec<LineFit>) -> Self {
        let intercepts = lines.iter().map(|line| line.intercept).collect();
        let slopes = lines.iter().map(|line| line.slope).collect();
        Self { intercepts, slopes }
    }

    /// Number of recorded bootstrap iterations.
    pub fn len(&self) -> usize {
        self.intercepts.len()
    }

    /// Check if the fit holds no samples.
    pub fn is_empty(&self) -> bool {
        self.intercepts.is_empty()
    }

    /// Fitted intercepts, in iteration order.
    pub fn intercepts(&self) -> &Array1<FloatValue> {
        &self.intercepts
    }

    /// Fitted slopes, in iteration order.
    pub fn slopes(&self) -> &Array1<FloatValue> {
        &self.slopes
    }

    /// Predicted half-life from every recorded line at the given O:C
    /// ratio: `exp(intercept + slope * ratio)`, in iteration order.
    ///
    /// A ratio outside [0, 1] is computed anyway (the formula is defined
    /// everywhere) but logged as extrapolation beyond the calibrated
    /// domain.
    pub fn prediction_distribution(&self, ratio: FloatValue) -> Array1<FloatValue> {
        if !(0.0..=1.0).contains(&ratio) {
            warn!(
                "Predicting at O:C ratio {} outside the calibrated range [0, 1]",
                ratio
            );
        }

        let mut predictions = Array1::zeros(self.len());
        for (i, prediction) in predictions.iter_mut().enumerate() {
            *prediction = (self.intercepts[i] + self.slopes[i] * ratio).exp();
        }
        predictions
    }

    /// Convert the fit to a map of parameter name to sample array.
    ///
    /// Useful for computing diagnostics per parameter.
    pub fn to_param_map(&self) -> IndexMap<String, Array1<FloatValue>> {
        let mut map = IndexMap::new();
        map.insert("intercept".to_string(), self.intercepts.clone());
        map.insert("slope".to_string(), self.slopes.clone());
        map
    }

    /// Save the fit to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)
            .map_err(|e| Error::EstimationError(format!("Failed to create fit file: {}", e)))?;
        let mut writer = BufWriter::new(file);

        bincode::serialize_into(&mut writer, self)
            .map_err(|e| Error::EstimationError(format!("Failed to serialize fit: {}", e)))?;

        writer
            .flush()
            .map_err(|e| Error::EstimationError(format!("Failed to flush fit file: {}", e)))?;

        Ok(())
    }

    /// Load a fit from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| Error::EstimationError(format!("Failed to open fit file: {}", e)))?;
        let mut reader = BufReader::new(file);

        let fit: BootstrapFit = bincode::deserialize_from(&mut reader)
            .map_err(|e| Error::EstimationError(format!("Failed to deserialize fit: {}", e)))?;

        Ok(fit)
    }
}

/// Fit the bootstrap estimator.
///
/// A pure function of the observation table, the options, and the injected
/// random source: two calls with identical inputs and identically seeded
/// generators produce identical fits.
///
/// # Arguments
///
/// * `table` - Validated (ratio, half-life) observations
/// * `options` - Number of bootstrap iterations
/// * `rng` - Random source driving the resampling
///
/// # Errors
///
/// * [`Error::InsufficientData`] - fewer than 2 observations
/// * [`Error::EstimationError`] - zero iterations requested, or every
///   observation shares the same ratio so no line can be identified
pub fn fit<R: Rng + ?Sized>(
    table: &ObservationTable,
    options: BootstrapOptions,
    rng: &mut R,
) -> Result<BootstrapFit> {
    if options.iterations == 0 {
        return Err(Error::EstimationError(
            "At least one bootstrap iteration is required".to_string(),
        ));
    }

    let n = table.len();
    if n < 2 {
        return Err(Error::InsufficientData {
            required: 2,
            actual: n,
        });
    }

    let ratios = table.ratios();
    let log_half_lives = table.log_half_lives();

    if ratios.iter().all(|&r| r == ratios[0]) {
        return Err(Error::EstimationError(
            "All observations share the same O:C ratio, a line cannot be identified".to_string(),
        ));
    }

    // Draw every resample up front on the caller's generator, redrawing the
    // rare resample that lands on a single ratio value. The draws are
    // sequential so a seeded run does not depend on thread scheduling.
    let mut draws: Vec<Vec<usize>> = Vec::with_capacity(options.iterations);
    let mut redraws = 0;
    for _ in 0..options.iterations {
        let mut attempts = 0;
        loop {
            let indexes: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
            let degenerate = indexes.iter().all(|&i| ratios[i] == ratios[indexes[0]]);
            if !degenerate {
                draws.push(indexes);
                break;
            }

            attempts += 1;
            redraws += 1;
            if attempts >= MAX_REDRAWS {
                return Err(Error::EstimationError(format!(
                    "Gave up after {} degenerate resamples of {} observations",
                    attempts, n
                )));
            }
        }
    }
    if redraws > 0 {
        debug!("Redrew {} degenerate resamples", redraws);
    }

    let lines = draws
        .par_iter()
        .map(|indexes| {
            let x: Vec<FloatValue> = indexes.iter().map(|&i| ratios[i]).collect();
            let y: Vec<FloatValue> = indexes.iter().map(|&i| log_half_lives[i]).collect();
            fit_line(&x, &y)
        })
        .collect::<Result<Vec<LineFit>>>()?;

    debug!(
        "Fitted {} bootstrap resamples of {} observations",
        lines.len(),
        n
    );

    Ok(BootstrapFit::from_lines(lines))
}

/// Fit with a ChaCha generator seeded from `seed`.
///
/// Convenience wrapper for reproducible analyses; equivalent to calling
/// [`fit`] with `ChaCha8Rng::seed_from_u64(seed)`.
pub fn fit_seeded(
    table: &ObservationTable,
    options: BootstrapOptions,
    seed: u64,
) -> Result<BootstrapFit> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    fit(table, options, &mut rng)
}

/// Percentile point estimate of half-life at the given O:C ratio.
///
/// Evaluates `exp(intercept + slope * ratio)` for every recorded pair and
/// returns the requested percentile of that empirical distribution, with
/// linear interpolation between order statistics. Deterministic given a
/// fixed fit; no randomness is consumed at prediction time.
///
/// # Errors
///
/// Fails with [`Error::InvalidPercentile`] when `percentile` lies outside
/// [0, 100].
pub fn predict(fit: &BootstrapFit, ratio: FloatValue, percentile: FloatValue) -> Result<FloatValue> {
    let distribution = fit.prediction_distribution(ratio);
    percentile_of(&distribution.to_vec(), percentile)
}
