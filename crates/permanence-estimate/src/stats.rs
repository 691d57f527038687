//! Order-statistic utilities for empirical distributions.

use crate::{Error, Result};
use permanence_core::timeseries::FloatValue;

/// Percentile of `values` with linear interpolation between order
/// statistics.
///
/// Matches NumPy's default (`linear`) method: the requested percentile maps
/// to the fractional rank `p / 100 * (n - 1)` in the sorted sample, and the
/// result interpolates between the two bracketing order statistics. A
/// percentile of 0 returns the minimum exactly and 100 the maximum exactly.
///
/// # Errors
///
/// Fails with [`Error::InvalidPercentile`] when `percentile` lies outside
/// [0, 100] (or is NaN), and with [`Error::EstimationError`] on an empty
/// sample.
pub fn percentile_of(values: &[FloatValue], percentile: FloatValue) -> Result<FloatValue> {
    if !(0.0..=100.0).contains(&percentile) {
        return Err(Error::InvalidPercentile(percentile));
    }
    if values.is_empty() {
        return Err(Error::EstimationError(
            "Cannot take a percentile of an empty distribution".to_string(),
        ));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(FloatValue::total_cmp);

    let rank = percentile / 100.0 * (sorted.len() - 1) as FloatValue;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return Ok(sorted[lo]);
    }

    let frac = rank - lo as FloatValue;
    Ok(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
}
