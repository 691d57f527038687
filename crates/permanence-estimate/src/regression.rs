//! Ordinary least squares on paired samples.

use crate::{Error, Result};
use permanence_core::timeseries::FloatValue;

/// Coefficients of a fitted line `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    pub intercept: FloatValue,
    pub slope: FloatValue,
}

/// Fit `y = intercept + slope * x` by ordinary least squares.
///
/// # Errors
///
/// Fails with [`Error::InsufficientData`] on fewer than 2 points and with
/// [`Error::EstimationError`] when the predictor has zero variance (the
/// slope is unidentifiable).
pub fn fit_line(x: &[FloatValue], y: &[FloatValue]) -> Result<LineFit> {
    if x.len() != y.len() {
        return Err(Error::EstimationError(format!(
            "Predictor and response lengths differ: {} vs {}",
            x.len(),
            y.len()
        )));
    }
    if x.len() < 2 {
        return Err(Error::InsufficientData {
            required: 2,
            actual: x.len(),
        });
    }

    let n = x.len() as FloatValue;
    let mean_x = x.iter().sum::<FloatValue>() / n;
    let mean_y = y.iter().sum::<FloatValue>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        sxx += (xi - mean_x) * (xi - mean_x);
        sxy += (xi - mean_x) * (yi - mean_y);
    }

    if sxx == 0.0 {
        return Err(Error::EstimationError(
            "Predictor has zero variance, slope is unidentifiable".to_string(),
        ));
    }

    let slope = sxy / sxx;
    Ok(LineFit {
        intercept: mean_y - slope * mean_x,
        slope,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn recovers_exact_line() {
        // y = 2 + 3x, noiseless
        let x = [0.0, 1.0, 2.0, 3.0];
        let y: Vec<FloatValue> = x.iter().map(|xi| 2.0 + 3.0 * xi).collect();

        let line = fit_line(&x, &y).unwrap();
        assert_relative_eq!(line.intercept, 2.0, max_relative = 1e-12);
        assert_relative_eq!(line.slope, 3.0, max_relative = 1e-12);
    }

    #[test]
    fn two_points_define_the_line() {
        let line = fit_line(&[0.0, 2.0], &[1.0, 5.0]).unwrap();
        assert_relative_eq!(line.intercept, 1.0, max_relative = 1e-12);
        assert_relative_eq!(line.slope, 2.0, max_relative = 1e-12);
    }

    #[test]
    fn duplicated_points_do_not_change_the_fit() {
        // Resampling with replacement produces duplicates; the fitted line
        // through collinear points must be unchanged by them
        let line = fit_line(&[0.0, 0.0, 2.0, 2.0, 2.0], &[1.0, 1.0, 5.0, 5.0, 5.0]).unwrap();
        assert_relative_eq!(line.intercept, 1.0, max_relative = 1e-12);
        assert_relative_eq!(line.slope, 2.0, max_relative = 1e-12);
    }

    #[test]
    fn minimises_residuals_for_noisy_data() {
        let x = [0.0, 1.0, 2.0];
        let y = [0.0, 1.0, 1.0];

        let line = fit_line(&x, &y).unwrap();
        // Closed form: slope = 0.5, intercept = 1/6
        assert_relative_eq!(line.slope, 0.5, max_relative = 1e-12);
        assert_relative_eq!(line.intercept, 1.0 / 6.0, max_relative = 1e-12);
    }

    #[test]
    fn rejects_single_point() {
        let result = fit_line(&[1.0], &[2.0]);
        assert!(matches!(
            result,
            Err(Error::InsufficientData {
                required: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn rejects_zero_variance_predictor() {
        let result = fit_line(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]);
        assert!(matches!(result, Err(Error::EstimationError(_))));
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let result = fit_line(&[1.0, 2.0], &[1.0]);
        assert!(matches!(result, Err(Error::EstimationError(_))));
    }
}
