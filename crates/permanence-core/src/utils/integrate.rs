//! Numerical integration utilities.

use crate::timeseries::FloatValue;

/// Integrate sampled values with the composite trapezoid rule at unit
/// spacing.
///
/// Matches `numpy.trapz(values)` for a default (1-spaced) axis: the sum of
/// `(values[i] + values[i+1]) / 2` over consecutive pairs. Fewer than two
/// samples enclose no area and integrate to zero.
///
/// # Example
/// ```
/// use permanence_core::utils::integrate::trapz;
///
/// // Unit square
/// assert_eq!(trapz(&[1.0, 1.0]), 1.0);
/// // Triangle under a ramp
/// assert_eq!(trapz(&[0.0, 1.0, 2.0]), 2.0);
/// ```
pub fn trapz(values: &[FloatValue]) -> FloatValue {
    if values.len() < 2 {
        return 0.0;
    }

    values
        .windows(2)
        .map(|pair| 0.5 * (pair[0] + pair[1]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_trapz_empty_and_single() {
        assert_eq!(trapz(&[]), 0.0);
        assert_eq!(trapz(&[5.0]), 0.0);
    }

    #[test]
    fn test_trapz_constant() {
        // Constant 1 over n-1 unit intervals
        let values = vec![1.0; 101];
        assert_relative_eq!(trapz(&values), 100.0, max_relative = 1e-12);
    }

    #[test]
    fn test_trapz_linear_ramp() {
        // y = x over [0, 10]: area is 50
        let values: Vec<FloatValue> = (0..=10).map(|i| i as FloatValue).collect();
        assert_relative_eq!(trapz(&values), 50.0, max_relative = 1e-12);
    }

    #[test]
    fn test_trapz_is_signed() {
        let values = vec![-1.0; 11];
        assert_relative_eq!(trapz(&values), -10.0, max_relative = 1e-12);
    }
}
