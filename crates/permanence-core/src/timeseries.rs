//! Scalar and time-axis conventions shared across the workspace.

use ndarray::Array1;

/// Value type used for all physical quantities.
pub type FloatValue = f64;

/// Time in years since the start of the analysis window.
pub type Time = f64;

/// Annual time grid from year 0 to `horizon` inclusive.
///
/// Every published curve in this workspace (decay trajectories, impulse
/// response functions) is evaluated on a 1-year spacing, so the grid has
/// `horizon + 1` points.
pub fn annual_time_grid(horizon: usize) -> Array1<Time> {
    Array1::from_iter((0..=horizon).map(|t| t as Time))
}
