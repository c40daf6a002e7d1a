//! Small numeric helpers shared by the sweeps and integrators.

use crate::error::{ensure_positive, LabError, LabResult};

/// Upper bound on the samples a single run may allocate
pub const MAX_STEPS: usize = 50_000_000;

/// Number of samples in the half-open range `[0, total)` stepped by `step`.
///
/// Fails when the count is not representable or exceeds [`MAX_STEPS`].
pub fn step_count(total: f64, step: f64) -> LabResult<usize> {
    let total = ensure_positive("total_time", total)?;
    let step = ensure_positive("dt", step)?;
    let steps = (total / step).ceil();
    if !steps.is_finite() || steps > MAX_STEPS as f64 {
        return Err(LabError::invalid(
            "dt",
            step,
            format!("too many steps for total_time {total} (limit {MAX_STEPS})"),
        ));
    }
    Ok(steps as usize)
}

/// `points` evenly spaced values from `start` to `end`, both inclusive.
pub fn linspace(start: f64, end: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        n => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + i as f64 * step).collect()
        }
    }
}

/// `points` values spaced evenly on a log scale from `10^start_exp` to `10^end_exp`.
pub fn logspace(start_exp: f64, end_exp: f64, points: usize) -> Vec<f64> {
    linspace(start_exp, end_exp, points)
        .into_iter()
        .map(|e| 10f64.powf(e))
        .collect()
}

/// Validate sweep bounds shared by the frequency sweeps.
pub fn check_sweep(start: f64, end: f64, points: usize) -> LabResult<()> {
    if !(start.is_finite() && end.is_finite()) || start >= end {
        return Err(LabError::invalid(
            "sweep",
            start,
            format!("start must be finite and below end ({end})"),
        ));
    }
    if points < 2 {
        return Err(LabError::invalid(
            "points",
            points as f64,
            "a sweep needs at least two points",
        ));
    }
    Ok(())
}
