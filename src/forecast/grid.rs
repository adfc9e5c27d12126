//! Smoothing-parameter grid generation.
//!
//! Holt's `(α, β)` are chosen by a deterministic grid search rather than a
//! nonlinear optimizer:
//! - it avoids local minima on short, noisy weekly histories
//! - it is deterministic given the same inputs
//! - with two parameters, a modest grid (plus one zoomed pass) is fast enough

use crate::error::WasteError;

/// Smallest admissible smoothing parameter.
pub const PARAM_MIN: f64 = 0.01;
/// Largest admissible smoothing parameter.
pub const PARAM_MAX: f64 = 0.99;

/// Generate `steps` evenly spaced points between `min` and `max` (inclusive).
pub fn lin_space(min: f64, max: f64, steps: usize) -> Result<Vec<f64>, WasteError> {
    if !(min.is_finite() && max.is_finite() && max > min) {
        return Err(WasteError::Config(format!(
            "Invalid grid range: min={min}, max={max} (must be finite and max>min)."
        )));
    }
    if steps < 2 {
        return Err(WasteError::Config("Grid steps must be >= 2.".to_string()));
    }

    let step = (max - min) / (steps as f64 - 1.0);
    Ok((0..steps).map(|i| min + step * i as f64).collect())
}

/// Full `(α, β)` grid over the admissible range.
pub fn smoothing_grid(steps: usize) -> Result<Vec<(f64, f64)>, WasteError> {
    let values = lin_space(PARAM_MIN, PARAM_MAX, steps)?;
    Ok(cartesian(&values, &values))
}

/// A finer `(α, β)` grid covering one coarse cell on each side of `center`,
/// clipped to the admissible range.
pub fn zoom_grid(center: (f64, f64), coarse_steps: usize, steps: usize) -> Result<Vec<(f64, f64)>, WasteError> {
    let half = (PARAM_MAX - PARAM_MIN) / (coarse_steps.max(2) as f64 - 1.0);
    let around = |c: f64| lin_space((c - half).max(PARAM_MIN), (c + half).min(PARAM_MAX), steps);
    Ok(cartesian(&around(center.0)?, &around(center.1)?))
}

fn cartesian(alphas: &[f64], betas: &[f64]) -> Vec<(f64, f64)> {
    let mut out = Vec::with_capacity(alphas.len() * betas.len());
    for &a in alphas {
        for &b in betas {
            out.push((a, b));
        }
    }
    out
}
