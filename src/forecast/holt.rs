//! Holt's linear trend (additive trend, no seasonality).
//!
//! Given a regular weekly series `y_0 .. y_{n-1}`:
//!
//! ```text
//! forecast:  ŷ_t     = l_{t-1} + b_{t-1}
//! level:     l_t     = α y_t + (1 - α)(l_{t-1} + b_{t-1})
//! trend:     b_t     = β (l_t - l_{t-1}) + (1 - β) b_{t-1}
//! project:   ŷ_{n+h} = l_{n-1} + h b_{n-1}
//! ```
//!
//! The initial state comes from an OLS line through the first few points, and
//! `(α, β)` minimize the in-sample one-step-ahead SSE over a parameter grid
//! (coarse pass, then a zoomed pass around the best coarse cell).

use rayon::prelude::*;

use crate::domain::HoltFit;
use crate::error::WasteError;
use crate::forecast::grid::{smoothing_grid, zoom_grid};
use crate::math::fit_line;

/// Fitting options for the grid search.
#[derive(Debug, Clone)]
pub struct HoltOptions {
    /// Steps per dimension for the coarse `(α, β)` grid.
    pub coarse_steps: usize,
    /// Steps per dimension for the zoomed grid.
    pub zoom_steps: usize,
    /// Number of leading points used to seed level and trend.
    pub init_window: usize,
}

impl Default for HoltOptions {
    fn default() -> Self {
        Self {
            coarse_steps: 25,
            zoom_steps: 21,
            init_window: 10,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    idx: usize,
    alpha: f64,
    beta: f64,
    sse: f64,
}

/// Smoothing state before the first observation.
#[derive(Debug, Clone, Copy)]
struct InitialState {
    level: f64,
    trend: f64,
}

/// Fit Holt's model to `values`.
pub fn fit_holt(values: &[f64], opts: &HoltOptions) -> Result<HoltFit, WasteError> {
    let n = values.len();
    if n < 2 {
        return Err(WasteError::InsufficientData { needed: 2, got: n });
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(WasteError::ForecastFit(
            "weekly series contains non-finite values".to_string(),
        ));
    }

    let init = initial_state(values, opts.init_window)?;

    let coarse = smoothing_grid(opts.coarse_steps)?;
    let best_coarse = best_candidate(values, init, &coarse)?;

    let zoomed = zoom_grid((best_coarse.alpha, best_coarse.beta), opts.coarse_steps, opts.zoom_steps)?;
    // Only move off the coarse optimum for a strict improvement.
    let best = match best_candidate(values, init, &zoomed) {
        Ok(z) if z.sse < best_coarse.sse => z,
        _ => best_coarse,
    };

    log::debug!(
        "Holt grid search: coarse α={:.4} β={:.4} sse={:.6}; final α={:.4} β={:.4} sse={:.6}",
        best_coarse.alpha,
        best_coarse.beta,
        best_coarse.sse,
        best.alpha,
        best.beta,
        best.sse
    );

    let (level, trend, sse) = run_filter(values, init, best.alpha, best.beta);
    if !(level.is_finite() && trend.is_finite() && sse.is_finite()) {
        return Err(WasteError::ForecastFit(
            "smoothing produced a non-finite state".to_string(),
        ));
    }

    Ok(HoltFit {
        alpha: best.alpha,
        beta: best.beta,
        level,
        trend,
        sse,
        rmse: (sse / n as f64).sqrt(),
        n,
    })
}

/// Project `horizon` steps past the last observation.
pub fn project(fit: &HoltFit, horizon: usize) -> Vec<f64> {
    (1..=horizon).map(|h| fit.level + h as f64 * fit.trend).collect()
}

fn initial_state(values: &[f64], window: usize) -> Result<InitialState, WasteError> {
    let m = values.len().min(window.max(2));
    let (intercept, slope) = fit_line(&values[..m]).ok_or_else(|| {
        WasteError::ForecastFit("could not solve the initial trend regression".to_string())
    })?;

    // Step the fitted line back one period so the first one-step forecast is
    // the regression value at t = 0.
    Ok(InitialState {
        level: intercept - slope,
        trend: slope,
    })
}

fn best_candidate(values: &[f64], init: InitialState, grid: &[(f64, f64)]) -> Result<Candidate, WasteError> {
    // Evaluate each (α, β) pair independently (parallel).
    let candidates: Vec<Candidate> = grid
        .par_iter()
        .enumerate()
        .filter_map(|(idx, &(alpha, beta))| {
            let (_, _, sse) = run_filter(values, init, alpha, beta);
            sse.is_finite().then_some(Candidate {
                idx,
                alpha,
                beta,
                sse,
            })
        })
        .collect();

    if candidates.is_empty() {
        return Err(WasteError::ForecastFit(
            "no smoothing parameters produced a finite error".to_string(),
        ));
    }

    // Deterministic selection: pick the minimum SSE; break ties by the lowest grid index.
    let mut best = candidates[0];
    for c in &candidates[1..] {
        if c.sse < best.sse || (c.sse == best.sse && c.idx < best.idx) {
            best = *c;
        }
    }
    Ok(best)
}

/// Run the smoothing recursions; returns final `(level, trend, sse)`.
fn run_filter(values: &[f64], init: InitialState, alpha: f64, beta: f64) -> (f64, f64, f64) {
    let mut level = init.level;
    let mut trend = init.trend;
    let mut sse = 0.0;

    for &y in values {
        let forecast = level + trend;
        let error = y - forecast;
        sse += error * error;

        let prev_level = level;
        level = alpha * y + (1.0 - alpha) * forecast;
        trend = beta * (level - prev_level) + (1.0 - beta) * trend;
    }

    (level, trend, sse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_series_is_reproduced_exactly() {
        let values = [100.0, 120.0, 140.0];
        let fit = fit_holt(&values, &HoltOptions::default()).unwrap();

        assert!(fit.sse < 1e-9, "sse = {}", fit.sse);
        assert!((fit.level - 140.0).abs() < 1e-6);
        assert!((fit.trend - 20.0).abs() < 1e-6);

        let fc = project(&fit, 4);
        let expected = [160.0, 180.0, 200.0, 220.0];
        for (got, want) in fc.iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-6, "{got} vs {want}");
        }
    }

    #[test]
    fn constant_series_gives_flat_forecast() {
        let values = [50.0; 6];
        let fit = fit_holt(&values, &HoltOptions::default()).unwrap();
        for v in project(&fit, 4) {
            assert!((v - 50.0).abs() < 1e-6, "expected flat forecast, got {v}");
        }
    }

    #[test]
    fn parameters_stay_in_bounds_on_noisy_data() {
        let values = [10.0, 14.0, 9.0, 16.0, 12.0, 18.0, 13.0, 20.0, 15.0, 22.0];
        let fit = fit_holt(&values, &HoltOptions::default()).unwrap();
        assert!((0.01..=0.99).contains(&fit.alpha));
        assert!((0.01..=0.99).contains(&fit.beta));
        assert!(fit.sse.is_finite() && fit.rmse.is_finite());
        assert_eq!(fit.n, values.len());
    }

    #[test]
    fn grid_search_beats_a_fixed_choice() {
        let values = [10.0, 14.0, 9.0, 16.0, 12.0, 18.0, 13.0, 20.0, 15.0, 22.0];
        let fit = fit_holt(&values, &HoltOptions::default()).unwrap();
        let init = initial_state(&values, 10).unwrap();
        let (_, _, sse_fixed) = run_filter(&values, init, 0.5, 0.5);
        assert!(fit.sse <= sse_fixed * (1.0 + 1e-9));
    }

    #[test]
    fn non_finite_input_is_a_fit_error() {
        let err = fit_holt(&[1.0, f64::NAN, 3.0], &HoltOptions::default()).unwrap_err();
        assert!(matches!(err, WasteError::ForecastFit(_)));
    }

    #[test]
    fn single_point_is_insufficient() {
        let err = fit_holt(&[1.0], &HoltOptions::default()).unwrap_err();
        assert!(matches!(err, WasteError::InsufficientData { needed: 2, got: 1 }));
    }
}
