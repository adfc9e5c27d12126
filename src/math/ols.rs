//! Least squares helpers.
//!
//! The forecaster needs one small regression: a straight line through the
//! start of the weekly series, used to seed Holt's level and trend.
//!
//! ```text
//! minimize Σ (y_i - (a + b t_i))^2
//! ```
//!
//! Implementation choices:
//! - We solve with SVD so tall design matrices (more rows than columns) work.
//!   (Nalgebra's `QR::solve` is intended for square systems and will panic for
//!   non-square matrices.)
//! - Near-singular systems are retried with looser tolerances before giving up.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Fit `y = intercept + slope * t` with `t = 0, 1, 2, ...`.
///
/// Returns `(intercept, slope)`, or `None` for fewer than two points or a
/// singular system.
pub fn fit_line(y: &[f64]) -> Option<(f64, f64)> {
    let n = y.len();
    if n < 2 {
        return None;
    }

    let mut x = DMatrix::<f64>::zeros(n, 2);
    for i in 0..n {
        x[(i, 0)] = 1.0;
        x[(i, 1)] = i as f64;
    }
    let y = DVector::from_column_slice(y);

    let beta = solve_least_squares(&x, &y)?;
    Some((beta[0], beta[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn fit_line_recovers_intercept_and_slope() {
        let (a, b) = fit_line(&[100.0, 120.0, 140.0]).unwrap();
        assert!((a - 100.0).abs() < 1e-9);
        assert!((b - 20.0).abs() < 1e-9);
    }

    #[test]
    fn fit_line_on_constant_series_has_zero_slope() {
        let (a, b) = fit_line(&[7.0, 7.0, 7.0, 7.0]).unwrap();
        assert!((a - 7.0).abs() < 1e-9);
        assert!(b.abs() < 1e-9);
    }

    #[test]
    fn fit_line_needs_two_points() {
        assert!(fit_line(&[1.0]).is_none());
        assert!(fit_line(&[]).is_none());
    }
}
