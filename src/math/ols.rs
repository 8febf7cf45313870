//! Least squares solver.
//!
//! The trend fitter solves a tiny regression problem of the form:
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2
//! ```
//!
//! Implementation choices:
//! - SVD handles the tall design matrix (many rows, two columns) robustly.
//!   (Nalgebra's `QR::solve` is intended for square systems and will panic for
//!   non-square matrices.)
//! - For rank-deficient designs (e.g. every year identical) SVD returns the
//!   minimum-norm solution instead of failing.

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

/// Sum of squared errors, RMSE and R² for a set of predictions.
///
/// Returns `(sse, rmse, r2)`; `r2` is `None` when `observed` has no variance.
pub fn fit_stats(observed: &[f64], predicted: &[f64]) -> (f64, f64, Option<f64>) {
    let n = observed.len().min(predicted.len());
    if n == 0 {
        return (0.0, 0.0, None);
    }

    let sse: f64 = observed
        .iter()
        .zip(predicted)
        .map(|(y, p)| (y - p) * (y - p))
        .sum();
    let rmse = (sse / n as f64).sqrt();

    let mean = observed[..n].iter().sum::<f64>() / n as f64;
    let sst: f64 = observed[..n].iter().map(|y| (y - mean) * (y - mean)).sum();
    let r2 = if sst > 0.0 { Some(1.0 - sse / sst) } else { None };

    (sse, rmse, r2)
}
