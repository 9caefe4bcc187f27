//! Polynomial basis for trend fitting.
//!
//! Day indices are mapped to `[-1, 1]` before building powers so the design
//! matrix stays well conditioned for year-long series.

use nalgebra::DMatrix;

/// Map `x` from `[min, max]` onto `[-1, 1]`.
///
/// A degenerate range maps everything to `0`.
pub fn to_unit_interval(x: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    if span.abs() < 1e-12 {
        return 0.0;
    }
    2.0 * (x - min) / span - 1.0
}

/// Vandermonde design matrix with columns `1, x, x^2, ..., x^degree`.
pub fn polynomial_design(xs: &[f64], degree: usize) -> DMatrix<f64> {
    DMatrix::from_fn(xs.len(), degree + 1, |r, c| xs[r].powi(c as i32))
}

/// Evaluate `Σ β_k x^k` with Horner's scheme.
pub fn eval_polynomial(betas: &[f64], x: f64) -> f64 {
    betas.iter().rev().fold(0.0, |acc, b| acc * x + b)
}
