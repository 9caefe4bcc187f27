//! Smoothed temperature trend.
//!
//! The dashboard overlays a low-order polynomial fitted to the daily values.
//! Missing values are left out of the fit but the trend is still evaluated on
//! every day index, so it lines up with the series it smooths.

use nalgebra::DVector;

use crate::math::basis::{eval_polynomial, polynomial_design, to_unit_interval};
use crate::math::ols::solve_least_squares;

/// Highest polynomial degree used for the trend line.
pub const MAX_TREND_DEGREE: usize = 3;

/// Fit a polynomial trend to `values` indexed by day `0..n`.
///
/// Returns `(day_index, fitted)` pairs for every index, or `None` when fewer
/// than two finite values are available.
pub fn polynomial_trend(values: &[f64], max_degree: usize) -> Option<Vec<(f64, f64)>> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let last = (n - 1) as f64;

    let (xs, ys): (Vec<f64>, Vec<f64>) = values
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .map(|(i, &v)| (to_unit_interval(i as f64, 0.0, last), v))
        .unzip();

    if xs.len() < 2 {
        return None;
    }

    let degree = max_degree.min(xs.len() - 1);
    let design = polynomial_design(&xs, degree);
    let target = DVector::from_vec(ys);
    let betas = solve_least_squares(&design, &target)?;
    let betas = betas.as_slice();

    Some(
        (0..n)
            .map(|i| {
                let x = to_unit_interval(i as f64, 0.0, last);
                (i as f64, eval_polynomial(betas, x))
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trend_recovers_exact_quadratic() {
        let values: Vec<f64> = (0..30)
            .map(|i| {
                let t = i as f64;
                5.0 + 0.5 * t - 0.02 * t * t
            })
            .collect();
        let trend = polynomial_trend(&values, 2).unwrap();
        assert_eq!(trend.len(), values.len());
        for ((x, fitted), actual) in trend.iter().zip(&values) {
            assert!((fitted - actual).abs() < 1e-8, "day {x}: {fitted} vs {actual}");
        }
    }

    #[test]
    fn trend_skips_missing_values_but_covers_all_days() {
        let values = [1.0, f64::NAN, 3.0, 4.0];
        let trend = polynomial_trend(&values, 1).unwrap();
        assert_eq!(trend.len(), 4);
        assert!((trend[1].1 - 2.0).abs() < 1e-8);
    }

    #[test]
    fn trend_needs_two_points() {
        assert!(polynomial_trend(&[1.0], 3).is_none());
        assert!(polynomial_trend(&[1.0, f64::NAN], 3).is_none());
    }
}
