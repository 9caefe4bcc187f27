//! Five-number summaries.

use crate::aggregate::{ensure_non_empty, finite_values};
use crate::domain::{Variable, WeatherSeries};
use crate::error::WeatherError;

/// Min, quartiles, median, mean and max of one variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescriptiveStats {
    pub variable: Variable,
    /// Number of non-missing values summarized.
    pub n: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub mean: f64,
    pub q3: f64,
    pub max: f64,
}

pub fn descriptive_stats(series: &WeatherSeries, variable: Variable) -> Result<DescriptiveStats, WeatherError> {
    ensure_non_empty(series)?;

    let mut values: Vec<f64> = finite_values(series.observations(), variable).collect();
    if values.is_empty() {
        return Err(WeatherError::EmptySeries);
    }
    values.sort_by(f64::total_cmp);

    let n = values.len();
    let mean = values.iter().sum::<f64>() / n as f64;

    Ok(DescriptiveStats {
        variable,
        n,
        min: values[0],
        q1: quantile_sorted(&values, 0.25),
        median: quantile_sorted(&values, 0.5),
        mean,
        q3: quantile_sorted(&values, 0.75),
        max: values[n - 1],
    })
}

/// Linear-interpolation quantile of ascending, non-empty `sorted` data.
///
/// Uses `h = (n - 1) * p` and interpolates between the neighbours of `h`
/// (the default definition of most statistics packages).
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let h = (n - 1) as f64 * p.clamp(0.0, 1.0);
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = h - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::test_support::*;

    #[test]
    fn quantiles_interpolate_linearly() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile_sorted(&v, 0.0), 1.0);
        assert_eq!(quantile_sorted(&v, 0.25), 1.75);
        assert_eq!(quantile_sorted(&v, 0.5), 2.5);
        assert_eq!(quantile_sorted(&v, 0.75), 3.25);
        assert_eq!(quantile_sorted(&v, 1.0), 4.0);
        assert_eq!(quantile_sorted(&[7.0], 0.3), 7.0);
    }

    #[test]
    fn five_number_summary_of_temperature() {
        let series = series_from(
            day(2024, 1, 1),
            &[(5.0, 0.0), (1.0, 0.0), (3.0, 0.0), (2.0, 0.0), (4.0, 0.0)],
        );
        let s = descriptive_stats(&series, Variable::Temperature).unwrap();
        assert_eq!(s.n, 5);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.q1, 2.0);
        assert_eq!(s.median, 3.0);
        assert_eq!(s.mean, 3.0);
        assert_eq!(s.q3, 4.0);
        assert_eq!(s.max, 5.0);
    }

    #[test]
    fn precipitation_summary_skips_missing() {
        let series = series_from(day(2024, 1, 1), &[(0.0, 2.0), (0.0, f64::NAN), (0.0, 0.0)]);
        let s = descriptive_stats(&series, Variable::Precipitation).unwrap();
        assert_eq!(s.n, 2);
        assert_eq!(s.median, 1.0);
        assert_eq!(s.mean, 1.0);
    }

    #[test]
    fn empty_series_has_no_summary() {
        let empty = WeatherSeries::from_observations("Nowhere", Vec::new());
        assert_eq!(
            descriptive_stats(&empty, Variable::Temperature),
            Err(WeatherError::EmptySeries)
        );
    }
}
