//! Shared "generate and summarize" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! request -> series generation -> aggregation -> trend smoothing
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::aggregate::{DashboardSummary, summarize};
use crate::data::{generate, generate_with_rng};
use crate::domain::{Variable, WeatherSeries};
use crate::error::WeatherError;
use crate::math::{MAX_TREND_DEGREE, polynomial_trend};

/// The trigger payload: which city and which days to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub city: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Fixed RNG seed; `None` draws from the thread-local RNG.
    pub seed: Option<u64>,
}

/// All computed outputs of a single generation request.
#[derive(Debug, Clone)]
pub struct DashboardRun {
    pub request: RunRequest,
    pub series: WeatherSeries,
    pub summary: DashboardSummary,
    /// Smoothed temperature as `(day_index, °C)`, when the series is long enough.
    pub trend: Option<Vec<(f64, f64)>>,
}

/// Generate a fresh series for `request` and derive every dashboard view.
pub fn run_dashboard(request: &RunRequest) -> Result<DashboardRun, WeatherError> {
    let series = match request.seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            generate_with_rng(&request.city, request.start, request.end, &mut rng)?
        }
        None => generate(&request.city, request.start, request.end)?,
    };

    build_run(request.clone(), series)
}

/// Derive every dashboard view from an already generated series.
pub fn build_run(request: RunRequest, series: WeatherSeries) -> Result<DashboardRun, WeatherError> {
    let summary = summarize(&series)?;
    let temperatures: Vec<f64> = series.values(Variable::Temperature).collect();
    let trend = polynomial_trend(&temperatures, MAX_TREND_DEGREE);

    Ok(DashboardRun {
        request,
        series,
        summary,
        trend,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(seed: Option<u64>) -> RunRequest {
        RunRequest {
            city: "Amsterdam".to_string(),
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            seed,
        }
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let a = run_dashboard(&request(Some(11))).unwrap();
        let b = run_dashboard(&request(Some(11))).unwrap();
        assert_eq!(a.series, b.series);
        assert_eq!(a.summary, b.summary);
    }

    #[test]
    fn run_carries_trend_for_every_day() {
        let run = run_dashboard(&request(None)).unwrap();
        let trend = run.trend.unwrap();
        assert_eq!(trend.len(), run.series.len());
        assert_eq!(run.summary.seasons.len(), 3);
    }

    #[test]
    fn inverted_range_fails_without_partial_output() {
        let mut req = request(Some(1));
        std::mem::swap(&mut req.start, &mut req.end);
        assert!(matches!(run_dashboard(&req), Err(WeatherError::InvalidRange { .. })));
    }
}
