//! Per-season grouping.
//!
//! Rows are emitted in calendar order (Winter, Spring, Summer, Autumn) and
//! only for seasons that actually occur in the series.

use crate::aggregate::{ensure_non_empty, finite_values, mean};
use crate::domain::{DailyObservation, Season, Variable, WeatherSeries};
use crate::error::WeatherError;
use crate::math::round1;

/// A day counts as a rain day in the seasonal table above this amount (mm).
///
/// Deliberately stricter than [`crate::aggregate::RAINY_DAY_THRESHOLD_MM`].
pub const RAIN_DAY_THRESHOLD_MM: f64 = 1.0;

/// Temperature statistics of one season, rounded to one decimal.
///
/// `sd` is the sample standard deviation and is `None` with fewer than two
/// values. Fields are `NaN` only if every temperature in the season is missing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonTemperature {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub sd: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonRain {
    /// Days with precipitation above [`RAIN_DAY_THRESHOLD_MM`].
    pub rain_days: usize,
    pub total: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonSummary {
    pub season: Season,
    pub days: usize,
    pub temperature: SeasonTemperature,
    pub rain: SeasonRain,
}

/// Temperature statistics per season present.
pub fn season_summary(series: &WeatherSeries) -> Result<Vec<(Season, SeasonTemperature)>, WeatherError> {
    Ok(season_summaries(series)?
        .into_iter()
        .map(|s| (s.season, s.temperature))
        .collect())
}

/// Rain-day counts and precipitation totals per season present.
pub fn rain_day_summary(series: &WeatherSeries) -> Result<Vec<(Season, SeasonRain)>, WeatherError> {
    Ok(season_summaries(series)?
        .into_iter()
        .map(|s| (s.season, s.rain))
        .collect())
}

/// Full per-season rows (temperature and rain).
pub fn season_summaries(series: &WeatherSeries) -> Result<Vec<SeasonSummary>, WeatherError> {
    ensure_non_empty(series)?;

    let mut rows = Vec::with_capacity(Season::ALL.len());
    for season in Season::ALL {
        let group: Vec<DailyObservation> = series
            .observations()
            .iter()
            .filter(|o| o.season == season)
            .cloned()
            .collect();
        if group.is_empty() {
            continue;
        }

        rows.push(SeasonSummary {
            season,
            days: group.len(),
            temperature: temperature_stats(&group),
            rain: rain_stats(&group),
        });
    }

    Ok(rows)
}

fn temperature_stats(group: &[DailyObservation]) -> SeasonTemperature {
    let temps: Vec<f64> = finite_values(group, Variable::Temperature).collect();
    let Some(m) = mean(temps.iter().copied()) else {
        return SeasonTemperature {
            mean: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
            sd: None,
        };
    };

    let min = temps.iter().copied().fold(f64::INFINITY, f64::min);
    let max = temps.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    SeasonTemperature {
        mean: round1(m),
        min: round1(min),
        max: round1(max),
        sd: sample_sd(&temps, m).map(round1),
    }
}

fn rain_stats(group: &[DailyObservation]) -> SeasonRain {
    let mut rain_days = 0;
    let mut total = f64::NAN;
    let mut max = f64::NAN;
    for p in finite_values(group, Variable::Precipitation) {
        if p > RAIN_DAY_THRESHOLD_MM {
            rain_days += 1;
        }
        // Both stay NaN (shown as NA) when the season has no recorded value.
        if total.is_nan() {
            (total, max) = (p, p);
        } else {
            total += p;
            max = max.max(p);
        }
    }
    SeasonRain { rain_days, total, max }
}

/// Standard deviation with the `n - 1` denominator.
fn sample_sd(values: &[f64], mean: f64) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::test_support::*;

    #[test]
    fn absent_seasons_are_omitted() {
        // Jan 30 .. Feb 2: winter only.
        let series = series_from(day(2024, 1, 30), &[(1.0, 0.0), (2.0, 0.0), (3.0, 0.0), (4.0, 0.0)]);
        let rows = season_summaries(&series).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].season, Season::Winter);
        assert_eq!(rows[0].days, 4);
    }

    #[test]
    fn rows_follow_calendar_order() {
        // Nov 30 .. Dec 1 gives Autumn then Winter; Winter sorts first.
        let series = series_from(day(2024, 11, 30), &[(8.0, 0.0), (2.0, 0.0)]);
        let seasons: Vec<Season> = season_summary(&series).unwrap().into_iter().map(|(s, _)| s).collect();
        assert_eq!(seasons, vec![Season::Winter, Season::Autumn]);
    }

    #[test]
    fn temperature_stats_use_sample_sd() {
        let series = series_from(day(2024, 6, 1), &[(2.0, 0.0), (4.0, 0.0), (4.0, 0.0), (6.0, 0.0)]);
        let (_, t) = season_summary(&series).unwrap()[0];
        assert_eq!(t.mean, 4.0);
        assert_eq!(t.min, 2.0);
        assert_eq!(t.max, 6.0);
        // Σ(x - 4)² = 8, / 3 -> sqrt(2.667) = 1.633
        assert_eq!(t.sd, Some(1.6));
    }

    #[test]
    fn single_day_season_has_no_sd() {
        let series = series_from(day(2024, 3, 1), &[(12.0, 0.0)]);
        let (_, t) = season_summary(&series).unwrap()[0];
        assert_eq!(t.sd, None);
        assert_eq!(t.mean, 12.0);
    }

    #[test]
    fn rain_days_use_the_one_millimeter_threshold() {
        let series = series_from(
            day(2024, 9, 1),
            &[(10.0, 1.0), (10.0, 1.1), (10.0, 0.5), (10.0, 6.0)],
        );
        let (season, rain) = rain_day_summary(&series).unwrap()[0];
        assert_eq!(season, Season::Autumn);
        assert_eq!(rain.rain_days, 2);
        assert!((rain.total - 8.6).abs() < 1e-9);
        assert_eq!(rain.max, 6.0);
    }

    #[test]
    fn season_without_recorded_rain_reports_missing_total_and_max() {
        let series = series_from(day(2024, 9, 1), &[(10.0, f64::NAN), (11.0, f64::NAN)]);
        let (_, rain) = rain_day_summary(&series).unwrap()[0];
        assert_eq!(rain.rain_days, 0);
        assert!(rain.total.is_nan());
        assert!(rain.max.is_nan());
    }

    #[test]
    fn generated_series_never_yields_empty_rows() {
        let series = crate::data::generate("Lisbon", day(2024, 5, 20), day(2024, 6, 10)).unwrap();
        let rows = season_summaries(&series).unwrap();
        assert_eq!(rows.iter().map(|r| r.season).collect::<Vec<_>>(), vec![Season::Spring, Season::Summer]);
        assert!(rows.iter().all(|r| r.days > 0));
        assert_eq!(rows.iter().map(|r| r.days).sum::<usize>(), series.len());
    }

    #[test]
    fn empty_series_is_rejected() {
        let empty = WeatherSeries::from_observations("Nowhere", Vec::new());
        assert_eq!(season_summaries(&empty), Err(WeatherError::EmptySeries));
        assert_eq!(rain_day_summary(&empty), Err(WeatherError::EmptySeries));
    }
}
