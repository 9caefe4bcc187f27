//! Aggregations over a generated series.
//!
//! Every function here is pure and deterministic. Missing (non-finite)
//! measurements are skipped, and an empty series is reported as
//! [`WeatherError::EmptySeries`] rather than producing `NaN`.

use chrono::NaiveDate;

use crate::domain::{DailyObservation, Variable, WeatherSeries};
use crate::error::WeatherError;

pub mod descriptive;
pub mod season;

pub use descriptive::*;
pub use season::*;

/// A day counts as rainy for the extremes report above this amount (mm).
///
/// The per-season rain-day table uses its own, stricter threshold
/// ([`season::RAIN_DAY_THRESHOLD_MM`]).
pub const RAINY_DAY_THRESHOLD_MM: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureExtremes {
    pub min_value: f64,
    pub min_date: NaiveDate,
    pub max_value: f64,
    pub max_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrecipitationExtremes {
    pub max_value: f64,
    pub max_date: NaiveDate,
    /// Days with precipitation above [`RAINY_DAY_THRESHOLD_MM`].
    pub rainy_day_count: usize,
}

/// Everything the dashboard displays, derived once per generated series.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub mean_temperature: f64,
    pub total_precipitation: f64,
    pub max_wind_speed: f64,
    pub mean_humidity: f64,
    pub temperature_extremes: TemperatureExtremes,
    pub precipitation_extremes: PrecipitationExtremes,
    pub temperature_stats: DescriptiveStats,
    pub precipitation_stats: DescriptiveStats,
    pub seasons: Vec<SeasonSummary>,
}

/// Compute every summary for `series`.
pub fn summarize(series: &WeatherSeries) -> Result<DashboardSummary, WeatherError> {
    Ok(DashboardSummary {
        mean_temperature: mean_temperature(series)?,
        total_precipitation: total_precipitation(series)?,
        max_wind_speed: max_wind_speed(series)?,
        mean_humidity: mean_humidity(series)?,
        temperature_extremes: temperature_extremes(series)?,
        precipitation_extremes: precipitation_extremes(series)?,
        temperature_stats: descriptive_stats(series, Variable::Temperature)?,
        precipitation_stats: descriptive_stats(series, Variable::Precipitation)?,
        seasons: season_summaries(series)?,
    })
}

pub fn mean_temperature(series: &WeatherSeries) -> Result<f64, WeatherError> {
    mean_of(series, Variable::Temperature)
}

/// Sum of all recorded precipitation (mm).
pub fn total_precipitation(series: &WeatherSeries) -> Result<f64, WeatherError> {
    ensure_non_empty(series)?;
    finite_values(series.observations(), Variable::Precipitation)
        .reduce(|a, b| a + b)
        .ok_or(WeatherError::EmptySeries)
}

pub fn max_wind_speed(series: &WeatherSeries) -> Result<f64, WeatherError> {
    ensure_non_empty(series)?;
    finite_values(series.observations(), Variable::WindSpeed)
        .reduce(f64::max)
        .ok_or(WeatherError::EmptySeries)
}

pub fn mean_humidity(series: &WeatherSeries) -> Result<f64, WeatherError> {
    mean_of(series, Variable::Humidity)
}

/// Arithmetic mean of one variable, skipping missing values.
pub fn mean_of(series: &WeatherSeries, variable: Variable) -> Result<f64, WeatherError> {
    ensure_non_empty(series)?;
    mean(finite_values(series.observations(), variable)).ok_or(WeatherError::EmptySeries)
}

/// Coldest and warmest day. Ties resolve to the earliest date.
pub fn temperature_extremes(series: &WeatherSeries) -> Result<TemperatureExtremes, WeatherError> {
    ensure_non_empty(series)?;
    let obs = series.observations();
    let coldest = first_extreme(obs, Variable::Temperature, |candidate, best| candidate < best)
        .ok_or(WeatherError::EmptySeries)?;
    let warmest = first_extreme(obs, Variable::Temperature, |candidate, best| candidate > best)
        .ok_or(WeatherError::EmptySeries)?;

    Ok(TemperatureExtremes {
        min_value: coldest.temperature,
        min_date: coldest.date,
        max_value: warmest.temperature,
        max_date: warmest.date,
    })
}

/// Wettest day (earliest on ties) plus the count of rainy days.
pub fn precipitation_extremes(series: &WeatherSeries) -> Result<PrecipitationExtremes, WeatherError> {
    ensure_non_empty(series)?;
    let obs = series.observations();
    let wettest = first_extreme(obs, Variable::Precipitation, |candidate, best| candidate > best)
        .ok_or(WeatherError::EmptySeries)?;
    let rainy_day_count = finite_values(obs, Variable::Precipitation)
        .filter(|p| *p > RAINY_DAY_THRESHOLD_MM)
        .count();

    Ok(PrecipitationExtremes {
        max_value: wettest.precipitation,
        max_date: wettest.date,
        rainy_day_count,
    })
}

pub(crate) fn ensure_non_empty(series: &WeatherSeries) -> Result<(), WeatherError> {
    if series.is_empty() {
        return Err(WeatherError::EmptySeries);
    }
    Ok(())
}

pub(crate) fn finite_values(
    observations: &[DailyObservation],
    variable: Variable,
) -> impl Iterator<Item = f64> + '_ {
    observations
        .iter()
        .map(move |o| variable.value(o))
        .filter(|v| v.is_finite())
}

pub(crate) fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// First observation whose value beats every earlier one under `better`.
///
/// `better` must be strict so later equal values never replace the first.
fn first_extreme(
    observations: &[DailyObservation],
    variable: Variable,
    better: impl Fn(f64, f64) -> bool,
) -> Option<&DailyObservation> {
    let mut best: Option<(&DailyObservation, f64)> = None;
    for obs in observations {
        let v = variable.value(obs);
        if !v.is_finite() {
            continue;
        }
        match best {
            Some((_, b)) if !better(v, b) => {}
            _ => best = Some((obs, v)),
        }
    }
    best.map(|(obs, _)| obs)
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;

    use crate::domain::{DailyObservation, Season, WeatherSeries};

    pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn obs(date: NaiveDate, temperature: f64, precipitation: f64) -> DailyObservation {
        DailyObservation {
            date,
            city: "Testville".to_string(),
            temperature,
            humidity: 50.0,
            precipitation,
            wind_speed: 10.0,
            pressure: 1013.0,
            season: Season::from_date(date).unwrap(),
        }
    }

    /// Consecutive days from `start` with the given `(temperature, precipitation)` values.
    pub fn series_from(start: NaiveDate, values: &[(f64, f64)]) -> WeatherSeries {
        let observations = start
            .iter_days()
            .zip(values)
            .map(|(d, &(t, p))| obs(d, t, p))
            .collect();
        WeatherSeries::from_observations("Testville", observations)
    }
}
