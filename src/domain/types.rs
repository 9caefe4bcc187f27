//! Shared domain types.
//!
//! These types are kept small and serializable so they can be:
//!
//! - produced by the generator and read by the aggregator
//! - rendered into tables, charts and reports
//! - exported to CSV

use chrono::{Datelike, NaiveDate};
use clap::ValueEnum;
use serde::Serialize;

use crate::error::WeatherError;

/// Meteorological season (northern hemisphere, month based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    /// Calendar order, used for grouped tables and charts.
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Autumn];

    /// Map a month number (1 = January) to its season.
    pub fn from_month(month: u32) -> Result<Season, WeatherError> {
        match month {
            12 | 1 | 2 => Ok(Season::Winter),
            3..=5 => Ok(Season::Spring),
            6..=8 => Ok(Season::Summer),
            9..=11 => Ok(Season::Autumn),
            other => Err(WeatherError::UnmappedSeason(other)),
        }
    }

    pub fn from_date(date: NaiveDate) -> Result<Season, WeatherError> {
        Season::from_month(date.month())
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A measured quantity of a daily observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Variable {
    Temperature,
    Humidity,
    Precipitation,
    WindSpeed,
    Pressure,
}

impl Variable {
    pub fn display_name(self) -> &'static str {
        match self {
            Variable::Temperature => "Temperature",
            Variable::Humidity => "Humidity",
            Variable::Precipitation => "Precipitation",
            Variable::WindSpeed => "Wind speed",
            Variable::Pressure => "Pressure",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Variable::Temperature => "°C",
            Variable::Humidity => "%",
            Variable::Precipitation => "mm",
            Variable::WindSpeed => "km/h",
            Variable::Pressure => "hPa",
        }
    }

    /// Read this variable from an observation.
    pub fn value(self, obs: &DailyObservation) -> f64 {
        match self {
            Variable::Temperature => obs.temperature,
            Variable::Humidity => obs.humidity,
            Variable::Precipitation => obs.precipitation,
            Variable::WindSpeed => obs.wind_speed,
            Variable::Pressure => obs.pressure,
        }
    }
}

/// One synthetic weather record for a single calendar day.
///
/// Measurements are rounded to one decimal. A non-finite measurement is
/// treated as missing by every aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyObservation {
    pub date: NaiveDate,
    pub city: String,
    /// Degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent, within `[0, 100]`.
    pub humidity: f64,
    /// Millimeters, non-negative.
    pub precipitation: f64,
    /// km/h, non-negative.
    pub wind_speed: f64,
    /// hPa.
    pub pressure: f64,
    pub season: Season,
}

/// An ordered daily series for one city.
///
/// The series is immutable once built; a new request produces a new series.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSeries {
    city: String,
    observations: Vec<DailyObservation>,
}

impl WeatherSeries {
    /// Wrap already-ordered observations (ascending by date).
    pub fn from_observations(city: impl Into<String>, observations: Vec<DailyObservation>) -> Self {
        Self {
            city: city.into(),
            observations,
        }
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn observations(&self) -> &[DailyObservation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// First and last date, or `None` for an empty series.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.observations.first()?;
        let last = self.observations.last()?;
        Some((first.date, last.date))
    }

    /// Values of one variable in date order (missing values included).
    pub fn values(&self, variable: Variable) -> impl Iterator<Item = f64> + '_ {
        self.observations.iter().map(move |o| variable.value(o))
    }
}

/// Data table column used for sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortColumn {
    Date,
    Temperature,
    Humidity,
    Precipitation,
    WindSpeed,
    Pressure,
    Season,
}

impl SortColumn {
    pub const ALL: [SortColumn; 7] = [
        SortColumn::Date,
        SortColumn::Temperature,
        SortColumn::Humidity,
        SortColumn::Precipitation,
        SortColumn::WindSpeed,
        SortColumn::Pressure,
        SortColumn::Season,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            SortColumn::Date => "date",
            SortColumn::Temperature => "temperature",
            SortColumn::Humidity => "humidity",
            SortColumn::Precipitation => "precipitation",
            SortColumn::WindSpeed => "wind speed",
            SortColumn::Pressure => "pressure",
            SortColumn::Season => "season",
        }
    }

    pub fn next(self) -> SortColumn {
        let idx = SortColumn::ALL.iter().position(|c| *c == self).unwrap_or(0);
        SortColumn::ALL[(idx + 1) % SortColumn::ALL.len()]
    }

    /// The measured variable behind this column, if any.
    pub fn variable(self) -> Option<Variable> {
        match self {
            SortColumn::Temperature => Some(Variable::Temperature),
            SortColumn::Humidity => Some(Variable::Humidity),
            SortColumn::Precipitation => Some(Variable::Precipitation),
            SortColumn::WindSpeed => Some(Variable::WindSpeed),
            SortColumn::Pressure => Some(Variable::Pressure),
            SortColumn::Date | SortColumn::Season => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggle(self) -> SortOrder {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_month_maps_to_exactly_one_season() {
        let expected = [
            Season::Winter,
            Season::Winter,
            Season::Spring,
            Season::Spring,
            Season::Spring,
            Season::Summer,
            Season::Summer,
            Season::Summer,
            Season::Autumn,
            Season::Autumn,
            Season::Autumn,
            Season::Winter,
        ];
        for (i, season) in expected.iter().enumerate() {
            let month = i as u32 + 1;
            assert_eq!(Season::from_month(month), Ok(*season), "month {month}");
        }
    }

    #[test]
    fn out_of_range_month_is_unmapped() {
        assert_eq!(Season::from_month(0), Err(WeatherError::UnmappedSeason(0)));
        assert_eq!(Season::from_month(13), Err(WeatherError::UnmappedSeason(13)));
    }

    #[test]
    fn season_from_date_ignores_year() {
        for year in [1999, 2023, 2024, 2100] {
            let d = NaiveDate::from_ymd_opt(year, 7, 15).unwrap();
            assert_eq!(Season::from_date(d), Ok(Season::Summer));
            assert_eq!(Season::from_date(d), Season::from_date(d));
        }
    }

    #[test]
    fn sort_column_cycles_through_all_columns() {
        let mut col = SortColumn::Date;
        for _ in 0..SortColumn::ALL.len() {
            col = col.next();
        }
        assert_eq!(col, SortColumn::Date);
    }
}
