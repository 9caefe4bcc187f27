//! Export the data table to CSV.
//!
//! The export mirrors the dashboard table (dates as `DD/MM/YYYY`) so it can be
//! opened directly in a spreadsheet.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::info;
use serde::Serialize;

use crate::domain::{Season, WeatherSeries};
use crate::error::AppError;
use crate::report::format_date;

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    date: String,
    city: &'a str,
    temperature: f64,
    humidity: f64,
    precipitation: f64,
    wind_speed: f64,
    pressure: f64,
    season: Season,
}

/// Write the series to a CSV file at `path`.
pub fn write_series_csv(path: &Path, series: &WeatherSeries) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_series(file, series)?;
    info!("exported {} rows to {}", series.len(), path.display());
    Ok(())
}

/// Write the series as CSV to any writer.
pub fn write_series<W: Write>(writer: W, series: &WeatherSeries) -> Result<(), AppError> {
    let mut csv = csv::Writer::from_writer(writer);
    for obs in series.observations() {
        csv.serialize(ExportRow {
            date: format_date(obs.date),
            city: &obs.city,
            temperature: obs.temperature,
            humidity: obs.humidity,
            precipitation: obs.precipitation,
            wind_speed: obs.wind_speed,
            pressure: obs.pressure,
            season: obs.season,
        })
        .map_err(|e| AppError::new(4, format!("Failed to write export CSV row: {e}")))?;
    }
    csv.flush()
        .map_err(|e| AppError::new(4, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::test_support::*;

    #[test]
    fn csv_has_header_and_one_row_per_day() {
        let series = series_from(day(2024, 3, 1), &[(4.5, 0.0), (6.0, 1.2)]);
        let mut buf = Vec::new();
        write_series(&mut buf, &series).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "date,city,temperature,humidity,precipitation,wind_speed,pressure,season"
        );
        assert_eq!(lines[1], "01/03/2024,Testville,4.5,50.0,0.0,10.0,1013.0,Spring");
        assert_eq!(lines.len(), 3);
    }
}
