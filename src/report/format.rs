//! Formatted terminal output: metric cards, grouped tables and text reports.
//!
//! Values are kept at full precision by the aggregation layer and rounded to
//! one decimal here, at presentation time. Dates use `DD/MM/YYYY`.

use chrono::NaiveDate;

use crate::aggregate::{
    DashboardSummary, DescriptiveStats, PrecipitationExtremes, RAINY_DAY_THRESHOLD_MM, RAIN_DAY_THRESHOLD_MM,
    SeasonSummary, TemperatureExtremes,
};
use crate::domain::{DailyObservation, SortColumn, SortOrder, WeatherSeries};
use crate::report::table::TablePage;

pub const DATE_FORMAT: &str = "%d/%m/%Y";

pub const TABLE_HEADERS: [&str; 8] = [
    "Date",
    "City",
    "Temp (°C)",
    "Humidity (%)",
    "Precip (mm)",
    "Wind (km/h)",
    "Pressure (hPa)",
    "Season",
];

pub const SEASON_TEMPERATURE_HEADERS: [&str; 5] = ["Season", "Mean (°C)", "Min (°C)", "Max (°C)", "SD (°C)"];

pub const SEASON_RAIN_HEADERS: [&str; 4] = ["Season", "Rain days", "Total (mm)", "Max (mm)"];

/// A labelled scalar shown at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricCard {
    pub label: &'static str,
    pub value: String,
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// One decimal, or `NA` for a missing value.
pub fn fmt1(v: f64) -> String {
    if v.is_finite() { format!("{v:.1}") } else { "NA".to_string() }
}

pub fn metric_cards(summary: &DashboardSummary) -> [MetricCard; 4] {
    [
        MetricCard {
            label: "Mean temperature",
            value: format!("{} °C", fmt1(summary.mean_temperature)),
        },
        MetricCard {
            label: "Total precipitation",
            value: format!("{} mm", fmt1(summary.total_precipitation)),
        },
        MetricCard {
            label: "Max wind speed",
            value: format!("{} km/h", fmt1(summary.max_wind_speed)),
        },
        MetricCard {
            label: "Mean humidity",
            value: format!("{} %", fmt1(summary.mean_humidity)),
        },
    ]
}

pub fn format_temperature_extremes(ext: &TemperatureExtremes) -> String {
    format!(
        "Minimum temperature: {} °C on {}\nMaximum temperature: {} °C on {}",
        fmt1(ext.min_value),
        format_date(ext.min_date),
        fmt1(ext.max_value),
        format_date(ext.max_date),
    )
}

pub fn format_precipitation_extremes(ext: &PrecipitationExtremes) -> String {
    format!(
        "Maximum precipitation: {} mm on {}\nRainy days (> {RAINY_DAY_THRESHOLD_MM} mm): {}",
        fmt1(ext.max_value),
        format_date(ext.max_date),
        ext.rainy_day_count,
    )
}

pub fn format_descriptive(stats: &DescriptiveStats) -> String {
    let rows = [
        ("Min", stats.min),
        ("1st Qu.", stats.q1),
        ("Median", stats.median),
        ("Mean", stats.mean),
        ("3rd Qu.", stats.q3),
        ("Max", stats.max),
    ];

    let mut out = format!(
        "{} ({}), n = {}",
        stats.variable.display_name(),
        stats.variable.unit(),
        stats.n
    );
    for (label, v) in rows {
        out.push_str(&format!("\n  {label:<8}: {}", fmt1(v)));
    }
    out
}

pub fn season_temperature_cells(rows: &[SeasonSummary]) -> Vec<[String; 5]> {
    rows.iter()
        .map(|r| {
            [
                r.season.display_name().to_string(),
                fmt1(r.temperature.mean),
                fmt1(r.temperature.min),
                fmt1(r.temperature.max),
                r.temperature.sd.map(fmt1).unwrap_or_else(|| "NA".to_string()),
            ]
        })
        .collect()
}

pub fn season_rain_cells(rows: &[SeasonSummary]) -> Vec<[String; 4]> {
    rows.iter()
        .map(|r| {
            [
                r.season.display_name().to_string(),
                r.rain.rain_days.to_string(),
                fmt1(r.rain.total),
                fmt1(r.rain.max),
            ]
        })
        .collect()
}

pub fn observation_cells(obs: &DailyObservation) -> [String; 8] {
    [
        format_date(obs.date),
        obs.city.clone(),
        fmt1(obs.temperature),
        fmt1(obs.humidity),
        fmt1(obs.precipitation),
        fmt1(obs.wind_speed),
        fmt1(obs.pressure),
        obs.season.display_name().to_string(),
    ]
}

/// Render a page of the data table as aligned text.
pub fn format_table_page(page: &TablePage<'_>, column: SortColumn, order: SortOrder) -> String {
    let body: Vec<[String; 8]> = page.rows.iter().map(|o| observation_cells(o)).collect();

    let mut out = format!(
        "Page {}/{} | {} rows | sorted by {} ({})\n",
        page.page + 1,
        page.page_count,
        page.total_rows,
        column.display_name(),
        match order {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        },
    );
    out.push_str(&format_text_table(&TABLE_HEADERS, &body));
    out
}

/// Dashboard summary as plain text: metric cards, grouped tables, reports.
pub fn format_summary_report(series: &WeatherSeries, summary: &DashboardSummary) -> String {
    let mut out = String::new();

    out.push_str("=== wxdash - synthetic weather ===\n");
    out.push_str(&format!("City: {}\n", series.city()));
    if let Some((start, end)) = series.date_range() {
        out.push_str(&format!(
            "Range: {} - {} ({} days)\n",
            format_date(start),
            format_date(end),
            series.len()
        ));
    }

    out.push('\n');
    for card in metric_cards(summary) {
        out.push_str(&format!("{:<20} {}\n", card.label, card.value));
    }

    out.push_str("\nTemperature by season:\n");
    out.push_str(&format_text_table(
        &SEASON_TEMPERATURE_HEADERS,
        &season_temperature_cells(&summary.seasons),
    ));

    out.push_str(&format!("\nRain days by season (> {RAIN_DAY_THRESHOLD_MM} mm):\n"));
    out.push_str(&format_text_table(&SEASON_RAIN_HEADERS, &season_rain_cells(&summary.seasons)));

    out.push_str("\nTemperature extremes:\n");
    out.push_str(&format_temperature_extremes(&summary.temperature_extremes));
    out.push_str("\n\nPrecipitation extremes:\n");
    out.push_str(&format_precipitation_extremes(&summary.precipitation_extremes));
    out.push_str("\n\n");
    out.push_str(&format_descriptive(&summary.temperature_stats));
    out.push_str("\n\n");
    out.push_str(&format_descriptive(&summary.precipitation_stats));
    out.push('\n');

    out
}

fn format_text_table<const N: usize>(headers: &[&str; N], rows: &[[String; N]]) -> String {
    let mut widths: [usize; N] = std::array::from_fn(|i| headers[i].chars().count());
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

    let mut out = String::new();
    push_row(&mut out, headers.as_slice(), &widths);
    push_row(&mut out, rule.as_slice(), &widths);
    for row in rows {
        push_row(&mut out, row.as_slice(), &widths);
    }
    out
}

fn push_row<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(c, &w)| format!("{:<w$}", c.as_ref()))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::test_support::*;
    use crate::aggregate::{precipitation_extremes, season_summaries, summarize, temperature_extremes};

    #[test]
    fn dates_use_day_month_year() {
        assert_eq!(format_date(day(2024, 1, 3)), "03/01/2024");
    }

    #[test]
    fn missing_values_render_as_na() {
        assert_eq!(fmt1(f64::NAN), "NA");
        assert_eq!(fmt1(2.26), "2.3");
        assert_eq!(fmt1(1013.0), "1013.0");
    }

    #[test]
    fn extremes_reports() {
        let series = series_from(day(2024, 1, 1), &[(-2.0, 0.0), (7.5, 3.3), (1.0, 0.2)]);
        let t = format_temperature_extremes(&temperature_extremes(&series).unwrap());
        assert_eq!(
            t,
            "Minimum temperature: -2.0 °C on 01/01/2024\nMaximum temperature: 7.5 °C on 02/01/2024"
        );

        let p = format_precipitation_extremes(&precipitation_extremes(&series).unwrap());
        assert_eq!(p, "Maximum precipitation: 3.3 mm on 02/01/2024\nRainy days (> 0.1 mm): 2");
    }

    #[test]
    fn season_tables_have_one_row_per_season() {
        let series = series_from(day(2024, 2, 28), &[(1.0, 2.0), (2.0, 0.0), (9.0, 5.0)]);
        let rows = season_summaries(&series).unwrap();
        let temp = season_temperature_cells(&rows);
        assert_eq!(temp.len(), 2);
        assert_eq!(temp[0][0], "Winter");
        assert_eq!(temp[1], ["Spring", "9.0", "9.0", "9.0", "NA"].map(String::from));

        let rain = season_rain_cells(&rows);
        assert_eq!(rain[0], ["Winter", "1", "2.0", "2.0"].map(String::from));
    }

    #[test]
    fn text_table_is_aligned() {
        let txt = format_text_table(&["a", "bbb"], &[["xx".to_string(), "y".to_string()]]);
        assert_eq!(txt, "a   bbb\n--  ---\nxx  y\n");
    }

    #[test]
    fn summary_report_mentions_each_section() {
        let series = series_from(day(2024, 1, 1), &[(1.0, 0.0), (2.0, 1.5), (3.0, 0.0)]);
        let summary = summarize(&series).unwrap();
        let txt = format_summary_report(&series, &summary);
        assert!(txt.contains("City: Testville"));
        assert!(txt.contains("Range: 01/01/2024 - 03/01/2024 (3 days)"));
        assert!(txt.contains("Mean temperature     2.0 °C"));
        assert!(txt.contains("Temperature by season:"));
        assert!(txt.contains("Rain days by season (> 1 mm):"));
        assert!(txt.contains("Temperature (°C), n = 3"));
        assert!(txt.contains("Precipitation (mm), n = 3"));
    }
}
