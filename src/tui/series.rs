//! Chart data preparation.
//!
//! All series and bounds are computed here, outside the render calls, so the
//! widgets only draw and the shaping logic can be unit tested.

use chrono::{Days, NaiveDate};

use crate::aggregate::quantile_sorted;
use crate::app::pipeline::DashboardRun;
use crate::domain::{Season, Variable, WeatherSeries};

/// Fraction of the data span added above and below each axis.
const AXIS_PAD: f64 = 0.05;

/// Daily temperature with its smoothed trend.
#[derive(Debug, Clone)]
pub struct TemperatureView {
    pub daily: Vec<(f64, f64)>,
    pub trend: Vec<(f64, f64)>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

/// Two variables sharing the day axis, the right one mapped into the left
/// axis range so both can be drawn on one set of coordinates.
#[derive(Debug, Clone)]
pub struct DualAxisView {
    pub left: Vec<(f64, f64)>,
    pub right_scaled: Vec<(f64, f64)>,
    pub x_bounds: [f64; 2],
    pub left_bounds: [f64; 2],
    pub right_bounds: [f64; 2],
}

/// Box-and-jitter data for one season.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonBox {
    pub season: Season,
    /// Horizontal slot (0, 1, ...) of this season in the chart.
    pub position: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub points: Vec<(f64, f64)>,
}

pub fn temperature_view(run: &DashboardRun) -> TemperatureView {
    let daily = variable_points(&run.series, Variable::Temperature);
    let trend = run.trend.clone().unwrap_or_default();
    let y_bounds = padded_bounds(daily.iter().chain(&trend).map(|&(_, y)| y), [0.0, 1.0]);

    TemperatureView {
        daily,
        trend,
        x_bounds: day_bounds(&run.series),
        y_bounds,
    }
}

/// Build a dual-axis view; with `left_from_zero` the left axis starts at 0
/// (used for bar charts).
pub fn dual_axis_view(series: &WeatherSeries, left: Variable, right: Variable, left_from_zero: bool) -> DualAxisView {
    let left_points = variable_points(series, left);
    let right_points = variable_points(series, right);

    let mut left_bounds = padded_bounds(left_points.iter().map(|&(_, y)| y), [0.0, 1.0]);
    if left_from_zero {
        left_bounds[0] = 0.0;
    }
    let right_bounds = padded_bounds(right_points.iter().map(|&(_, y)| y), [0.0, 1.0]);

    let right_scaled = right_points
        .iter()
        .map(|&(x, y)| (x, rescale(y, right_bounds, left_bounds)))
        .collect();

    DualAxisView {
        left: left_points,
        right_scaled,
        x_bounds: day_bounds(series),
        left_bounds,
        right_bounds,
    }
}

/// Temperature distribution per season present, in calendar order.
pub fn season_boxes(series: &WeatherSeries) -> Vec<SeasonBox> {
    let mut out = Vec::new();
    for season in Season::ALL {
        let points: Vec<(usize, f64)> = series
            .observations()
            .iter()
            .enumerate()
            .filter(|(_, o)| o.season == season && o.temperature.is_finite())
            .map(|(i, o)| (i, o.temperature))
            .collect();
        if points.is_empty() {
            continue;
        }

        let mut sorted: Vec<f64> = points.iter().map(|&(_, t)| t).collect();
        sorted.sort_by(f64::total_cmp);

        let position = out.len() as f64;
        out.push(SeasonBox {
            season,
            position,
            min: sorted[0],
            q1: quantile_sorted(&sorted, 0.25),
            median: quantile_sorted(&sorted, 0.5),
            q3: quantile_sorted(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
            points: points.iter().map(|&(i, t)| (position + jitter(i), t)).collect(),
        });
    }
    out
}

/// Y bounds covering every box.
pub fn season_box_bounds(boxes: &[SeasonBox]) -> [f64; 2] {
    padded_bounds(boxes.iter().flat_map(|b| [b.min, b.max]), [0.0, 1.0])
}

/// Deterministic horizontal offset in `[-0.25, 0.25)` for a day index.
///
/// Derived from the index so points don't move between redraws.
pub fn jitter(day_index: usize) -> f64 {
    const SLOTS: usize = 61;
    let slot = (day_index.wrapping_mul(7919)) % SLOTS;
    (slot as f64 / SLOTS as f64 - 0.5) * 0.5
}

/// Linear map of `v` from `from` onto `to`.
pub fn rescale(v: f64, from: [f64; 2], to: [f64; 2]) -> f64 {
    let span = from[1] - from[0];
    if span.abs() < 1e-12 {
        return (to[0] + to[1]) / 2.0;
    }
    to[0] + (v - from[0]) / span * (to[1] - to[0])
}

/// `(day_index, value)` pairs for the non-missing values of `variable`.
pub fn variable_points(series: &WeatherSeries, variable: Variable) -> Vec<(f64, f64)> {
    series
        .values(variable)
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .map(|(i, v)| (i as f64, v))
        .collect()
}

/// Short `DD/MM` label for a day index counted from `origin`.
pub fn day_label(origin: NaiveDate, day_index: f64) -> String {
    if !day_index.is_finite() || day_index < 0.0 {
        return String::new();
    }
    origin
        .checked_add_days(Days::new(day_index.round() as u64))
        .map(|d| d.format("%d/%m").to_string())
        .unwrap_or_default()
}

fn day_bounds(series: &WeatherSeries) -> [f64; 2] {
    let last = series.len().saturating_sub(1).max(1) as f64;
    [0.0, last]
}

fn padded_bounds(values: impl Iterator<Item = f64>, fallback: [f64; 2]) -> [f64; 2] {
    let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
    for v in values.filter(|v| v.is_finite()) {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if !lo.is_finite() || !hi.is_finite() {
        return fallback;
    }
    if hi <= lo {
        return [lo - 0.5, hi + 0.5];
    }
    let pad = (hi - lo) * AXIS_PAD;
    [lo - pad, hi + pad]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::test_support::*;

    #[test]
    fn rescale_maps_endpoints() {
        assert_eq!(rescale(0.0, [0.0, 100.0], [0.0, 10.0]), 0.0);
        assert_eq!(rescale(100.0, [0.0, 100.0], [0.0, 10.0]), 10.0);
        assert_eq!(rescale(50.0, [0.0, 100.0], [2.0, 4.0]), 3.0);
        assert_eq!(rescale(7.0, [7.0, 7.0], [2.0, 4.0]), 3.0);
    }

    #[test]
    fn jitter_is_deterministic_and_bounded() {
        for i in 0..1000 {
            let j = jitter(i);
            assert_eq!(j, jitter(i));
            assert!((-0.25..0.25).contains(&j), "jitter({i}) = {j}");
        }
    }

    #[test]
    fn dual_axis_right_series_fits_left_bounds() {
        let series = series_from(day(2024, 1, 1), &[(0.0, 0.0), (0.0, 2.0), (0.0, 8.0)]);
        let view = dual_axis_view(&series, Variable::Precipitation, Variable::Pressure, true);
        assert_eq!(view.left_bounds[0], 0.0);
        for &(_, y) in &view.right_scaled {
            assert!(y >= view.left_bounds[0] && y <= view.left_bounds[1]);
        }
        assert_eq!(view.x_bounds, [0.0, 2.0]);
    }

    #[test]
    fn boxes_only_for_present_seasons() {
        // Feb 27 .. Mar 3 (2024 is a leap year): 3 winter days, 3 spring days.
        let series = series_from(
            day(2024, 2, 27),
            &[(1.0, 0.0), (2.0, 0.0), (3.0, 0.0), (10.0, 0.0), (20.0, 0.0), (30.0, 0.0)],
        );
        let boxes = season_boxes(&series);
        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[0].season, Season::Winter);
        assert_eq!(boxes[0].median, 2.0);
        assert_eq!(boxes[1].season, Season::Spring);
        assert_eq!(boxes[1].position, 1.0);
        assert_eq!((boxes[1].q1, boxes[1].q3), (15.0, 25.0));
        assert!(boxes[1].points.iter().all(|&(x, _)| (x - 1.0).abs() <= 0.25));
    }

    #[test]
    fn day_labels_count_from_origin() {
        let origin = day(2024, 12, 30);
        assert_eq!(day_label(origin, 0.0), "30/12");
        assert_eq!(day_label(origin, 2.0), "01/01");
        assert_eq!(day_label(origin, -1.0), "");
    }
}
