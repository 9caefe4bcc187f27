//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - daily temperature: `o`
//! - smoothed trend: `-` line

use crate::domain::WeatherSeries;
use crate::report::format_date;

/// Render daily temperature against day index, with an optional trend overlay.
///
/// `trend` holds `(day_index, °C)` pairs as produced by the pipeline.
pub fn render_ascii_plot(
    series: &WeatherSeries,
    trend: Option<&[(f64, f64)]>,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let points: Vec<(f64, f64)> = series
        .observations()
        .iter()
        .enumerate()
        .map(|(i, o)| (i as f64, o.temperature))
        .filter(|(_, t)| t.is_finite())
        .collect();

    let x_max = (series.len().max(2) - 1) as f64;
    let (y_min, y_max) = temperature_window(&points, trend.unwrap_or(&[])).unwrap_or((0.0, 1.0));

    let mut canvas = Canvas::new(width, height, x_max, (y_min, y_max));

    // Trend first so daily points overlay it.
    if let Some(curve) = trend {
        canvas.polyline(curve, '-');
    }
    for &(x, y) in &points {
        canvas.put(x, y, 'o');
    }

    let range = series
        .date_range()
        .map(|(a, b)| format!("{}..{}", format_date(a), format_date(b)))
        .unwrap_or_else(|| "-".to_string());

    let mut out = format!(
        "Plot: {} {range} | temperature=[{y_min:.2}, {y_max:.2}]°C\n",
        series.city()
    );
    canvas.write_rows(&mut out);
    out
}

/// Padded °C window covering points and trend; flat data gets a 1 °C window.
fn temperature_window(points: &[(f64, f64)], trend: &[(f64, f64)]) -> Option<(f64, f64)> {
    let (lo, hi) = points
        .iter()
        .chain(trend)
        .map(|&(_, y)| y)
        .filter(|y| y.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| (lo.min(y), hi.max(y)));

    if !lo.is_finite() {
        return None;
    }
    if hi <= lo {
        return Some((lo - 0.5, lo + 0.5));
    }
    let pad = (hi - lo) * 0.05;
    Some((lo - pad, hi + pad))
}

/// Fixed character grid mapping (day index, °C) onto rows and columns.
struct Canvas {
    cells: Vec<Vec<char>>,
    x_max: f64,
    y_window: (f64, f64),
}

impl Canvas {
    fn new(width: usize, height: usize, x_max: f64, y_window: (f64, f64)) -> Self {
        Self {
            cells: vec![vec![' '; width]; height],
            x_max,
            y_window,
        }
    }

    fn width(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    /// Row 0 is the top of the window.
    fn cell(&self, x: f64, y: f64) -> (usize, usize) {
        let cols = self.width().max(2) as f64 - 1.0;
        let rows = self.cells.len().max(2) as f64 - 1.0;
        let (y_min, y_max) = self.y_window;

        let u = (x / self.x_max).clamp(0.0, 1.0);
        let v = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
        ((rows - v * rows).round() as usize, (u * cols).round() as usize)
    }

    fn put(&mut self, x: f64, y: f64, ch: char) {
        let (row, col) = self.cell(x, y);
        self.cells[row][col] = ch;
    }

    /// Connect consecutive finite points; a missing value breaks the line.
    fn polyline(&mut self, curve: &[(f64, f64)], ch: char) {
        if curve.len() < 2 {
            return;
        }
        let mut prev: Option<(usize, usize)> = None;
        for &(x, y) in curve {
            if !y.is_finite() {
                prev = None;
                continue;
            }
            let here = self.cell(x, y);
            match prev {
                Some(from) => self.segment(from, here, ch),
                None => self.cells[here.0][here.1] = ch,
            }
            prev = Some(here);
        }
    }

    /// Bresenham segment between two cells; only fills blank cells.
    fn segment(&mut self, from: (usize, usize), to: (usize, usize), ch: char) {
        let (mut r, mut c) = (from.0 as isize, from.1 as isize);
        let (r1, c1) = (to.0 as isize, to.1 as isize);

        let dc = (c1 - c).abs();
        let dr = -(r1 - r).abs();
        let step_c = if c < c1 { 1 } else { -1 };
        let step_r = if r < r1 { 1 } else { -1 };
        let mut err = dc + dr;

        loop {
            if let Some(cell) = self
                .cells
                .get_mut(r as usize)
                .and_then(|row| row.get_mut(c as usize))
            {
                if *cell == ' ' {
                    *cell = ch;
                }
            }
            if r == r1 && c == c1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dr {
                err += dr;
                c += step_c;
            }
            if e2 <= dc {
                err += dc;
                r += step_r;
            }
        }
    }

    fn write_rows(&self, out: &mut String) {
        for row in &self.cells {
            out.extend(row.iter());
            out.push('\n');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::test_support::*;

    #[test]
    fn plot_golden_snapshot_small() {
        let series = series_from(day(2024, 1, 1), &[(10.0, 0.0), (20.0, 0.0)]);
        let trend = [(0.0, 10.0), (1.0, 10.0)];

        let txt = render_ascii_plot(&series, Some(&trend), 10, 5);
        let expected = concat!(
            "Plot: Testville 01/01/2024..02/01/2024 | temperature=[9.50, 20.50]°C\n",
            "         o\n",
            "          \n",
            "          \n",
            "          \n",
            "o---------\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn flat_series_still_renders() {
        let series = series_from(day(2024, 1, 1), &[(5.0, 0.0); 4]);
        let txt = render_ascii_plot(&series, None, 12, 6);
        assert_eq!(txt.lines().count(), 7);
        assert!(txt.contains('o'));
    }
}
