//! Plotters-powered chart widgets for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.
//! Every widget is render-only: series and bounds come precomputed from
//! [`super::series`].

use chrono::NaiveDate;
use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use crate::tui::series::{SeasonBox, day_label};

const CYAN: RGBColor = RGBColor(0, 255, 255);
const GREEN: RGBColor = RGBColor(0, 255, 0);
const YELLOW: RGBColor = RGBColor(255, 255, 0);
const MAGENTA: RGBColor = RGBColor(255, 0, 255);
const BLUE: RGBColor = RGBColor(80, 160, 255);

/// Returns `true` (after drawing a hint) when `area` can't hold a chart.
fn too_small(area: Rect, buf: &mut Buffer) -> bool {
    if area.width < 20 || area.height < 8 {
        buf.set_string(
            area.x,
            area.y,
            "Chart area too small (resize terminal).",
            Style::default().fg(ratatui::style::Color::Yellow),
        );
        return true;
    }
    false
}

fn valid_bounds(x: [f64; 2], y: [f64; 2]) -> bool {
    x.iter().chain(&y).all(|v| v.is_finite()) && x[1] > x[0] && y[1] > y[0]
}

/// Daily temperature line with the smoothed trend on top.
pub struct TemperatureChart<'a> {
    pub daily: &'a [(f64, f64)],
    pub trend: &'a [(f64, f64)],
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    /// Date of day index 0, for x tick labels.
    pub origin: NaiveDate,
}

impl<'a> Widget for TemperatureChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if too_small(area, buf) || !valid_bounds(self.x_bounds, self.y_bounds) {
            return;
        }
        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        let origin = self.origin;

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc("date")
                .y_desc("°C")
                .x_labels(6)
                .y_labels(5)
                .x_label_formatter(&|v| day_label(origin, *v))
                .y_label_formatter(&|v| format!("{v:.0}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            chart.draw_series(LineSeries::new(self.daily.iter().copied(), &WHITE))?;
            chart.draw_series(LineSeries::new(self.trend.iter().copied(), &CYAN))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// How the left-axis series of a [`DualAxisChart`] is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeftSeries {
    Bars,
    Line,
}

/// Two series on a shared day axis.
///
/// `right` must already be rescaled into `y_bounds`; the right-hand tick
/// labels are drawn by the caller.
pub struct DualAxisChart<'a> {
    pub left: &'a [(f64, f64)],
    pub left_kind: LeftSeries,
    pub right: &'a [(f64, f64)],
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub y_label: &'a str,
    pub origin: NaiveDate,
}

impl<'a> Widget for DualAxisChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if too_small(area, buf) || !valid_bounds(self.x_bounds, self.y_bounds) {
            return;
        }
        // Bars extend half a day either side of their index.
        let [x0, x1] = [self.x_bounds[0] - 0.5, self.x_bounds[1] + 0.5];
        let [y0, y1] = self.y_bounds;
        let origin = self.origin;

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc("date")
                .y_desc(self.y_label)
                .x_labels(6)
                .y_labels(5)
                .x_label_formatter(&|v| day_label(origin, *v))
                .y_label_formatter(&|v| format!("{v:.0}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            match self.left_kind {
                LeftSeries::Bars => {
                    let base = y0.max(0.0);
                    chart.draw_series(
                        self.left
                            .iter()
                            .map(|&(x, y)| Rectangle::new([(x - 0.4, base), (x + 0.4, y)], BLUE.filled())),
                    )?;
                }
                LeftSeries::Line => {
                    chart.draw_series(LineSeries::new(self.left.iter().copied(), &GREEN))?;
                }
            }
            chart.draw_series(LineSeries::new(self.right.iter().copied(), &YELLOW))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// Per-season box plot with jittered daily points.
pub struct SeasonBoxChart<'a> {
    pub boxes: &'a [SeasonBox],
    pub y_bounds: [f64; 2],
}

impl<'a> Widget for SeasonBoxChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let x_bounds = [-0.5, self.boxes.len() as f64 - 0.5];
        if self.boxes.is_empty() || too_small(area, buf) || !valid_bounds(x_bounds, self.y_bounds) {
            return;
        }
        let [x0, x1] = x_bounds;
        let [y0, y1] = self.y_bounds;
        let boxes = self.boxes;

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .y_desc("°C")
                .x_labels(boxes.len() * 2 + 1)
                .y_labels(5)
                .x_label_formatter(&|v| season_tick(boxes, *v))
                .y_label_formatter(&|v| format!("{v:.0}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            // Jittered points go underneath the box outlines.
            chart.draw_series(
                boxes
                    .iter()
                    .flat_map(|b| b.points.iter())
                    .map(|&(x, y)| Pixel::new((x, y), WHITE)),
            )?;

            for b in boxes {
                let (l, r, x) = (b.position - 0.3, b.position + 0.3, b.position);
                chart.draw_series(std::iter::once(Rectangle::new(
                    [(l, b.q1), (r, b.q3)],
                    MAGENTA.stroke_width(1),
                )))?;
                chart.draw_series([
                    PathElement::new(vec![(l, b.median), (r, b.median)], CYAN.stroke_width(1)),
                    PathElement::new(vec![(x, b.min), (x, b.q1)], MAGENTA.stroke_width(1)),
                    PathElement::new(vec![(x, b.q3), (x, b.max)], MAGENTA.stroke_width(1)),
                ])?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// Season name at integer slots, blank elsewhere.
fn season_tick(boxes: &[SeasonBox], v: f64) -> String {
    let slot = v.round();
    if (v - slot).abs() > 0.05 || slot < 0.0 {
        return String::new();
    }
    boxes
        .get(slot as usize)
        .map(|b| b.season.display_name().to_string())
        .unwrap_or_default()
}
