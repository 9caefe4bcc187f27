//! Ratatui-based terminal UI.
//!
//! The TUI provides a settings panel for choosing a city and date range,
//! then renders metric cards, charts, seasonal tables, the daily data table
//! and text reports from one generated series.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::warn;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table, Tabs, Wrap},
};

use crate::app::pipeline::{DashboardRun, run_dashboard};
use crate::config::DashboardConfig;
use crate::domain::{SortColumn, SortOrder, Variable};
use crate::error::AppError;
use crate::report::{
    SEASON_RAIN_HEADERS, SEASON_TEMPERATURE_HEADERS, TABLE_HEADERS, format_descriptive, format_precipitation_extremes,
    format_temperature_extremes, metric_cards, observation_cells, paginate, season_rain_cells,
    season_temperature_cells, sorted_rows,
};

mod charts;
pub mod series;

use charts::{DualAxisChart, LeftSeries, SeasonBoxChart, TemperatureChart};

/// Start the TUI.
pub fn run(config: DashboardConfig) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(config);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Overview,
    Precipitation,
    WindPressure,
    Seasons,
    Data,
    Reports,
}

impl Tab {
    const ALL: [Tab; 6] = [
        Tab::Overview,
        Tab::Precipitation,
        Tab::WindPressure,
        Tab::Seasons,
        Tab::Data,
        Tab::Reports,
    ];

    fn title(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Precipitation => "Precipitation",
            Tab::WindPressure => "Wind & Pressure",
            Tab::Seasons => "Seasons",
            Tab::Data => "Data",
            Tab::Reports => "Reports",
        }
    }

    fn index(self) -> usize {
        Tab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    fn prev(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// Settings rows: city, start date, end date.
const FIELD_CITY: usize = 0;
const FIELD_START: usize = 1;
const FIELD_END: usize = 2;

struct App {
    config: DashboardConfig,
    selected_field: usize,
    editing_date: bool,
    date_input: String,
    tab: Tab,
    sort: SortColumn,
    order: SortOrder,
    page: usize,
    status: String,
    run: Option<DashboardRun>,
    error: Option<String>,
}

impl App {
    fn new(config: DashboardConfig) -> Self {
        let mut app = Self {
            config,
            selected_field: FIELD_CITY,
            editing_date: false,
            date_input: String::new(),
            tab: Tab::Overview,
            sort: SortColumn::Date,
            order: SortOrder::Asc,
            page: 0,
            status: String::new(),
            run: None,
            error: None,
        };
        app.regenerate();
        app
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing_date {
            self.handle_date_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Tab => self.tab = self.tab.next(),
            KeyCode::BackTab => self.tab = self.tab.prev(),
            KeyCode::Up => self.selected_field = self.selected_field.saturating_sub(1),
            KeyCode::Down => self.selected_field = (self.selected_field + 1).min(FIELD_END),
            KeyCode::Left | KeyCode::Right if self.selected_field == FIELD_CITY => {
                if code == KeyCode::Right {
                    self.config.next_city();
                } else {
                    self.config.prev_city();
                }
                self.regenerate();
            }
            KeyCode::Enter if self.selected_field != FIELD_CITY => {
                self.editing_date = true;
                self.date_input = match self.selected_field {
                    FIELD_START => self.config.start,
                    _ => self.config.end,
                }
                .to_string();
                self.status = "Editing date (YYYY-MM-DD). Enter to apply, Esc to cancel.".to_string();
            }
            KeyCode::Char('g') => {
                if let Some(seed) = self.config.seed.as_mut() {
                    *seed = seed.wrapping_add(1);
                }
                self.regenerate();
            }
            KeyCode::Char('s') => {
                self.sort = self.sort.next();
                self.page = 0;
                self.status = format!("sort: {}", self.sort.display_name());
            }
            KeyCode::Char('S') => {
                self.order = self.order.toggle();
                self.page = 0;
            }
            KeyCode::PageDown | KeyCode::Char('n') => self.page = (self.page + 1).min(self.last_page()),
            KeyCode::PageUp | KeyCode::Char('p') => self.page = self.page.saturating_sub(1),
            KeyCode::Char('e') => self.export(),
            _ => {}
        }

        false
    }

    /// Zero-based index of the last data table page.
    fn last_page(&self) -> usize {
        let rows = self.run.as_ref().map_or(0, |run| run.series.len());
        rows.div_ceil(self.config.page_size.max(1)).saturating_sub(1)
    }

    fn handle_date_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.editing_date = false;
                self.status = "Date edit canceled.".to_string();
            }
            KeyCode::Enter => {
                self.editing_date = false;
                self.apply_date_input();
            }
            KeyCode::Backspace => {
                self.date_input.pop();
            }
            KeyCode::Char(c) => {
                if c.is_ascii_digit() || c == '-' {
                    self.date_input.push(c);
                }
            }
            _ => {}
        }
    }

    fn apply_date_input(&mut self) {
        let trimmed = self.date_input.trim();
        let date = match chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            Ok(date) => date,
            Err(e) => {
                self.status = format!("Invalid date '{trimmed}': {e}");
                return;
            }
        };
        if self.selected_field == FIELD_START {
            self.config.start = date;
        } else {
            self.config.end = date;
        }
        self.regenerate();
    }

    /// Replace the current run with a freshly generated one.
    ///
    /// On failure the previous run is dropped so no panel shows stale data.
    fn regenerate(&mut self) {
        let request = self.config.request();
        match run_dashboard(&request) {
            Ok(run) => {
                self.status = format!(
                    "Generated {} days for {} ({} - {}).",
                    run.series.len(),
                    request.city,
                    request.start,
                    request.end
                );
                self.run = Some(run);
                self.error = None;
                self.page = 0;
            }
            Err(err) => {
                warn!("generation failed: {err}");
                self.run = None;
                self.status = format!("Generation failed: {err}");
                self.error = Some(err.to_string());
            }
        }
    }

    fn export(&mut self) {
        let Some(run) = &self.run else {
            self.status = "Nothing to export.".to_string();
            return;
        };
        let path = export_path(&run.request.city, run.request.start, run.request.end);
        self.status = match crate::io::export::write_series_csv(&path, &run.series) {
            Ok(()) => format!("Exported {}", path.display()),
            Err(err) => format!("Export failed: {err}"),
        };
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(5),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_settings(frame, chunks[2]);
        self.draw_footer(frame, chunks[3]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let titles: Vec<Line> = Tab::ALL.iter().map(|t| Line::from(t.title())).collect();
        let tabs = Tabs::new(titles)
            .select(self.tab.index())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled("wxdash", Style::default().fg(Color::Cyan))),
            )
            .style(Style::default().fg(Color::Gray))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White));
        frame.render_widget(tabs, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let Some(run) = &self.run else {
            self.draw_empty_state(frame, area);
            return;
        };

        match self.tab {
            Tab::Overview => self.draw_overview(frame, area, run),
            Tab::Precipitation => self.draw_precipitation(frame, area, run),
            Tab::WindPressure => self.draw_wind_pressure(frame, area, run),
            Tab::Seasons => self.draw_seasons(frame, area, run),
            Tab::Data => self.draw_data(frame, area, run),
            Tab::Reports => self.draw_reports(frame, area, run),
        }
    }

    fn draw_empty_state(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title(self.tab.title()).borders(Borders::ALL);
        let (msg, color) = match &self.error {
            Some(err) => (format!("No data: {err}"), Color::Red),
            None => ("Waiting for data...".to_string(), Color::Yellow),
        };
        let p = Paragraph::new(msg)
            .style(Style::default().fg(color))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(p, area);
    }

    fn draw_overview(&self, frame: &mut ratatui::Frame<'_>, area: Rect, run: &DashboardRun) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0)])
            .split(area);

        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(chunks[0]);
        for (card, rect) in metric_cards(&run.summary).iter().zip(cards.iter()) {
            let p = Paragraph::new(Span::styled(
                card.value.clone(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center)
            .block(Block::default().title(card.label).borders(Borders::ALL));
            frame.render_widget(p, *rect);
        }

        let block = Block::default()
            .title("Temperature (daily + trend)")
            .borders(Borders::ALL);
        let inner = block.inner(chunks[1]);
        frame.render_widget(block, chunks[1]);
        frame.render_widget(Clear, inner);

        let view = series::temperature_view(run);
        frame.render_widget(
            TemperatureChart {
                daily: &view.daily,
                trend: &view.trend,
                x_bounds: view.x_bounds,
                y_bounds: view.y_bounds,
                origin: run.request.start,
            },
            inner,
        );
    }

    fn draw_precipitation(&self, frame: &mut ratatui::Frame<'_>, area: Rect, run: &DashboardRun) {
        let view = series::dual_axis_view(&run.series, Variable::Precipitation, Variable::Humidity, true);
        draw_dual_axis(
            frame,
            area,
            "Precipitation (bars, mm) / Humidity (line, %)",
            &view,
            LeftSeries::Bars,
            "mm",
            "%",
            run.request.start,
        );
    }

    fn draw_wind_pressure(&self, frame: &mut ratatui::Frame<'_>, area: Rect, run: &DashboardRun) {
        let view = series::dual_axis_view(&run.series, Variable::WindSpeed, Variable::Pressure, false);
        draw_dual_axis(
            frame,
            area,
            "Wind speed (green, km/h) / Pressure (yellow, hPa)",
            &view,
            LeftSeries::Line,
            "km/h",
            "hPa",
            run.request.start,
        );
    }

    fn draw_seasons(&self, frame: &mut ratatui::Frame<'_>, area: Rect, run: &DashboardRun) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        let block = Block::default()
            .title("Temperature by season")
            .borders(Borders::ALL);
        let inner = block.inner(chunks[0]);
        frame.render_widget(block, chunks[0]);
        frame.render_widget(Clear, inner);

        let boxes = series::season_boxes(&run.series);
        frame.render_widget(
            SeasonBoxChart {
                boxes: &boxes,
                y_bounds: series::season_box_bounds(&boxes),
            },
            inner,
        );

        let tables = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);

        let header_style = Style::default().add_modifier(Modifier::BOLD);

        let temp_rows = season_temperature_cells(&run.summary.seasons).into_iter().map(Row::new);
        let temp_widths = [
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Length(9),
            Constraint::Length(9),
            Constraint::Length(8),
        ];
        let temp = Table::new(temp_rows, temp_widths)
            .header(Row::new(SEASON_TEMPERATURE_HEADERS).style(header_style))
            .block(Block::default().title("Temperature statistics").borders(Borders::ALL));
        frame.render_widget(temp, tables[0]);

        let rain_rows = season_rain_cells(&run.summary.seasons).into_iter().map(Row::new);
        let rain_widths = [
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Length(11),
            Constraint::Length(9),
        ];
        let rain = Table::new(rain_rows, rain_widths)
            .header(Row::new(SEASON_RAIN_HEADERS).style(header_style))
            .block(Block::default().title("Rain days (> 1 mm)").borders(Borders::ALL));
        frame.render_widget(rain, tables[1]);
    }

    fn draw_data(&self, frame: &mut ratatui::Frame<'_>, area: Rect, run: &DashboardRun) {
        let rows = sorted_rows(&run.series, self.sort, self.order);
        let page = paginate(&rows, self.page, self.config.page_size);

        let arrow = match self.order {
            SortOrder::Asc => "▲",
            SortOrder::Desc => "▼",
        };
        let sort_idx = sort_header_index(self.sort);
        let header = Row::new(TABLE_HEADERS.iter().enumerate().map(|(i, h)| {
            if i == sort_idx {
                Cell::from(format!("{h} {arrow}")).style(Style::default().fg(Color::Yellow))
            } else {
                Cell::from(*h)
            }
        }))
        .style(Style::default().add_modifier(Modifier::BOLD));

        let body = page.rows.iter().map(|o| Row::new(observation_cells(o)));
        let widths = [
            Constraint::Length(11),
            Constraint::Length(12),
            Constraint::Length(11),
            Constraint::Length(14),
            Constraint::Length(13),
            Constraint::Length(13),
            Constraint::Length(16),
            Constraint::Length(8),
        ];
        let title = format!(
            "Data | page {}/{} | {} rows | sort: {} {arrow}",
            page.page + 1,
            page.page_count,
            page.total_rows,
            self.sort.display_name(),
        );
        let table = Table::new(body, widths)
            .header(header)
            .block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(table, area);
    }

    fn draw_reports(&self, frame: &mut ratatui::Frame<'_>, area: Rect, run: &DashboardRun) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(area);
        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[0]);
        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);

        let summary = &run.summary;
        let reports = [
            ("Temperature extremes", format_temperature_extremes(&summary.temperature_extremes), top[0]),
            ("Precipitation extremes", format_precipitation_extremes(&summary.precipitation_extremes), top[1]),
            ("Temperature summary", format_descriptive(&summary.temperature_stats), bottom[0]),
            ("Precipitation summary", format_descriptive(&summary.precipitation_stats), bottom[1]),
        ];
        for (title, text, rect) in reports {
            let p = Paragraph::new(Text::from(text))
                .wrap(Wrap { trim: false })
                .block(Block::default().title(title).borders(Borders::ALL));
            frame.render_widget(p, rect);
        }
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let date_value = |field: usize, current: chrono::NaiveDate| {
            if self.editing_date && self.selected_field == field {
                format!("{}_", self.date_input)
            } else {
                current.to_string()
            }
        };

        let seed = self
            .config
            .seed
            .map(|s| format!(" | seed: {s}"))
            .unwrap_or_default();
        let items = vec![
            ListItem::new(format!(
                "City: {} ({}/{}){seed}",
                self.config.city(),
                self.config.city_index + 1,
                self.config.cities.len()
            )),
            ListItem::new(format!("Start: {}", date_value(FIELD_START, self.config.start))),
            ListItem::new(format!("End: {}", date_value(FIELD_END, self.config.end))),
        ];

        let list = List::new(items)
            .block(Block::default().title("Settings").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "Tab views  ↑/↓ select  ←/→ city  Enter edit date  g regenerate  s/S sort  n/p page  e export  q quit";
        let status_color = if self.error.is_some() { Color::Red } else { Color::Yellow };
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(status_color)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_dual_axis(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    title: &str,
    view: &series::DualAxisView,
    left_kind: LeftSeries,
    left_unit: &str,
    right_unit: &str,
    origin: chrono::NaiveDate,
) {
    let block = Block::default().title(title.to_string()).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Clear, inner);

    let (chart_rect, insets) = chart_layout(inner);
    frame.render_widget(
        DualAxisChart {
            left: &view.left,
            left_kind,
            right: &view.right_scaled,
            x_bounds: view.x_bounds,
            y_bounds: view.left_bounds,
            y_label: left_unit,
            origin,
        },
        chart_rect,
    );
    if let Some(insets) = insets {
        draw_right_axis(frame, inner, chart_rect, insets, view.right_bounds, right_unit);
    }
}

fn sort_header_index(column: SortColumn) -> usize {
    match column {
        SortColumn::Date => 0,
        SortColumn::Temperature => 2,
        SortColumn::Humidity => 3,
        SortColumn::Precipitation => 4,
        SortColumn::WindSpeed => 5,
        SortColumn::Pressure => 6,
        SortColumn::Season => 7,
    }
}

fn export_path(city: &str, start: chrono::NaiveDate, end: chrono::NaiveDate) -> PathBuf {
    let slug: String = city
        .chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    PathBuf::from(format!(
        "wxdash_{slug}_{}_{}.csv",
        start.format("%Y%m%d"),
        end.format("%Y%m%d")
    ))
}

/// Space reserved around the Plotters area for the right-hand axis.
#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        right: 8,
        top: 1,
        bottom: 3,
    };

    if inner.width <= insets.right + 20 || inner.height <= insets.top + insets.bottom + 5 {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x,
        y: inner.y,
        width: inner.width - insets.right,
        height: inner.height,
    };

    (rect, Some(insets))
}

/// Tick labels for the rescaled right-hand series.
fn draw_right_axis(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    bounds: [f64; 2],
    unit: &str,
) {
    let ticks = 5usize;
    let style = Style::default().fg(Color::Yellow);
    let x = chart.x + chart.width;
    let top = chart.y + insets.top;
    let plot_height = chart.height.saturating_sub(insets.top + insets.bottom).max(2);

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let value = bounds[0] + u * (bounds[1] - bounds[0]);
        let y = top + (plot_height - 1) - ((plot_height - 1) as f64 * u).round() as u16;
        if y >= inner.y + inner.height {
            continue;
        }
        frame.render_widget(
            Paragraph::new(format!("{value:.0}")).style(style),
            Rect {
                x,
                y,
                width: insets.right,
                height: 1,
            },
        );
    }

    frame.render_widget(
        Paragraph::new(unit.to_string()).style(style.add_modifier(Modifier::BOLD)),
        Rect {
            x,
            y: inner.y,
            width: insets.right,
            height: 1,
        },
    );
}
