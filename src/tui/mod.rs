//! Ratatui-based terminal dashboard.
//!
//! Layout: page heading, the daily sales chart with the price-increase marker,
//! the five-option region radio control, a key-findings panel and a footer.
//! Every region change rebuilds the view from the shared, read-only dataset.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use tracing::info;

use crate::app::pipeline::{RegionView, build_view};
use crate::chart::{ChartSpec, date_to_x, x_to_date};
use crate::domain::RegionFilter;
use crate::error::AppError;
use crate::io::dataset::Dataset;

mod plotters_chart;

use plotters_chart::SalesPlottersChart;

/// Start the TUI on an already-loaded dataset.
pub fn run(dataset: Dataset, initial: RegionFilter) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal =
        Terminal::new(backend).map_err(|e| AppError::runtime(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(dataset, initial);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::runtime(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::runtime(format!("Failed to enter alternate screen: {e}")));
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

struct App {
    dataset: Dataset,
    view: RegionView,
    status: String,
}

impl App {
    fn new(dataset: Dataset, initial: RegionFilter) -> Self {
        let view = build_view(&dataset, initial);
        let status = format!("{} rows loaded", dataset.len());
        Self { dataset, view, status }
    }

    fn selected(&self) -> RegionFilter {
        self.view.dashboard.region_control.selected
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::runtime(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::runtime(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::runtime(format!("Event read error: {e}")))? {
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

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up | KeyCode::Left => self.select(self.selected().prev()),
            KeyCode::Down | KeyCode::Right => self.select(self.selected().next()),
            KeyCode::Char(c @ '1'..='5') => {
                let idx = c as usize - '1' as usize;
                self.select(RegionFilter::ALL[idx]);
            }
            _ => {}
        }
        false
    }

    fn select(&mut self, filter: RegionFilter) {
        if filter == self.selected() {
            return;
        }
        self.view = build_view(&self.dataset, filter);
        info!(region = filter.code(), points = self.view.dashboard.chart.series.len(), "region selected");
        self.status = format!("region: {}", filter.display_name());
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let dashboard = &self.view.dashboard;
        let lines = vec![
            Line::from(Span::styled(
                dashboard.heading.as_str(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(dashboard.subheading.as_str(), Style::default().fg(Color::Gray))),
        ];
        let p = Paragraph::new(Text::from(lines))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(36)])
            .split(area);

        self.draw_chart(frame, columns[0]);

        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(RegionFilter::ALL.len() as u16 + 2),
                Constraint::Min(0),
            ])
            .split(columns[1]);

        self.draw_region_control(frame, side[0]);
        self.draw_findings(frame, side[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chart = &self.view.dashboard.chart;
        let block = Block::default().title(chart.title.as_str()).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let (series, x_bounds, y_bounds) = chart_series(chart);
        let marker_x = date_to_x(chart.marker.date);

        let (chart_rect, insets) = chart_layout(inner);
        let widget = SalesPlottersChart {
            series: &series,
            marker_x,
            x_bounds,
            y_bounds,
            x_label: &chart.x_label,
            y_label: &chart.y_label,
            fmt_x: fmt_axis_date,
            fmt_y: fmt_axis_sales,
        };

        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            draw_axis_ticks(frame, inner, chart_rect, insets, x_bounds, y_bounds, &chart.y_label, &chart.x_label);
            draw_marker_label(frame, chart_rect, x_bounds, marker_x, &chart.marker.label);
        }

        if series.is_empty() {
            let msg = Paragraph::new("No sales for this region.")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Yellow));
            let rect = Rect {
                x: chart_rect.x,
                y: chart_rect.y + chart_rect.height / 2,
                width: chart_rect.width,
                height: 1,
            };
            frame.render_widget(msg, rect);
        }
    }

    fn draw_region_control(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let control = &self.view.dashboard.region_control;
        let items: Vec<ListItem> = control
            .options
            .iter()
            .enumerate()
            .map(|(i, opt)| {
                let dot = if opt.value == control.selected { "(•)" } else { "( )" };
                ListItem::new(format!("{} {dot} {}", i + 1, opt.label))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Region").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White));

        let mut state = ListState::default();
        state.select(Some(control.selected.index()));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_findings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = crate::report::findings_lines(&self.view.dashboard.findings)
            .into_iter()
            .map(Line::from)
            .collect();

        let stats = &self.view.stats;
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(
                "rows={} days={} total={}",
                stats.rows,
                stats.days,
                crate::report::fmt_money(stats.total_sales)
            ),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: true })
            .block(Block::default().title("Key Findings").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ ←/→ region  1-5 pick  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Build the plotted series and bounds for a chart.
fn chart_series(chart: &ChartSpec) -> (Vec<(f64, f64)>, [f64; 2], [f64; 2]) {
    let series = chart
        .series
        .iter()
        .map(|p| (date_to_x(p.date), p.sales))
        .collect::<Vec<_>>();

    let (d0, d1) = chart.x_bounds();
    let x_bounds = [date_to_x(d0), date_to_x(d1)];

    let (y_min, y_max) = chart.y_bounds();
    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);
    let y_bounds = [y_min, y_max + pad];

    (series, x_bounds, y_bounds)
}

fn fmt_axis_date(v: f64) -> String {
    x_to_date(v)
        .map(|d| d.format("%m-%d").to_string())
        .unwrap_or_default()
}

fn fmt_axis_sales(v: f64) -> String {
    format!("{v:.0}")
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 8,
        right: 2,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10 || inner.height <= insets.top + insets.bottom + 5 {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

/// Column of `x` inside `chart`, given the plotted x range.
fn column_for(chart: Rect, x_bounds: [f64; 2], x: f64) -> u16 {
    let u = ((x - x_bounds[0]) / (x_bounds[1] - x_bounds[0])).clamp(0.0, 1.0);
    chart.x + ((chart.width.saturating_sub(1)) as f64 * u).round() as u16
}

#[allow(clippy::too_many_arguments)]
fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    y_label: &str,
    x_label: &str,
) {
    let ticks = 5usize;
    let style = Style::default().fg(Color::Gray);

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let x_val = x_bounds[0] + u * (x_bounds[1] - x_bounds[0]);
        let x = column_for(chart, x_bounds, x_val);
        let label = fmt_axis_date(x_val);
        let label_len = label.len() as u16;
        let start = x.saturating_sub(label_len / 2);
        let y = chart.y + chart.height;
        if y >= inner.y + inner.height - 1 {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let y_val = y_bounds[0] + u * (y_bounds[1] - y_bounds[0]);
        let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
        let label = fmt_axis_sales(y_val);
        let label_len = label.len() as u16;
        let x = inner.x + insets.left.saturating_sub(1);
        let start = x.saturating_sub(label_len);
        if start < inner.x {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    let x_rect = Rect {
        x: chart.x,
        y: chart.y + chart.height + 1,
        width: chart.width,
        height: 1,
    };
    if x_rect.y < inner.y + inner.height {
        frame.render_widget(
            Paragraph::new(x_label).alignment(Alignment::Center).style(style),
            x_rect,
        );
    }

    let y_rect = Rect {
        x: inner.x,
        y: inner.y,
        width: inner.width.min(y_label.chars().count() as u16),
        height: 1,
    };
    frame.render_widget(
        Paragraph::new(y_label).style(style.add_modifier(Modifier::BOLD)),
        y_rect,
    );
}

/// Marker text on the top row of the chart, next to the dashed line.
fn draw_marker_label(frame: &mut ratatui::Frame<'_>, chart: Rect, x_bounds: [f64; 2], marker_x: f64, label: &str) {
    let col = column_for(chart, x_bounds, marker_x);
    let len = label.chars().count() as u16;
    let right_edge = chart.x + chart.width;

    // Prefer the right side of the line; flip left when it would not fit.
    let start = if col + 1 + len <= right_edge {
        col + 1
    } else {
        col.saturating_sub(len).max(chart.x)
    };
    let width = len.min(right_edge.saturating_sub(start));
    if width == 0 {
        return;
    }

    frame.render_widget(
        Paragraph::new(label).style(Style::default().fg(Color::Red)),
        Rect {
            x: start,
            y: chart.y,
            width,
            height: 1,
        },
    );
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::domain::{Region, SalesRecord};

    fn dataset() -> Dataset {
        let d = |day| NaiveDate::from_ymd_opt(2021, 1, day).unwrap();
        Dataset::from_records(vec![
            SalesRecord { sales: 6.0, date: d(10), region: Region::North },
            SalesRecord { sales: 3.0, date: d(11), region: Region::West },
            SalesRecord { sales: 9.0, date: d(16), region: Region::North },
        ])
    }

    #[test]
    fn keys_cycle_and_pick_regions() {
        let mut app = App::new(dataset(), RegionFilter::All);
        assert!(!app.handle_key(KeyCode::Down));
        assert_eq!(app.selected(), RegionFilter::North);
        assert_eq!(app.view.dashboard.chart.series.len(), 2);

        app.handle_key(KeyCode::Char('3'));
        assert_eq!(app.selected(), RegionFilter::East);
        assert!(app.view.dashboard.chart.series.is_empty());

        app.handle_key(KeyCode::Up);
        app.handle_key(KeyCode::Up);
        assert_eq!(app.selected(), RegionFilter::All);
        assert_eq!(app.status, "region: All Regions");

        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn renders_heading_controls_and_findings() {
        let app = App::new(dataset(), RegionFilter::West);
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                app.draw_header(f, Rect { height: 4, ..area });
                app.draw_region_control(f, Rect { y: 4, height: 7, width: 40, ..area });
                app.draw_findings(f, Rect { y: 11, height: 14, width: 60, ..area });
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Soul Foods Pink Morsel Sales Dashboard"));
        assert!(text.contains("Key Findings"));
        for filter in RegionFilter::ALL {
            assert!(text.contains(filter.display_name()), "{filter:?}");
        }
        assert_eq!(text.matches("(•)").count(), 1);
    }

    #[test]
    fn marker_column_maps_into_chart() {
        let chart = Rect { x: 10, y: 0, width: 11, height: 10 };
        assert_eq!(column_for(chart, [0.0, 10.0], 0.0), 10);
        assert_eq!(column_for(chart, [0.0, 10.0], 10.0), 20);
        assert_eq!(column_for(chart, [0.0, 10.0], 5.0), 15);
    }
}
