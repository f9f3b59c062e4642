//! Ratatui-based terminal UI.
//!
//! The TUI is the interactive counterpart of the ASCII plot: it renders the
//! raw benchmark series and their fitted power-law curves in a terminal
//! chart, with keys to toggle log-log axes and the curve overlay, and to
//! reload the input file after a new benchmark run.

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
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::pipeline::{RunOutput, run_analysis};
use crate::domain::AnalysisConfig;
use crate::error::{AppError, ErrorKind};
use crate::models::sample_curve;

mod plotters_chart;

use plotters_chart::ScalingChart;

/// Per-series RGB palette (high contrast for terminal rendering).
const PALETTE: [(u8, u8, u8); 6] = [
    (0, 255, 255), // cyan
    (0, 255, 0),   // green
    (255, 255, 0), // yellow
    (255, 0, 255), // magenta
    (255, 128, 0), // orange
    (128, 128, 255), // periwinkle
];

/// Start the TUI.
pub fn run(config: AnalysisConfig) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(ErrorKind::Render, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(config)?;
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::new(ErrorKind::Render, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(
                ErrorKind::Render,
                format!("Failed to enter alternate screen: {e}"),
            ));
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
    config: AnalysisConfig,
    run: RunOutput,
    log_scale: bool,
    show_curves: bool,
    status: String,
}

impl App {
    fn new(config: AnalysisConfig) -> Result<Self, AppError> {
        let run = run_analysis(&config)?;
        let status = format!("Loaded {}.", config.input_path.display());
        Ok(Self {
            log_scale: config.log_scale,
            show_curves: config.show_curves,
            config,
            run,
            status,
        })
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(ErrorKind::Render, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(ErrorKind::Render, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read()
                .map_err(|e| AppError::new(ErrorKind::Render, format!("Event read error: {e}")))?
            {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code)? {
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

    fn handle_key(&mut self, code: KeyCode) -> Result<bool, AppError> {
        match code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Char('l') => {
                self.log_scale = !self.log_scale;
                self.status = if self.log_scale {
                    "Axes: log-log.".to_string()
                } else {
                    "Axes: linear.".to_string()
                };
            }
            KeyCode::Char('c') => {
                self.show_curves = !self.show_curves;
                self.status = if self.show_curves {
                    "Fitted curves shown.".to_string()
                } else {
                    "Fitted curves hidden.".to_string()
                };
            }
            KeyCode::Char('r') => {
                self.run = run_analysis(&self.config)?;
                self.status = format!("Reloaded {}.", self.config.input_path.display());
            }
            _ => {}
        }

        Ok(false)
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_chart(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("benchfit", Style::default().fg(Color::Cyan)),
            Span::raw(" — benchmark scaling curves"),
        ]));

        lines.push(Line::from(Span::styled(
            format!(
                "input: {} | rows: {} | retained: {}/{} (gating col {})",
                self.config.input_path.display(),
                self.run.ingest.table.n_rows(),
                self.run.retained.len(),
                self.run.ingest.table.n_rows(),
                self.config.gating_column,
            ),
            Style::default().fg(Color::Gray),
        )));

        // Legend + fitted exponents, one colored span per series.
        let mut legend: Vec<Span> = Vec::new();
        for (idx, fit) in self.run.fits.iter().enumerate() {
            if idx > 0 {
                legend.push(Span::raw("  "));
            }
            let (r, g, b) = PALETTE[idx % PALETTE.len()];
            legend.push(Span::styled(
                format!("● {} x^{:.3}", fit.label, fit.trend.slope),
                Style::default().fg(Color::Rgb(r, g, b)),
            ));
        }
        lines.push(Line::from(legend));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let scale = if self.log_scale { " (log-log)" } else { "" };
        let block = Block::default()
            .title(format!("Scaling{scale}"))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some((series, curves, x_bounds, y_bounds)) =
            chart_series(&self.run, self.show_curves, self.log_scale)
        else {
            let msg = Paragraph::new("Nothing plottable on these axes.")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        };

        let (fmt_x, fmt_y): (fn(f64) -> String, fn(f64) -> String) = if self.log_scale {
            (fmt_axis_x_log, fmt_axis_y_log)
        } else {
            (fmt_axis_x, fmt_axis_y)
        };

        let widget = ScalingChart {
            series: &series,
            curves: &curves,
            colors: &PALETTE,
            x_bounds,
            y_bounds,
            x_label: "size",
            y_label: "time",
            fmt_x,
            fmt_y,
        };

        frame.render_widget(widget, inner);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "l log-log  c curves  r reload  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

type ChartData = (Vec<Vec<(f64, f64)>>, Vec<Vec<(f64, f64)>>, [f64; 2], [f64; 2]);

/// Build chart series for Plotters, applying the log transform up front.
///
/// Returns `None` when nothing survives the transform (e.g. log axes over
/// all-zero measurements).
fn chart_series(run: &RunOutput, show_curves: bool, log_scale: bool) -> Option<ChartData> {
    let table = &run.ingest.table;

    let transform = |p: (f64, f64)| -> Option<(f64, f64)> {
        if !(p.0.is_finite() && p.1.is_finite()) {
            return None;
        }
        if log_scale {
            if p.0 <= 0.0 || p.1 <= 0.0 {
                return None;
            }
            Some((p.0.ln(), p.1.ln()))
        } else {
            Some(p)
        }
    };

    let mut series: Vec<Vec<(f64, f64)>> = Vec::new();
    for col in 1..table.n_cols() {
        series.push(
            (0..table.n_rows())
                .filter_map(|r| transform((table.value(r, 0), table.value(r, col))))
                .collect(),
        );
    }

    let mut curves: Vec<Vec<(f64, f64)>> = Vec::new();
    if show_curves {
        let xs = table.column(0);
        let positive: Vec<f64> = xs.into_iter().filter(|&x| x > 0.0).collect();
        let x0 = positive.iter().cloned().fold(f64::INFINITY, f64::min);
        let x1 = positive.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        if x0.is_finite() && x1.is_finite() && x1 > x0 {
            for fit in &run.fits {
                curves.push(
                    sample_curve(&fit.trend, x0, x1, 200)
                        .into_iter()
                        .filter_map(&transform)
                        .collect(),
                );
            }
        }
    }

    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(x, y) in series.iter().flatten().chain(curves.iter().flatten()) {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    if !(x_min.is_finite() && x_max.is_finite() && y_min.is_finite() && y_max.is_finite()) {
        return None;
    }
    if x_max <= x_min {
        x_min -= 0.5;
        x_max += 0.5;
    }
    if y_max <= y_min {
        y_min -= 0.5;
        y_max += 0.5;
    }

    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);
    Some((
        series,
        curves,
        [x_min, x_max],
        [y_min - pad, y_max + pad],
    ))
}

fn fmt_axis_x(v: f64) -> String {
    format!("{v:.0}")
}

fn fmt_axis_y(v: f64) -> String {
    format!("{v:.2}")
}

fn fmt_axis_x_log(v: f64) -> String {
    format!("{:.0}", v.exp())
}

fn fmt_axis_y_log(v: f64) -> String {
    format!("{:.3}", v.exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BenchmarkTable, FitQuality, SeriesFit, TrendFit};
    use crate::io::ingest::IngestedTable;
    use std::path::PathBuf;

    fn demo_run() -> RunOutput {
        let table = BenchmarkTable::from_rows(vec![
            vec![1.0, 10.0, 20.0],
            vec![2.0, 0.0, 0.0],
            vec![4.0, 40.0, 80.0],
        ])
        .unwrap();
        RunOutput {
            ingest: IngestedTable {
                table,
                path: PathBuf::from("benchmark.dat"),
                lines_read: 3,
                comment_lines: 0,
            },
            retained: vec![0, 2],
            fits: vec![
                SeriesFit {
                    column: 1,
                    label: "serial".to_string(),
                    trend: TrendFit {
                        slope: 1.0,
                        intercept: 10.0_f64.ln(),
                    },
                    quality: FitQuality {
                        sse: 0.0,
                        rmse: 0.0,
                        n: 2,
                    },
                },
                SeriesFit {
                    column: 2,
                    label: "parallel".to_string(),
                    trend: TrendFit {
                        slope: 1.0,
                        intercept: 20.0_f64.ln(),
                    },
                    quality: FitQuality {
                        sse: 0.0,
                        rmse: 0.0,
                        n: 2,
                    },
                },
            ],
        }
    }

    #[test]
    fn chart_series_covers_all_columns() {
        let (series, curves, x_bounds, y_bounds) =
            chart_series(&demo_run(), true, false).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(curves.len(), 2);
        assert_eq!(series[0].len(), 3);
        assert!(x_bounds[0] <= 1.0 && x_bounds[1] >= 4.0);
        assert!(y_bounds[0] <= 0.0 && y_bounds[1] >= 80.0);
    }

    #[test]
    fn log_axes_drop_zero_measurements() {
        let (series, _, _, _) = chart_series(&demo_run(), false, true).unwrap();
        // The zeroed middle row cannot appear on log axes.
        assert_eq!(series[0].len(), 2);
        assert_eq!(series[1].len(), 2);
    }
}
