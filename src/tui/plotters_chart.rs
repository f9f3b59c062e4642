//! Plotters-powered scaling chart widget for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `Chart` widget?
//! - nicer axis + mesh rendering
//! - less manual work for ticks/labels
//! - easy to extend later (annotations, exportable PNG/SVG backends, etc.)
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A lightweight, render-only chart description.
///
/// The widget is intentionally data-driven: all series and bounds are computed
/// outside the render call (including any log transform). This keeps
/// `render()` focused on drawing and makes it easy to test the data prep
/// separately.
pub struct ScalingChart<'a> {
    /// Observed points, one scatter series per dependent column.
    pub series: &'a [Vec<(f64, f64)>],
    /// Fitted power-law curves, one per fitted series (may be empty).
    pub curves: &'a [Vec<(f64, f64)>],
    /// Per-series RGB colors, indexed in step with `series`/`curves`.
    pub colors: &'a [(u8, u8, u8)],
    /// X bounds (problem size, possibly log-transformed).
    pub x_bounds: [f64; 2],
    /// Y bounds (measurement, possibly log-transformed).
    pub y_bounds: [f64; 2],
    /// Axis labels (kept simple for terminal rendering).
    pub x_label: &'a str,
    pub y_label: &'a str,
    /// Formatting of tick labels.
    pub fmt_x: fn(f64) -> String,
    pub fmt_y: fn(f64) -> String,
}

impl<'a> Widget for ScalingChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a
        // chart. In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let x0 = self.x_bounds[0];
        let x1 = self.x_bounds[1];
        let y0 = self.y_bounds[0];
        let y1 = self.y_bounds[1];

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite())
            || x1 <= x0
            || y1 <= y0
        {
            return;
        }

        // `plotters-ratatui-backend` draws Plotters primitives via Ratatui's
        // `Canvas` widget, which ultimately writes to the terminal buffer.
        //
        // We delegate rendering to the crate-provided widget helper to avoid
        // coupling our code to its internal backend types.
        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                // Small margins keep the chart readable without wasting space.
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            // Axes + tick labels.
            //
            // We disable the mesh lines to reduce visual clutter in
            // low-resolution terminal rendering; the axes + labels are usually
            // enough for scaling plots.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(self.y_label)
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| (self.fmt_x)(*v))
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            // 1) Fitted curves, drawn first so the observed points overlay them.
            for (idx, curve) in self.curves.iter().enumerate() {
                let (r, g, b) = series_color(self.colors, idx);
                chart.draw_series(LineSeries::new(
                    curve.iter().copied(),
                    &RGBColor(r, g, b),
                ))?;
            }

            // 2) Observed points.
            //
            // We intentionally avoid `Circle` markers here. The underlying
            // `plotters-ratatui-backend` currently maps circle radii
            // incorrectly (pixel radius -> normalized canvas units),
            // producing huge circles. A colored `Pixel` gives a clean dot
            // that looks good in terminals.
            for (idx, points) in self.series.iter().enumerate() {
                let (r, g, b) = series_color(self.colors, idx);
                chart.draw_series(
                    points
                        .iter()
                        .map(|&(x, y)| Pixel::new((x, y), RGBColor(r, g, b))),
                )?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}

fn series_color(colors: &[(u8, u8, u8)], idx: usize) -> (u8, u8, u8) {
    if colors.is_empty() {
        return (255, 255, 255);
    }
    colors[idx % colors.len()]
}
