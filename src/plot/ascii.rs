//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - observed points: one marker glyph per series (`o`, `x`, `+`, ...)
//! - fitted power-law curves: `.` lines
//! - a legend mapping glyphs to series labels
//!
//! The plot always shows the raw, unfiltered table; gating only affects the
//! fit, never the display. With `log_scale` both axes are log-transformed and
//! non-positive values are simply not drawable.

use crate::domain::{BenchmarkTable, SeriesFit, TrendFile};
use crate::models::sample_curve;

/// Marker glyphs assigned to series in column order.
pub const SERIES_MARKERS: [char; 6] = ['o', 'x', '+', '*', 's', 'd'];

#[derive(Debug, Clone, Copy)]
pub struct PlotOptions {
    pub width: usize,
    pub height: usize,
    pub log_scale: bool,
    pub show_curves: bool,
}

/// Render the unfiltered table, one marker series per dependent column,
/// with optional fitted-curve overlays.
pub fn render_ascii_plot(
    table: &BenchmarkTable,
    labels: &[String],
    fits: Option<&[SeriesFit]>,
    opts: PlotOptions,
) -> String {
    let width = opts.width.max(10);
    let height = opts.height.max(5);

    let mut series: Vec<(char, String, Vec<(f64, f64)>)> = Vec::new();
    for col in 1..table.n_cols() {
        let marker = SERIES_MARKERS[(col - 1) % SERIES_MARKERS.len()];
        let label = labels
            .get(col - 1)
            .cloned()
            .unwrap_or_else(|| format!("column {col}"));
        let points: Vec<(f64, f64)> = (0..table.n_rows())
            .map(|r| (table.value(r, 0), table.value(r, col)))
            .collect();
        series.push((marker, label, points));
    }

    let mut curves: Vec<Vec<(f64, f64)>> = Vec::new();
    if opts.show_curves {
        if let Some(fits) = fits {
            if let Some((x0, x1)) = x_range(table) {
                for fit in fits {
                    curves.push(sample_curve(&fit.trend, x0, x1, width.max(2)));
                }
            }
        }
    }

    render_grid(&series, &curves, width, height, opts.log_scale)
}

/// Render a saved trend file (curves only, no observed points).
pub fn render_ascii_plot_from_trend_file(
    trend: &TrendFile,
    width: usize,
    height: usize,
    log_scale: bool,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let mut series: Vec<(char, String, Vec<(f64, f64)>)> = Vec::new();
    let mut curves: Vec<Vec<(f64, f64)>> = Vec::new();
    for (idx, s) in trend.series.iter().enumerate() {
        let marker = SERIES_MARKERS[idx % SERIES_MARKERS.len()];
        // Legend entries only; the drawn geometry is the saved grid.
        series.push((marker, s.label.clone(), Vec::new()));
        curves.push(s.grid.x.iter().copied().zip(s.grid.y.iter().copied()).collect());
    }

    render_grid(&series, &curves, width, height, log_scale)
}

fn render_grid(
    series: &[(char, String, Vec<(f64, f64)>)],
    curves: &[Vec<(f64, f64)>],
    width: usize,
    height: usize,
    log_scale: bool,
) -> String {
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

    let mut drawable: Vec<(char, Vec<(f64, f64)>)> = Vec::new();
    for (marker, _, points) in series {
        drawable.push((*marker, points.iter().filter_map(|&p| transform(p)).collect()));
    }
    let curves: Vec<Vec<(f64, f64)>> = curves
        .iter()
        .map(|c| c.iter().filter_map(|&p| transform(p)).collect())
        .collect();

    let all = drawable
        .iter()
        .flat_map(|(_, pts)| pts.iter())
        .chain(curves.iter().flatten());
    let (x_min, x_max, y_min, y_max) = bounds(all).unwrap_or((0.0, 1.0, 0.0, 1.0));
    let (x_min, x_max) = pad_range(x_min, x_max, 0.0);
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Draw curves first (so points can overlay).
    for curve in &curves {
        for &(x, y) in curve {
            let (cx, cy) = (map_x(x, x_min, x_max, width), map_y(y, y_min, y_max, height));
            grid[cy][cx] = '.';
        }
    }

    for (marker, points) in &drawable {
        for &(x, y) in points {
            let (cx, cy) = (map_x(x, x_min, x_max, width), map_y(y, y_min, y_max, height));
            grid[cy][cx] = *marker;
        }
    }

    let scale = if log_scale { " (log-log)" } else { "" };
    let mut out = String::new();
    out.push_str(&format!(
        "Plot{scale}: x=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.3}, {y_max:.3}]\n"
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    for (marker, label, _) in series {
        out.push_str(&format!("  {marker} {label}\n"));
    }

    out
}

fn x_range(table: &BenchmarkTable) -> Option<(f64, f64)> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    for r in 0..table.n_rows() {
        let x = table.value(r, 0);
        if x > 0.0 {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
        }
    }
    if min_x.is_finite() && max_x.is_finite() && max_x > min_x {
        Some((min_x, max_x))
    } else {
        None
    }
}

fn bounds<'a>(points: impl Iterator<Item = &'a (f64, f64)>) -> Option<(f64, f64, f64, f64)> {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for &(x, y) in points {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if x_min.is_finite() && x_max.is_finite() && y_min.is_finite() && y_max.is_finite() {
        Some((x_min, x_max, y_min, y_max))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    if max <= min {
        return (min - 0.5, max + 0.5);
    }
    let pad = (max - min) * frac;
    (min - pad, max + pad)
}

fn map_x(x: f64, min: f64, max: f64, width: usize) -> usize {
    let u = ((x - min) / (max - min)).clamp(0.0, 1.0);
    ((width - 1) as f64 * u).round() as usize
}

fn map_y(y: f64, min: f64, max: f64, height: usize) -> usize {
    let u = ((y - min) / (max - min)).clamp(0.0, 1.0);
    (height - 1) - ((height - 1) as f64 * u).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BenchmarkTable;

    fn opts() -> PlotOptions {
        PlotOptions {
            width: 40,
            height: 10,
            log_scale: false,
            show_curves: false,
        }
    }

    fn demo_table() -> BenchmarkTable {
        BenchmarkTable::from_rows(vec![
            vec![1.0, 10.0, 20.0],
            vec![2.0, 18.0, 11.0],
            vec![4.0, 41.0, 19.0],
        ])
        .unwrap()
    }

    fn demo_labels() -> Vec<String> {
        vec!["serial".to_string(), "parallel".to_string()]
    }

    #[test]
    fn plot_has_header_grid_and_legend() {
        let text = render_ascii_plot(&demo_table(), &demo_labels(), None, opts());
        let lines: Vec<&str> = text.lines().collect();
        // 1 header + 10 grid rows + 2 legend entries.
        assert_eq!(lines.len(), 13);
        assert!(lines[0].starts_with("Plot:"));
        assert_eq!(lines[11], "  o serial");
        assert_eq!(lines[12], "  x parallel");
    }

    #[test]
    fn plot_is_deterministic() {
        let a = render_ascii_plot(&demo_table(), &demo_labels(), None, opts());
        let b = render_ascii_plot(&demo_table(), &demo_labels(), None, opts());
        assert_eq!(a, b);
    }

    #[test]
    fn plot_draws_all_series_markers() {
        let text = render_ascii_plot(&demo_table(), &demo_labels(), None, opts());
        let grid: String = text.lines().skip(1).take(10).collect();
        assert!(grid.contains('o'));
        assert!(grid.contains('x'));
    }

    #[test]
    fn log_scale_skips_non_positive_points() {
        let table = BenchmarkTable::from_rows(vec![
            vec![1.0, 10.0],
            vec![2.0, 0.0],
            vec![4.0, 40.0],
        ])
        .unwrap();
        let mut o = opts();
        o.log_scale = true;
        let text = render_ascii_plot(&table, &demo_labels()[..1].to_vec(), None, o);
        assert!(text.starts_with("Plot (log-log):"));
        // The zero measurement cannot appear on a log axis.
        let marker_count = text.lines().skip(1).take(10).flat_map(|l| l.chars())
            .filter(|&c| c == 'o')
            .count();
        assert_eq!(marker_count, 2);
    }
}
