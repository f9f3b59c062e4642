//! Reporting utilities: trend lines, run summaries, per-point results.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{AnalysisConfig, BenchmarkTable, SeriesFit};
use crate::io::ingest::IngestedTable;
use crate::models::predict;

/// One observed point of a series, with its fitted value.
///
/// Computed for every table row, including gated ones, so exports and plots
/// can show the raw data next to the fit.
#[derive(Debug, Clone)]
pub struct SeriesPoint {
    pub row: usize,
    pub x: f64,
    pub y_obs: f64,
    /// Fitted value; `NaN` when `x` is outside the power-law domain.
    pub y_fit: f64,
    pub residual: f64,
    /// True when the gating filter excluded this row from the fit.
    pub gated: bool,
}

/// Fitted values and residuals for one series over the whole table.
pub fn compute_points(
    table: &BenchmarkTable,
    fit: &SeriesFit,
    retained: &[usize],
) -> Vec<SeriesPoint> {
    let mut is_retained = vec![false; table.n_rows()];
    for &r in retained {
        is_retained[r] = true;
    }

    let mut out = Vec::with_capacity(table.n_rows());
    for row in 0..table.n_rows() {
        let x = table.value(row, 0);
        let y_obs = table.value(row, fit.column);
        let y_fit = predict(&fit.trend, x);
        out.push(SeriesPoint {
            row,
            x,
            y_obs,
            y_fit,
            residual: y_obs - y_fit,
            gated: !is_retained[row],
        });
    }
    out
}

/// One stdout line per fitted series: `<label> <slope> <intercept>`.
pub fn format_trend_line(fit: &SeriesFit) -> String {
    format!(
        "{} {:.6} {:.6}",
        fit.label, fit.trend.slope, fit.trend.intercept
    )
}

/// All trend lines, one per fitted series, in target order.
pub fn format_trend_lines(fits: &[SeriesFit]) -> String {
    let mut out = String::new();
    for fit in fits {
        out.push_str(&format_trend_line(fit));
        out.push('\n');
    }
    out
}

/// Format the full run summary (input stats + per-series fit table).
pub fn format_run_summary(
    ingest: &IngestedTable,
    retained: usize,
    fits: &[SeriesFit],
    config: &AnalysisConfig,
) -> String {
    let mut out = String::new();

    out.push_str("=== benchfit - power-law scaling fit ===\n");
    out.push_str(&format!("Input: {}\n", ingest.path.display()));
    out.push_str(&format!(
        "Table: rows={} | cols={} | comments={}\n",
        ingest.table.n_rows(),
        ingest.table.n_cols(),
        ingest.comment_lines,
    ));
    out.push_str(&format!(
        "Gating: column {} (nonzero) | retained {retained}/{} rows\n",
        config.gating_column,
        ingest.table.n_rows(),
    ));

    out.push_str("\nFitted trends (ln y = slope·ln x + intercept):\n");
    out.push_str(&format!(
        "{:<12} {:>4} {:>10} {:>12} {:>12} {:>4} {:>10}\n",
        "label", "col", "slope", "intercept", "amplitude", "n", "rmse(log)"
    ));
    for fit in fits {
        out.push_str(&format!(
            "{:<12} {:>4} {:>10.4} {:>12.4} {:>12.4} {:>4} {:>10.4}\n",
            truncate(&fit.label, 12),
            fit.column,
            fit.trend.slope,
            fit.trend.intercept,
            fit.trend.amplitude(),
            fit.quality.n,
            fit.quality.rmse,
        ));
    }
    out.push('\n');

    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BenchmarkTable, FitQuality, TrendFit};

    fn series_fit(label: &str, column: usize, slope: f64, intercept: f64) -> SeriesFit {
        SeriesFit {
            column,
            label: label.to_string(),
            trend: TrendFit { slope, intercept },
            quality: FitQuality {
                sse: 0.0,
                rmse: 0.0,
                n: 2,
            },
        }
    }

    #[test]
    fn trend_line_is_label_slope_intercept() {
        let fit = series_fit("serial", 1, 1.0, 10.0_f64.ln());
        assert_eq!(format_trend_line(&fit), "serial 1.000000 2.302585");
    }

    #[test]
    fn trend_lines_follow_target_order() {
        let fits = vec![series_fit("serial", 1, 1.0, 0.0), series_fit("parallel", 2, 0.5, 0.0)];
        let text = format_trend_lines(&fits);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("serial "));
        assert!(lines[1].starts_with("parallel "));
    }

    #[test]
    fn points_mark_gated_rows() {
        let table = BenchmarkTable::from_rows(vec![
            vec![1.0, 10.0],
            vec![2.0, 0.0],
            vec![4.0, 40.0],
        ])
        .unwrap();
        let fit = series_fit("serial", 1, 1.0, 10.0_f64.ln());

        let points = compute_points(&table, &fit, &[0, 2]);
        assert_eq!(points.len(), 3);
        assert!(!points[0].gated);
        assert!(points[1].gated);
        assert!(!points[2].gated);
        // y = 10·x on the retained rows, so residuals vanish there.
        assert!(points[0].residual.abs() < 1e-9);
        assert!(points[2].residual.abs() < 1e-9);
    }
}
