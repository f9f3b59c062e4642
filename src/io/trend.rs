//! Read/write trend JSON files.
//!
//! Trend JSON is the "portable" representation of a run's fitted trends:
//! - slope/intercept + quality per series
//! - run metadata (input path, gating column)
//! - a precomputed curve grid for quick plotting
//!
//! The schema is defined by `domain::TrendFile`.

use std::fs::File;
use std::path::Path;

use crate::domain::{CurveGrid, SeriesFit, TrendFile, TrendSeries};
use crate::error::{AppError, ErrorKind};
use crate::io::ingest::IngestedTable;
use crate::models::sample_curve;

const GRID_POINTS: usize = 101;

/// Write a trend JSON file.
pub fn write_trend_json(
    path: &Path,
    fits: &[SeriesFit],
    ingest: &IngestedTable,
    gating_column: usize,
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            ErrorKind::Io,
            format!("Failed to create trend JSON '{}': {e}", path.display()),
        )
    })?;

    let trend = build_trend_file(fits, ingest, gating_column);

    serde_json::to_writer_pretty(file, &trend)
        .map_err(|e| AppError::new(ErrorKind::Io, format!("Failed to write trend JSON: {e}")))?;

    Ok(())
}

/// Read a trend JSON file.
pub fn read_trend_json(path: &Path) -> Result<TrendFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(
            ErrorKind::Io,
            format!("Failed to open trend JSON '{}': {e}", path.display()),
        )
    })?;
    let trend: TrendFile = serde_json::from_reader(file)
        .map_err(|e| AppError::new(ErrorKind::Parse, format!("Invalid trend JSON: {e}")))?;
    Ok(trend)
}

/// Assemble the serializable trend file for a run.
pub fn build_trend_file(
    fits: &[SeriesFit],
    ingest: &IngestedTable,
    gating_column: usize,
) -> TrendFile {
    let (x0, x1) = x_range(&ingest.table.column(0)).unwrap_or((1.0, 2.0));

    let series = fits
        .iter()
        .map(|fit| {
            let grid_pts = sample_curve(&fit.trend, x0, x1, GRID_POINTS);
            let (x, y): (Vec<f64>, Vec<f64>) = grid_pts.into_iter().unzip();
            TrendSeries {
                label: fit.label.clone(),
                column: fit.column,
                trend: fit.trend,
                quality: fit.quality.clone(),
                grid: CurveGrid { x, y },
            }
        })
        .collect();

    TrendFile {
        tool: "benchfit".to_string(),
        input: ingest.path.display().to_string(),
        gating_column,
        series,
    }
}

/// Positive x-range of the table, so the grid stays inside the power-law domain.
fn x_range(xs: &[f64]) -> Option<(f64, f64)> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    for &x in xs {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BenchmarkTable, FitQuality, TrendFit};
    use std::path::PathBuf;

    fn sample_ingest() -> IngestedTable {
        IngestedTable {
            table: BenchmarkTable::from_rows(vec![vec![1.0, 10.0], vec![4.0, 40.0]]).unwrap(),
            path: PathBuf::from("benchmark.dat"),
            lines_read: 2,
            comment_lines: 0,
        }
    }

    fn sample_fits() -> Vec<SeriesFit> {
        vec![SeriesFit {
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
        }]
    }

    #[test]
    fn trend_file_grid_spans_table_x_range() {
        let trend = build_trend_file(&sample_fits(), &sample_ingest(), 1);
        assert_eq!(trend.series.len(), 1);
        let grid = &trend.series[0].grid;
        assert_eq!(grid.x.len(), GRID_POINTS);
        assert!((grid.x[0] - 1.0).abs() < 1e-12);
        assert!((grid.x[GRID_POINTS - 1] - 4.0).abs() < 1e-12);
        // y = 10·x along the grid.
        assert!((grid.y[0] - 10.0).abs() < 1e-9);
        assert!((grid.y[GRID_POINTS - 1] - 40.0).abs() < 1e-9);
    }

    #[test]
    fn trend_json_round_trips() {
        let trend = build_trend_file(&sample_fits(), &sample_ingest(), 1);
        let json = serde_json::to_string(&trend).unwrap();
        let back: TrendFile = serde_json::from_str(&json).unwrap();
        assert_eq!(back.tool, "benchfit");
        assert_eq!(back.gating_column, 1);
        assert_eq!(back.series[0].label, "serial");
        assert!((back.series[0].trend.slope - 1.0).abs() < 1e-12);
    }
}
