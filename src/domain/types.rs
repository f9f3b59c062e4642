//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to JSON/CSV
//! - reloaded later for plotting or comparisons

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, ErrorKind};

/// A rectangular table of benchmark measurements.
///
/// Column 0 is the independent variable (problem size); columns `1..K` are
/// dependent measurement series. Rows keep input order; nothing is sorted or
/// deduplicated. Comment lines never reach this structure.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkTable {
    rows: Vec<Vec<f64>>,
    cols: usize,
}

impl BenchmarkTable {
    /// Build a table from pre-parsed rows, enforcing rectangularity.
    ///
    /// Ingest performs its own width check so it can name the offending file
    /// line; this constructor is the invariant keeper for rows built in
    /// memory (sample generation, tests).
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, AppError> {
        let Some(first) = rows.first() else {
            return Err(AppError::new(
                ErrorKind::InsufficientData,
                "Table has no data rows.",
            ));
        };
        let cols = first.len();
        if cols < 2 {
            return Err(AppError::new(
                ErrorKind::Shape,
                format!("Table needs at least 2 columns, found {cols}."),
            ));
        }
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(AppError::new(
                    ErrorKind::Shape,
                    format!(
                        "Row {} has {} columns, expected {cols}.",
                        idx + 1,
                        row.len()
                    ),
                ));
            }
        }
        Ok(Self { rows, cols })
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.cols
    }

    /// Number of dependent measurement series (all columns except column 0).
    pub fn n_series(&self) -> usize {
        self.cols - 1
    }

    pub fn value(&self, row: usize, col: usize) -> f64 {
        self.rows[row][col]
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// One full column, in row order.
    pub fn column(&self, col: usize) -> Vec<f64> {
        self.rows.iter().map(|r| r[col]).collect()
    }
}

/// A fitted power-law trend in log-log space.
///
/// `ln(y) = slope · ln(x) + intercept`, so `slope` approximates the power-law
/// exponent in `y ≈ C · x^slope` and `exp(intercept)` approximates `C`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendFit {
    pub slope: f64,
    pub intercept: f64,
}

impl TrendFit {
    /// The multiplicative constant `C = exp(intercept)`.
    pub fn amplitude(&self) -> f64 {
        self.intercept.exp()
    }
}

/// Log-space fit quality diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitQuality {
    pub sse: f64,
    pub rmse: f64,
    pub n: usize,
}

/// Fit output for a single dependent column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesFit {
    /// Dependent column index in the table (1-based relative to column 0).
    pub column: usize,
    pub label: String,
    pub trend: TrendFit,
    pub quality: FitQuality,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags; defaults match the classic workflow
/// (`benchmark.dat` in the working directory, serial vs parallel series).
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub input_path: PathBuf,
    /// One label per dependent column, in column order.
    pub series_labels: Vec<String>,
    /// The column whose nonzero status selects rows for fitting.
    pub gating_column: usize,
    /// Dependent columns to fit. `None` means all of them.
    pub target_columns: Option<Vec<usize>>,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    /// Render plot axes in log-log space.
    pub log_scale: bool,
    /// Overlay the fitted power-law curves on the plot.
    pub show_curves: bool,

    pub export_results: Option<PathBuf>,
    pub export_trend: Option<PathBuf>,
}

pub const DEFAULT_INPUT: &str = "benchmark.dat";
pub const DEFAULT_LABELS: [&str; 2] = ["serial", "parallel"];
pub const DEFAULT_GATING_COLUMN: usize = 1;

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT),
            series_labels: DEFAULT_LABELS.iter().map(|s| s.to_string()).collect(),
            gating_column: DEFAULT_GATING_COLUMN,
            target_columns: None,
            plot: true,
            plot_width: 100,
            plot_height: 25,
            log_scale: false,
            show_curves: true,
            export_results: None,
            export_trend: None,
        }
    }
}

/// A saved trend file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendFile {
    pub tool: String,
    pub input: String,
    pub gating_column: usize,
    pub series: Vec<TrendSeries>,
}

/// One fitted series in a `TrendFile`, with a precomputed curve grid so the
/// `plot` subcommand can render without re-reading the benchmark file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendSeries {
    pub label: String,
    pub column: usize,
    pub trend: TrendFit,
    pub quality: FitQuality,
    pub grid: CurveGrid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveGrid {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}
