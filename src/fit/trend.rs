//! Log-log trend fitting.
//!
//! Given:
//! - a rectangular `BenchmarkTable`
//! - a gating column (rows with a zero there are dropped once, for all series)
//! - a list of target columns
//!
//! we fit, for each target column, a degree-1 least squares regression of
//! `ln(y)` on `ln(x)` and return `(slope, intercept)` plus log-space quality.
//!
//! The gating filter runs exactly once: every fitted series shares the same
//! retained row set, so a row where the gating measurement is zero (a skipped
//! or failed run) is excluded from all fits, not just the gating series.

use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;

use crate::domain::{BenchmarkTable, FitQuality, SeriesFit, TrendFit};
use crate::error::{AppError, ErrorKind};
use crate::math::solve_least_squares;

/// Row indices where the gating column is nonzero.
///
/// Zero means "no measurement" in benchmark output; the comparison is exact,
/// not an epsilon test.
pub fn retained_rows(table: &BenchmarkTable, gating_column: usize) -> Result<Vec<usize>, AppError> {
    if gating_column >= table.n_cols() {
        return Err(AppError::new(
            ErrorKind::ConfigMismatch,
            format!(
                "Gating column {gating_column} is out of range for a table with {} columns.",
                table.n_cols()
            ),
        ));
    }

    Ok((0..table.n_rows())
        .filter(|&r| table.value(r, gating_column) != 0.0)
        .collect())
}

/// Resolve the target column list: explicit columns must be dependent columns.
pub fn resolve_targets(
    table: &BenchmarkTable,
    requested: Option<&[usize]>,
) -> Result<Vec<usize>, AppError> {
    match requested {
        None => Ok((1..table.n_cols()).collect()),
        Some(cols) => {
            for &c in cols {
                if c == 0 || c >= table.n_cols() {
                    return Err(AppError::new(
                        ErrorKind::ConfigMismatch,
                        format!(
                            "Target column {c} is not a dependent column (valid range: 1..{}).",
                            table.n_cols()
                        ),
                    ));
                }
            }
            Ok(cols.to_vec())
        }
    }
}

/// Fit one target column over the retained rows.
pub fn fit_series(
    table: &BenchmarkTable,
    retained: &[usize],
    target: usize,
) -> Result<(TrendFit, FitQuality), AppError> {
    if retained.len() < 2 {
        return Err(AppError::new(
            ErrorKind::InsufficientData,
            format!(
                "Column {target}: only {} row(s) survive the gating filter; need at least 2 to fit.",
                retained.len()
            ),
        ));
    }

    let n = retained.len();
    let mut u = Vec::with_capacity(n);
    let mut v = Vec::with_capacity(n);

    for &r in retained {
        let x = table.value(r, 0);
        if x <= 0.0 {
            return Err(AppError::new(
                ErrorKind::Domain,
                format!("Column 0: non-positive value {x} cannot be log-transformed (row {r})."),
            ));
        }
        let y = table.value(r, target);
        if y <= 0.0 {
            return Err(AppError::new(
                ErrorKind::Domain,
                format!(
                    "Column {target}: non-positive value {y} cannot be log-transformed (row {r})."
                ),
            ));
        }
        u.push(x.ln());
        v.push(y.ln());
    }

    // With a constant ln(x) column the exponent is unidentifiable; SVD would
    // hand back a minimum-norm answer rather than fail, so guard here.
    let spread = u.iter().cloned().fold(f64::NEG_INFINITY, f64::max)
        - u.iter().cloned().fold(f64::INFINITY, f64::min);
    if spread == 0.0 {
        return Err(AppError::new(
            ErrorKind::InsufficientData,
            format!("Column {target}: all retained x values are identical; the fit is degenerate."),
        ));
    }

    let mut design = DMatrix::zeros(n, 2);
    for (i, &ui) in u.iter().enumerate() {
        design[(i, 0)] = 1.0;
        design[(i, 1)] = ui;
    }
    let rhs = DVector::from_vec(v.clone());

    let beta = solve_least_squares(&design, &rhs).ok_or_else(|| {
        AppError::new(
            ErrorKind::InsufficientData,
            format!("Column {target}: least-squares system is too ill-conditioned to fit."),
        )
    })?;

    let trend = TrendFit {
        intercept: beta[0],
        slope: beta[1],
    };

    let sse: f64 = u
        .iter()
        .zip(v.iter())
        .map(|(&ui, &vi)| {
            let r = vi - (trend.intercept + trend.slope * ui);
            r * r
        })
        .sum();
    let quality = FitQuality {
        sse,
        rmse: (sse / n as f64).sqrt(),
        n,
    };

    Ok((trend, quality))
}

/// Output of `fit_all`: the shared retained row set plus one fit per target.
#[derive(Debug, Clone)]
pub struct TrendRun {
    pub retained: Vec<usize>,
    pub fits: Vec<SeriesFit>,
}

/// Fit every target column, sharing one retained row set.
///
/// `labels` must carry one entry per dependent column; target columns are
/// fitted independently in parallel.
pub fn fit_all(
    table: &BenchmarkTable,
    gating_column: usize,
    targets: Option<&[usize]>,
    labels: &[String],
) -> Result<TrendRun, AppError> {
    if labels.len() != table.n_series() {
        return Err(AppError::new(
            ErrorKind::ConfigMismatch,
            format!(
                "{} label(s) provided for {} dependent column(s).",
                labels.len(),
                table.n_series()
            ),
        ));
    }

    let retained = retained_rows(table, gating_column)?;
    let targets = resolve_targets(table, targets)?;

    let fits = targets
        .par_iter()
        .map(|&col| {
            let (trend, quality) = fit_series(table, &retained, col)?;
            Ok(SeriesFit {
                column: col,
                label: labels[col - 1].clone(),
                trend,
                quality,
            })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    Ok(TrendRun { retained, fits })
}
