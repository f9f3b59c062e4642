//! Export per-point results to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts: one long-format row per (series, table row), raw and fitted
//! values side by side, with a `gated` flag for rows the fit excluded.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{BenchmarkTable, SeriesFit};
use crate::error::{AppError, ErrorKind};
use crate::report::compute_points;

/// Write per-point results to a CSV file.
pub fn write_results_csv(
    path: &Path,
    table: &BenchmarkTable,
    fits: &[SeriesFit],
    retained: &[usize],
) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(
            ErrorKind::Io,
            format!("Failed to create export CSV '{}': {e}", path.display()),
        )
    })?;

    writeln!(file, "label,column,row,x,y_obs,y_fit,residual,gated")
        .map_err(|e| AppError::new(ErrorKind::Io, format!("Failed to write export CSV header: {e}")))?;

    for fit in fits {
        for p in compute_points(table, fit, retained) {
            writeln!(
                file,
                "{},{},{},{},{},{},{},{}",
                fit.label,
                fit.column,
                p.row,
                p.x,
                p.y_obs,
                fmt_opt(p.y_fit),
                fmt_opt(p.residual),
                p.gated,
            )
            .map_err(|e| {
                AppError::new(ErrorKind::Io, format!("Failed to write export CSV row: {e}"))
            })?;
        }
    }

    Ok(())
}

fn fmt_opt(v: f64) -> String {
    if v.is_finite() { v.to_string() } else { String::new() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FitQuality, TrendFit};

    #[test]
    fn export_writes_one_row_per_series_point() {
        let table = BenchmarkTable::from_rows(vec![vec![1.0, 10.0], vec![4.0, 40.0]]).unwrap();
        let fits = vec![SeriesFit {
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
        }];

        let path = std::env::temp_dir().join(format!(
            "bench-curves-export-{}.csv",
            std::process::id()
        ));
        write_results_csv(&path, &table, &fits, &[0, 1]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "label,column,row,x,y_obs,y_fit,residual,gated");
        assert!(lines[1].starts_with("serial,1,0,1,10,"));
        assert!(lines[1].ends_with(",false"));
    }
}
