//! Benchmark file ingest and validation.
//!
//! This module turns a whitespace-delimited benchmark results file into a
//! rectangular `BenchmarkTable` that is safe to fit.
//!
//! Design goals:
//! - **Strict parsing** with line-numbered errors (clear messages + exit code 2)
//! - **Deterministic behavior**: input row order is preserved, nothing is
//!   sorted, deduplicated, or silently dropped except comments and blank lines
//! - **Separation of concerns**: no fitting logic here
//!
//! File format: one record per line; lines whose first character is `#` are
//! comments, regardless of where they appear or what they contain. All other
//! lines hold N whitespace-separated numeric fields (column 0 is the problem
//! size, columns 1..N are measurement series). Columns are positional; there
//! is no header row beyond comments.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::domain::BenchmarkTable;
use crate::error::{AppError, ErrorKind};

/// Ingest output: the validated table plus line accounting for the summary.
#[derive(Debug, Clone)]
pub struct IngestedTable {
    pub table: BenchmarkTable,
    pub path: PathBuf,
    /// Physical lines read, comments and blanks included.
    pub lines_read: usize,
    pub comment_lines: usize,
}

/// Load and validate a benchmark results file.
pub fn load_table(path: &Path) -> Result<IngestedTable, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(
            ErrorKind::Io,
            format!("Failed to open benchmark file '{}': {e}", path.display()),
        )
    })?;
    let reader = BufReader::new(file);

    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut lines_read = 0usize;
    let mut comment_lines = 0usize;
    let mut expected_cols: Option<usize> = None;

    for (idx, line) in reader.lines().enumerate() {
        // 1-based physical line numbers, comments and blanks included, so
        // diagnostics match what an editor shows.
        let line_no = idx + 1;
        lines_read += 1;

        let line = line.map_err(|e| {
            AppError::new(
                ErrorKind::Io,
                format!("Failed to read '{}' at line {line_no}: {e}", path.display()),
            )
        })?;

        if line.starts_with('#') {
            comment_lines += 1;
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            // Blank-after-split lines carry no record.
            continue;
        }

        let mut row = Vec::with_capacity(tokens.len());
        for tok in &tokens {
            let value: f64 = tok.parse().map_err(|_| {
                AppError::new(
                    ErrorKind::Parse,
                    format!("Line {line_no}: invalid numeric token '{tok}'."),
                )
            })?;
            // "nan"/"inf" parse as floats but poison every downstream sum;
            // reject them at the boundary instead.
            if !value.is_finite() {
                return Err(AppError::new(
                    ErrorKind::Parse,
                    format!("Line {line_no}: non-finite value '{tok}'."),
                ));
            }
            row.push(value);
        }

        match expected_cols {
            None => {
                if row.len() < 2 {
                    return Err(AppError::new(
                        ErrorKind::Shape,
                        format!(
                            "Line {line_no}: found {} column(s); need a size column plus at least one series.",
                            row.len()
                        ),
                    ));
                }
                expected_cols = Some(row.len());
            }
            Some(cols) => {
                if row.len() != cols {
                    return Err(AppError::new(
                        ErrorKind::Shape,
                        format!(
                            "Line {line_no}: expected {cols} columns, found {}.",
                            row.len()
                        ),
                    ));
                }
            }
        }

        rows.push(row);
    }

    if rows.is_empty() {
        return Err(AppError::new(
            ErrorKind::InsufficientData,
            format!("No data rows in '{}'.", path.display()),
        ));
    }

    let table = BenchmarkTable::from_rows(rows)?;

    Ok(IngestedTable {
        table,
        path: path.to_path_buf(),
        lines_read,
        comment_lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Write `content` to a unique temp file and run `load_table` on it.
    fn load_str(name: &str, content: &str) -> Result<IngestedTable, AppError> {
        let path = std::env::temp_dir().join(format!(
            "bench-curves-ingest-{name}-{}.dat",
            std::process::id()
        ));
        let mut f = File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        drop(f);
        let out = load_table(&path);
        let _ = std::fs::remove_file(&path);
        out
    }

    #[test]
    fn parses_rows_in_file_order() {
        let ingest = load_str(
            "order",
            "# size serial parallel\n1 10 20\n2 18 9\n4 40 16\n",
        )
        .unwrap();
        assert_eq!(ingest.table.n_rows(), 3);
        assert_eq!(ingest.table.n_cols(), 3);
        assert_eq!(ingest.table.column(0), vec![1.0, 2.0, 4.0]);
        assert_eq!(ingest.comment_lines, 1);
        assert_eq!(ingest.lines_read, 4);
    }

    #[test]
    fn mid_file_comment_is_skipped_even_if_numeric() {
        let ingest = load_str("midcomment", "1 10\n# 999 999\n2 20\n").unwrap();
        assert_eq!(ingest.table.n_rows(), 2);
        assert_eq!(ingest.table.column(1), vec![10.0, 20.0]);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let ingest = load_str("blank", "1 10\n\n   \n2 20\n").unwrap();
        assert_eq!(ingest.table.n_rows(), 2);
    }

    #[test]
    fn parse_error_names_the_line() {
        let err = load_str("badtok", "1 10\n2 twenty\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.to_string().contains("Line 2"));
        assert!(err.to_string().contains("twenty"));
    }

    #[test]
    fn non_finite_token_is_rejected() {
        let err = load_str("nonfinite", "1 10\n2 nan\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.to_string().contains("Line 2"));
    }

    #[test]
    fn ragged_row_names_the_line() {
        let err = load_str("ragged", "1 10 20\n2 18\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);
        assert!(err.to_string().contains("Line 2"));
    }

    #[test]
    fn single_column_row_is_shape_error() {
        let err = load_str("onecol", "42\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);
    }

    #[test]
    fn comment_only_file_has_no_rows() {
        let err = load_str("commentsonly", "# a\n# b\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientData);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_table(Path::new("/nonexistent/benchmark.dat")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
