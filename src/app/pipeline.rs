//! Shared "analysis pipeline" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load table -> gating filter -> per-series log-log fit
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::domain::{AnalysisConfig, SeriesFit};
use crate::error::AppError;
use crate::io::ingest::{IngestedTable, load_table};

/// All computed outputs of a single analysis run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedTable,
    /// Row indices that survived the gating filter (shared by all fits).
    pub retained: Vec<usize>,
    pub fits: Vec<SeriesFit>,
}

/// Execute the full pipeline: read the input file, then fit.
pub fn run_analysis(config: &AnalysisConfig) -> Result<RunOutput, AppError> {
    let ingest = load_table(&config.input_path)?;
    run_analysis_with_table(config, ingest)
}

/// Execute the pipeline on an already-ingested table.
///
/// This is useful for the TUI where we want to refit without re-reading
/// the file, and for tests that build tables in memory.
pub fn run_analysis_with_table(
    config: &AnalysisConfig,
    ingest: IngestedTable,
) -> Result<RunOutput, AppError> {
    let run = crate::fit::fit_all(
        &ingest.table,
        config.gating_column,
        config.target_columns.as_deref(),
        &config.series_labels,
    )?;

    Ok(RunOutput {
        ingest,
        retained: run.retained,
        fits: run.fits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::Write;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "bench-curves-pipeline-{name}-{}.dat",
            std::process::id()
        ));
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn end_to_end_serial_parallel() {
        let path = write_temp(
            "e2e",
            "# size serial parallel\n1 10 20\n2 0 0\n4 40 80\n",
        );
        let config = AnalysisConfig {
            input_path: path.clone(),
            ..AnalysisConfig::default()
        };

        let run = run_analysis(&config).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(run.retained, vec![0, 2]);
        assert_eq!(run.fits.len(), 2);
        assert_eq!(run.fits[0].label, "serial");
        assert_eq!(run.fits[1].label, "parallel");
        assert!((run.fits[0].trend.slope - 1.0).abs() < 1e-9);
        assert!((run.fits[1].trend.intercept - 20.0_f64.ln()).abs() < 1e-9);
    }

    #[test]
    fn default_labels_mismatch_three_series() {
        let path = write_temp("threeseries", "1 10 20 30\n2 20 40 60\n");
        let config = AnalysisConfig {
            input_path: path.clone(),
            ..AnalysisConfig::default()
        };

        let err = run_analysis(&config).unwrap_err();
        let _ = std::fs::remove_file(&path);

        assert_eq!(err.kind(), ErrorKind::ConfigMismatch);
    }
}
