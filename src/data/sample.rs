//! Synthetic benchmark file generation.
//!
//! `benchfit sample` writes a benchmark results file with known power-law
//! exponents so the fitting pipeline can be exercised (and demonstrated)
//! without running a real benchmark. Generation is fully seeded: the same
//! options always produce the same file.
//!
//! The generator can also zero out whole rows with a configurable
//! probability, mimicking runs that were skipped or failed to complete; this
//! is exactly the shape of data the gating filter exists for.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::BenchmarkTable;
use crate::error::{AppError, ErrorKind};

#[derive(Debug, Clone)]
pub struct SampleOptions {
    /// Number of ladder steps (rows).
    pub steps: usize,
    /// First problem size.
    pub base_size: f64,
    /// Multiplier between consecutive sizes (geometric ladder).
    pub growth: f64,
    /// Power-law exponent per series.
    pub exponents: Vec<f64>,
    /// Multiplicative constant per series.
    pub amplitudes: Vec<f64>,
    /// Lognormal noise sigma (0 = exact power laws).
    pub noise: f64,
    /// Probability that a row's measurements are zeroed (skipped run).
    pub zero_prob: f64,
    pub seed: u64,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            steps: 12,
            base_size: 2.0,
            growth: 2.0,
            // Dense linear-algebra style scaling: serial cubic, parallel a bit
            // below cubic thanks to imperfect speedup.
            exponents: vec![3.0, 2.7],
            amplitudes: vec![1e-6, 5e-7],
            noise: 0.02,
            zero_prob: 0.0,
            seed: 42,
        }
    }
}

/// Generate a synthetic benchmark table.
pub fn generate_table(opts: &SampleOptions) -> Result<BenchmarkTable, AppError> {
    validate(opts)?;

    let mut rng = StdRng::seed_from_u64(opts.seed);
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| AppError::new(ErrorKind::Domain, format!("Noise distribution error: {e}")))?;

    let mut rows = Vec::with_capacity(opts.steps);
    let mut size = opts.base_size;
    for _ in 0..opts.steps {
        let mut row = Vec::with_capacity(1 + opts.exponents.len());
        row.push(size);

        let zeroed = opts.zero_prob > 0.0 && rng.gen_bool(opts.zero_prob);
        for (a, c) in opts.exponents.iter().zip(opts.amplitudes.iter()) {
            if zeroed {
                row.push(0.0);
            } else {
                let jitter = if opts.noise > 0.0 {
                    (opts.noise * normal.sample(&mut rng)).exp()
                } else {
                    1.0
                };
                row.push(c * size.powf(*a) * jitter);
            }
        }

        rows.push(row);
        size *= opts.growth;
    }

    BenchmarkTable::from_rows(rows)
}

/// Generate a table and write it as a benchmark file, header comments included.
pub fn write_sample_file(
    path: &Path,
    opts: &SampleOptions,
    labels: &[String],
) -> Result<BenchmarkTable, AppError> {
    if labels.len() != opts.exponents.len() {
        return Err(AppError::new(
            ErrorKind::ConfigMismatch,
            format!(
                "{} label(s) provided for {} generated series.",
                labels.len(),
                opts.exponents.len()
            ),
        ));
    }

    let table = generate_table(opts)?;

    let mut file = File::create(path).map_err(|e| {
        AppError::new(
            ErrorKind::Io,
            format!("Failed to create sample file '{}': {e}", path.display()),
        )
    })?;

    writeln!(file, "# benchfit synthetic benchmark (seed {})", opts.seed)
        .and_then(|_| writeln!(file, "# columns: size {}", labels.join(" ")))
        .map_err(|e| AppError::new(ErrorKind::Io, format!("Failed to write sample header: {e}")))?;

    for row in table.rows() {
        let mut line = format!("{}", row[0]);
        for v in &row[1..] {
            line.push_str(&format!(" {v:.6e}"));
        }
        writeln!(file, "{line}")
            .map_err(|e| AppError::new(ErrorKind::Io, format!("Failed to write sample row: {e}")))?;
    }

    Ok(table)
}

fn validate(opts: &SampleOptions) -> Result<(), AppError> {
    if opts.steps < 2 {
        return Err(AppError::new(
            ErrorKind::ConfigMismatch,
            "Sample needs at least 2 ladder steps.",
        ));
    }
    if !(opts.base_size.is_finite() && opts.base_size > 0.0) {
        return Err(AppError::new(
            ErrorKind::ConfigMismatch,
            "Sample base size must be finite and > 0.",
        ));
    }
    if !(opts.growth.is_finite() && opts.growth > 1.0) {
        return Err(AppError::new(
            ErrorKind::ConfigMismatch,
            "Sample growth factor must be finite and > 1.",
        ));
    }
    if opts.exponents.is_empty() {
        return Err(AppError::new(
            ErrorKind::ConfigMismatch,
            "Sample needs at least one series exponent.",
        ));
    }
    if opts.amplitudes.len() != opts.exponents.len() {
        return Err(AppError::new(
            ErrorKind::ConfigMismatch,
            format!(
                "{} amplitude(s) provided for {} exponent(s).",
                opts.amplitudes.len(),
                opts.exponents.len()
            ),
        ));
    }
    if opts.amplitudes.iter().any(|&c| !(c.is_finite() && c > 0.0)) {
        return Err(AppError::new(
            ErrorKind::ConfigMismatch,
            "Sample amplitudes must be finite and > 0.",
        ));
    }
    if !(opts.noise.is_finite() && opts.noise >= 0.0) {
        return Err(AppError::new(
            ErrorKind::ConfigMismatch,
            "Sample noise sigma must be finite and >= 0.",
        ));
    }
    if !(0.0..1.0).contains(&opts.zero_prob) {
        return Err(AppError::new(
            ErrorKind::ConfigMismatch,
            "Sample zero probability must be in [0, 1).",
        ));
    }
    Ok(())
}
