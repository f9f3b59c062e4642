//! Command-line parsing for the benchmark scaling fitter.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the fitting/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{DEFAULT_GATING_COLUMN, DEFAULT_INPUT};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "benchfit",
    version,
    about = "Benchmark scaling analysis: power-law trend fits for serial vs parallel runs"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit power-law trends, print a summary, and optionally plot/export.
    Fit(FitArgs),
    /// Print bare `<label> <slope> <intercept>` lines only (useful for scripting).
    Trend(FitArgs),
    /// Plot a previously exported trend JSON.
    Plot(PlotArgs),
    /// Launch the interactive chart.
    ///
    /// This uses the same underlying fit pipeline as `benchfit fit`, but
    /// renders the series in a terminal UI using Ratatui.
    Tui(FitArgs),
    /// Generate a synthetic benchmark file with known exponents.
    Sample(SampleArgs),
}

/// Common options for fitting, trend output, and the TUI.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Benchmark results file (whitespace-delimited, `#` comments).
    #[arg(short = 'i', long, default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Series label, one per dependent column in order (repeat the flag).
    /// Defaults to `serial parallel`.
    #[arg(short = 'l', long = "label")]
    pub labels: Vec<String>,

    /// Gating column: rows where this column is zero are dropped from every fit.
    #[arg(short = 'g', long, default_value_t = DEFAULT_GATING_COLUMN)]
    pub gating_column: usize,

    /// Dependent column to fit (repeat the flag; default: all dependent columns).
    #[arg(short = 'c', long = "column")]
    pub columns: Vec<usize>,

    /// Render an ASCII plot in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Use log-log axes for the plot.
    #[arg(long)]
    pub log_scale: bool,

    /// Hide the fitted-curve overlay on the plot.
    #[arg(long)]
    pub no_curves: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export per-point results to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export fitted trends (+ curve grids) to JSON.
    #[arg(long = "export-trend")]
    pub export_trend: Option<PathBuf>,
}

/// Options for plotting a saved trend file.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Trend JSON file produced by `benchfit fit --export-trend`.
    #[arg(long, value_name = "JSON")]
    pub trend: PathBuf,

    /// Use log-log axes.
    #[arg(long)]
    pub log_scale: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

/// Options for synthetic benchmark generation.
#[derive(Debug, Parser)]
pub struct SampleArgs {
    /// Output file.
    #[arg(short = 'o', long, default_value = DEFAULT_INPUT)]
    pub out: PathBuf,

    /// Number of ladder steps (rows).
    #[arg(long, default_value_t = 12)]
    pub steps: usize,

    /// First problem size.
    #[arg(long, default_value_t = 2.0)]
    pub base_size: f64,

    /// Multiplier between consecutive sizes.
    #[arg(long, default_value_t = 2.0)]
    pub growth: f64,

    /// Power-law exponent per series (repeat the flag).
    /// Defaults to `3.0 2.7` (serial cubic, imperfect parallel speedup).
    #[arg(long = "exponent")]
    pub exponents: Vec<f64>,

    /// Multiplicative constant per series (repeat the flag; must match
    /// the exponent count when given).
    #[arg(long = "amplitude")]
    pub amplitudes: Vec<f64>,

    /// Lognormal noise sigma (0 = exact power laws).
    #[arg(long, default_value_t = 0.02)]
    pub noise: f64,

    /// Probability that a row's measurements are zeroed (skipped run).
    #[arg(long, default_value_t = 0.0)]
    pub zero_prob: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Series label, one per series (repeat the flag).
    #[arg(short = 'l', long = "label")]
    pub labels: Vec<String>,
}
