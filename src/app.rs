//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the load→fit pipeline
//! - prints trend lines / summaries / plots
//! - writes optional exports
//! - generates synthetic benchmark files

use clap::Parser;

use crate::cli::{Command, FitArgs, PlotArgs, SampleArgs};
use crate::domain::{AnalysisConfig, DEFAULT_LABELS};
use crate::error::AppError;
use crate::plot::PlotOptions;

pub mod pipeline;

/// Entry point for the `benchfit` binary.
pub fn run() -> Result<(), AppError> {
    // We want bare `benchfit` (and `benchfit -i foo.dat`) to behave like
    // `benchfit fit ...`, so the zero-argument invocation just works.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Fit(args) => handle_fit(args, OutputMode::Full),
        Command::Trend(args) => handle_fit(args, OutputMode::TrendOnly),
        Command::Plot(args) => handle_plot(args),
        Command::Tui(args) => crate::tui::run(analysis_config_from_args(&args)),
        Command::Sample(args) => handle_sample(args),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    TrendOnly,
}

fn handle_fit(args: FitArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = analysis_config_from_args(&args);
    let run = pipeline::run_analysis(&config)?;

    if mode == OutputMode::Full {
        println!(
            "{}",
            crate::report::format_run_summary(&run.ingest, run.retained.len(), &run.fits, &config)
        );
    }

    print!("{}", crate::report::format_trend_lines(&run.fits));

    if mode == OutputMode::Full && config.plot {
        let plot = crate::plot::render_ascii_plot(
            &run.ingest.table,
            &config.series_labels,
            Some(&run.fits),
            PlotOptions {
                width: config.plot_width,
                height: config.plot_height,
                log_scale: config.log_scale,
                show_curves: config.show_curves,
            },
        );
        println!("\n{plot}");
    }

    if let Some(path) = &config.export_results {
        crate::io::export::write_results_csv(path, &run.ingest.table, &run.fits, &run.retained)?;
    }
    if let Some(path) = &config.export_trend {
        crate::io::trend::write_trend_json(path, &run.fits, &run.ingest, config.gating_column)?;
    }

    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let trend = crate::io::trend::read_trend_json(&args.trend)?;

    let plot = crate::plot::render_ascii_plot_from_trend_file(
        &trend,
        args.width,
        args.height,
        args.log_scale,
    );

    println!("{plot}");
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let mut opts = crate::data::SampleOptions {
        steps: args.steps,
        base_size: args.base_size,
        growth: args.growth,
        noise: args.noise,
        zero_prob: args.zero_prob,
        seed: args.seed,
        ..crate::data::SampleOptions::default()
    };
    if !args.exponents.is_empty() {
        opts.exponents = args.exponents.clone();
        // Explicit exponents reset the default amplitudes too.
        opts.amplitudes = if args.amplitudes.is_empty() {
            vec![1.0; opts.exponents.len()]
        } else {
            args.amplitudes.clone()
        };
    } else if !args.amplitudes.is_empty() {
        opts.amplitudes = args.amplitudes.clone();
    }

    let labels = resolve_sample_labels(&args, opts.exponents.len());
    let table = crate::data::write_sample_file(&args.out, &opts, &labels)?;

    println!(
        "Wrote {}: {} rows, {} series ({}).",
        args.out.display(),
        table.n_rows(),
        table.n_series(),
        labels.join(", "),
    );
    Ok(())
}

fn resolve_sample_labels(args: &SampleArgs, n_series: usize) -> Vec<String> {
    if !args.labels.is_empty() {
        return args.labels.clone();
    }
    if n_series == DEFAULT_LABELS.len() {
        return DEFAULT_LABELS.iter().map(|s| s.to_string()).collect();
    }
    (1..=n_series).map(|i| format!("series{i}")).collect()
}

/// Build the pipeline configuration from CLI flags.
pub fn analysis_config_from_args(args: &FitArgs) -> AnalysisConfig {
    AnalysisConfig {
        input_path: args.input.clone(),
        series_labels: if args.labels.is_empty() {
            DEFAULT_LABELS.iter().map(|s| s.to_string()).collect()
        } else {
            args.labels.clone()
        },
        gating_column: args.gating_column,
        target_columns: if args.columns.is_empty() {
            None
        } else {
            Some(args.columns.clone())
        },
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        log_scale: args.log_scale,
        show_curves: !args.no_curves,
        export_results: args.export.clone(),
        export_trend: args.export_trend.clone(),
    }
}

/// Rewrite argv so `benchfit` defaults to `benchfit fit`.
///
/// Rules:
/// - `benchfit`                     -> `benchfit fit`
/// - `benchfit -i foo.dat ...`      -> `benchfit fit -i foo.dat ...`
/// - `benchfit --help/--version/-h` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("fit".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "fit" | "trend" | "plot" | "tui" | "sample");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "fit flags".
    if arg1.starts_with('-') {
        argv.insert(1, "fit".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_fit() {
        assert_eq!(rewrite_args(argv(&["benchfit"])), argv(&["benchfit", "fit"]));
    }

    #[test]
    fn leading_flag_defaults_to_fit() {
        assert_eq!(
            rewrite_args(argv(&["benchfit", "-i", "results.dat"])),
            argv(&["benchfit", "fit", "-i", "results.dat"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(argv(&["benchfit", "sample"])),
            argv(&["benchfit", "sample"])
        );
        assert_eq!(
            rewrite_args(argv(&["benchfit", "--help"])),
            argv(&["benchfit", "--help"])
        );
    }

    #[test]
    fn default_labels_are_serial_parallel() {
        let args = crate::cli::FitArgs::parse_from(["fit"]);
        let config = analysis_config_from_args(&args);
        assert_eq!(config.series_labels, vec!["serial", "parallel"]);
        assert_eq!(config.gating_column, 1);
        assert_eq!(config.input_path.to_string_lossy(), "benchmark.dat");
    }

    #[test]
    fn no_plot_wins_over_plot_default() {
        let args = crate::cli::FitArgs::parse_from(["fit", "--no-plot"]);
        let config = analysis_config_from_args(&args);
        assert!(!config.plot);
    }
}
