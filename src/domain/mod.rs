//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the rectangular benchmark table (`BenchmarkTable`)
//! - run configuration (`AnalysisConfig`)
//! - fit outputs (`TrendFit`, `SeriesFit`, `FitQuality`)
//! - the portable trend JSON schema (`TrendFile`)

pub mod types;

pub use types::*;
