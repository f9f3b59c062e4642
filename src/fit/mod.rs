//! Trend fitting orchestration.
//!
//! Responsibilities:
//!
//! - select the retained row set from the gating column
//! - log-transform and fit each target column (parallel)
//! - attach labels and quality diagnostics to each fit

pub mod trend;

pub use trend::*;
