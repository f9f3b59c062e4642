//! Mathematical utilities: the least-squares solver behind the trend fit.

pub mod ols;

pub use ols::*;
