//! Synthetic benchmark data generation.

pub mod sample;

pub use sample::*;
