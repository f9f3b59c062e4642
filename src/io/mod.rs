//! Input/output helpers.
//!
//! - benchmark file ingest + validation (`ingest`)
//! - per-point results export (CSV) (`export`)
//! - trend JSON read/write (`trend`)

pub mod export;
pub mod ingest;
pub mod trend;

pub use export::*;
pub use ingest::*;
pub use trend::*;
