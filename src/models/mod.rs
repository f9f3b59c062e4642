//! Power-law model evaluation.
//!
//! Models are implemented as small, pure functions so that fitting/plotting
//! code can stay generic.

pub mod model;

pub use model::*;
