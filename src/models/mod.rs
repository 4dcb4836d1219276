//! Closed-form model families.
//!
//! Models are implemented as small, pure functions so that fitting code can
//! stay generic over the numeric representation.

pub mod model;

pub use model::*;
