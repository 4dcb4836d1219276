//! Numeric building blocks: the scalar contract shared by model formulas.

pub mod scalar;

pub use scalar::*;
