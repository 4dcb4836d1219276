//! Curve fitting.
//!
//! Responsibilities:
//!
//! - bind samples to a model and expose the least-squares cost (`problem`)
//! - minimize that cost with derivatives from dual numbers (`minimize`)

pub mod minimize;
pub mod problem;

pub use minimize::*;
pub use problem::*;
