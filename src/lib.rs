//! `curve-fit` library crate.
//!
//! Nonlinear least-squares fitting of closed-form curves (line, polynomial,
//! catenary, exponential, inverse cycloid) with derivatives computed by
//! forward-mode automatic differentiation.
//!
//! The binary (`curvefit`) is a thin wrapper around this library so that
//! core logic is testable without spawning processes.

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
