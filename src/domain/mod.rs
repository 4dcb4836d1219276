//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the observation container (`SampleSet`)
//! - model families and CLI model selection (`ModelKind`, `ModelSpec`)
//! - fit outputs (`FitOutcome`, `SampleResidual`, `FitSummaryFile`)
//! - run configuration (`FitConfig`, `SampleConfig`)
//! - JSON helpers for NaN/infinite fit values (`nonfinite`)

pub mod nonfinite;
pub mod types;

pub use types::*;
