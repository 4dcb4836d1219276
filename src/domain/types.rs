//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to JSON/CSV
//! - reused by both the `fit` and `sample` commands

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// An ordered set of `(x, y)` observations.
///
/// `x` and `y` always have the same length; constructing a set from vectors of
/// different lengths is a programming error and panics.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl SampleSet {
    /// # Panics
    /// Panics if `x.len() != y.len()`.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        assert_eq!(
            x.len(),
            y.len(),
            "sample set needs as many x values as y values"
        );
        Self { x, y }
    }

    pub fn from_pairs(pairs: &[(f64, f64)]) -> Self {
        let (x, y): (Vec<f64>, Vec<f64>) = pairs.iter().copied().unzip();
        Self { x, y }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Observations in their original order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// A copy with the roles of `x` and `y` exchanged.
    ///
    /// Inverse models (e.g. the inverse cycloid) are fitted against swapped
    /// samples; the swap is the caller's job, not the model's.
    pub fn swapped(&self) -> Self {
        Self {
            x: self.y.clone(),
            y: self.x.clone(),
        }
    }

    /// `(min, max)` of the finite `x` values, if any.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        finite_range(&self.x)
    }

    /// `(min, max)` of the finite `y` values, if any.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        finite_range(&self.y)
    }
}

fn finite_range(values: &[f64]) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values.iter().filter(|v| v.is_finite()) {
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() {
        Some((min, max))
    } else {
        None
    }
}

/// A closed-form model family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelKind {
    /// `p0*x + p1`
    Line,
    /// `p0 + p1*x + ... + pn*x^n`
    Polynomial { degree: usize },
    /// `p0*cosh(-(x-p1)/p0) + p2`
    Catenary,
    /// `p0*exp(-(x-p2)/p1) + p3`
    Exponential,
    /// `p0*(θ - sin θ) + p1` with `θ = acos(1 - (x-p2)/p0)`.
    ///
    /// Fitted against swapped samples (see [`SampleSet::swapped`]).
    InverseCycloid,
}

impl ModelKind {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> String {
        match self {
            ModelKind::Line => "Line".to_string(),
            ModelKind::Polynomial { degree } => format!("Polynomial({degree})"),
            ModelKind::Catenary => "Catenary".to_string(),
            ModelKind::Exponential => "Exponential".to_string(),
            ModelKind::InverseCycloid => "Inverse-Cycloid".to_string(),
        }
    }

    /// Number of entries in this model's parameter vector.
    pub fn param_count(self) -> usize {
        match self {
            ModelKind::Line => 2,
            ModelKind::Polynomial { degree } => degree + 1,
            ModelKind::Catenary => 3,
            ModelKind::Exponential => 4,
            ModelKind::InverseCycloid => 3,
        }
    }

    /// Whether samples must be swapped before fitting this model.
    pub fn fits_swapped_samples(self) -> bool {
        matches!(self, ModelKind::InverseCycloid)
    }
}

/// Which model(s) to fit, as chosen on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ModelSpec {
    Line,
    Polynomial,
    Catenary,
    Exponential,
    InverseCycloid,
    All,
}

impl ModelSpec {
    /// Expand into concrete model kinds, in reporting order.
    pub fn kinds(self, degree: usize) -> Vec<ModelKind> {
        match self {
            ModelSpec::Line => vec![ModelKind::Line],
            ModelSpec::Polynomial => vec![ModelKind::Polynomial { degree }],
            ModelSpec::Catenary => vec![ModelKind::Catenary],
            ModelSpec::Exponential => vec![ModelKind::Exponential],
            ModelSpec::InverseCycloid => vec![ModelKind::InverseCycloid],
            ModelSpec::All => vec![
                ModelKind::Line,
                ModelKind::Polynomial { degree },
                ModelKind::Catenary,
                ModelKind::Exponential,
                ModelKind::InverseCycloid,
            ],
        }
    }
}

/// Why the minimizer stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The residuals are exactly zero.
    ResidualsZero,
    /// Residuals are orthogonal to the Jacobian columns (gradient tolerance).
    Orthogonal,
    /// Relative cost reduction or parameter change fell below tolerance.
    Converged,
    /// Evaluation budget exhausted.
    LostPatience,
    /// Tolerances are too small for any further progress.
    NoImprovementPossible,
    /// Non-finite values appeared during the run.
    Numerical,
    /// Residuals were not finite at the starting point.
    NonFiniteStart,
    /// No parameters, no residuals or mismatched dimensions.
    InvalidProblem,
}

impl Termination {
    pub fn is_converged(self) -> bool {
        matches!(
            self,
            Termination::ResidualsZero | Termination::Orthogonal | Termination::Converged
        )
    }
}

/// A per-sample fitted value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleResidual {
    pub x: f64,
    pub y_obs: f64,
    pub y_fit: f64,
    pub residual: f64,
}

/// Outcome of fitting one model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitOutcome {
    pub model: ModelKind,
    pub display_name: String,
    #[serde(with = "crate::domain::nonfinite::vec")]
    pub initial: Vec<f64>,
    #[serde(with = "crate::domain::nonfinite::vec")]
    pub params: Vec<f64>,
    /// Sum of squared residuals at `params`, evaluated with plain `f64`.
    #[serde(with = "crate::domain::nonfinite")]
    pub residual: f64,
    #[serde(with = "crate::domain::nonfinite")]
    pub rmse: f64,
    pub n: usize,
    pub converged: bool,
    /// Residual evaluations spent by the minimizer.
    pub evaluations: usize,
    pub termination: Termination,
    /// True if the model was fitted against swapped samples.
    pub swapped: bool,
}

/// JSON export of a whole fitting run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitSummaryFile {
    pub tool: String,
    pub data_file: String,
    pub n_samples: usize,
    pub fits: Vec<FitOutcome>,
}

/// A `fit` run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub data_path: PathBuf,
    pub model_spec: ModelSpec,
    pub degree: usize,
    /// Explicit initial guess (single-model runs only).
    pub initial: Option<Vec<f64>>,

    /// Minimizer evaluation budget factor.
    pub patience: usize,
    /// Overrides both the cost and parameter tolerances.
    pub tol: Option<f64>,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_results: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

/// A `sample` run's configuration.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub model: ModelKind,
    pub params: Vec<f64>,
    pub count: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub noise: f64,
    pub seed: u64,
    pub out: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_counts() {
        assert_eq!(ModelKind::Line.param_count(), 2);
        assert_eq!(ModelKind::Polynomial { degree: 0 }.param_count(), 1);
        assert_eq!(ModelKind::Polynomial { degree: 4 }.param_count(), 5);
        assert_eq!(ModelKind::Catenary.param_count(), 3);
        assert_eq!(ModelKind::Exponential.param_count(), 4);
        assert_eq!(ModelKind::InverseCycloid.param_count(), 3);
    }

    #[test]
    #[should_panic]
    fn mismatched_lengths_panic() {
        let _ = SampleSet::new(vec![0.0, 1.0], vec![1.0]);
    }

    #[test]
    fn swapped_exchanges_axes() {
        let s = SampleSet::from_pairs(&[(0.0, 10.0), (1.0, 20.0)]);
        let t = s.swapped();
        assert_eq!(t.x(), &[10.0, 20.0]);
        assert_eq!(t.y(), &[0.0, 1.0]);
        assert_eq!(t.swapped(), s);
    }

    #[test]
    fn ranges_ignore_non_finite_values() {
        let s = SampleSet::new(vec![3.0, f64::NAN, -1.0], vec![0.0, 2.0, 1.0]);
        assert_eq!(s.x_range(), Some((-1.0, 3.0)));
        assert_eq!(s.y_range(), Some((0.0, 2.0)));
        assert_eq!(SampleSet::new(vec![], vec![]).x_range(), None);
    }

    #[test]
    fn all_spec_expands_every_family() {
        let kinds = ModelSpec::All.kinds(3);
        assert_eq!(kinds.len(), 5);
        assert!(kinds.contains(&ModelKind::Polynomial { degree: 3 }));
        assert!(ModelKind::InverseCycloid.fits_swapped_samples());
        assert!(!ModelKind::Line.fits_swapped_samples());
    }

    #[test]
    fn model_kind_json_shape() {
        let json = serde_json::to_string(&ModelKind::Polynomial { degree: 2 }).unwrap();
        assert_eq!(json, r#"{"kind":"polynomial","degree":2}"#);
        let back: ModelKind = serde_json::from_str(r#"{"kind":"inverse_cycloid"}"#).unwrap();
        assert_eq!(back, ModelKind::InverseCycloid);
    }
}
