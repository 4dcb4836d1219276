//! A single curve-fitting problem: one sample set, one model.
//!
//! The cost is the plain sum of squared residuals
//!
//! ```text
//! Σ_i (model(p, x_i) - y_i)^2
//! ```
//!
//! accumulated in sample order from zero. The per-sample terms come from one
//! generic function, used with dual numbers inside `solve` (the minimizer
//! squares them itself) and with `f64` when reporting the quality of a fit.

use crate::domain::{ModelKind, SampleResidual, SampleSet};
use crate::fit::minimize::{AdScalar, MinimizeReport, MinimizerOptions, minimize};
use crate::math::Scalar;
use crate::models::predict;

/// Binds a [`SampleSet`] to a [`ModelKind`].
///
/// The cost closure built by [`CurveFitting::solve`] borrows the problem, so
/// an instance is meant to serve one `solve` call at a time.
#[derive(Debug, Clone)]
pub struct CurveFitting {
    samples: SampleSet,
    model: ModelKind,
}

impl CurveFitting {
    pub fn new(samples: SampleSet, model: ModelKind) -> Self {
        Self { samples, model }
    }

    pub fn model(&self) -> ModelKind {
        self.model
    }

    pub fn samples(&self) -> &SampleSet {
        &self.samples
    }

    /// Number of parameters the bound model expects.
    pub fn parameter_count(&self) -> usize {
        self.model.param_count()
    }

    /// Per-sample differences `model(params, x_i) - y_i`, in sample order.
    pub fn residual_terms<S: Scalar>(&self, params: &[S]) -> Vec<S> {
        self.samples
            .iter()
            .map(|(x, y)| predict(self.model, params, x) - S::from(y))
            .collect()
    }

    /// Sum of squared residuals at `params`, in the representation of `params`.
    pub fn residual<S: Scalar>(&self, params: &[S]) -> S {
        let mut total = S::zero();
        for r in self.residual_terms(params) {
            total = total + r * r;
        }
        total
    }

    /// Fit the model, starting from and writing back to `params`.
    ///
    /// Returns whether the minimizer declared convergence. `params` holds the
    /// final iterate either way.
    pub fn solve(&self, params: &mut [f64]) -> bool {
        self.solve_with(params, &MinimizerOptions::default()).converged
    }

    /// Like [`CurveFitting::solve`], with explicit options and the full report.
    pub fn solve_with(&self, params: &mut [f64], opts: &MinimizerOptions) -> MinimizeReport {
        debug_assert_eq!(params.len(), self.parameter_count());
        minimize(|p: &[AdScalar]| self.residual_terms(p), params, opts)
    }

    /// Per-sample fitted values and residuals (`y_obs - y_fit`) at `params`.
    pub fn sample_residuals(&self, params: &[f64]) -> Vec<SampleResidual> {
        self.samples
            .iter()
            .map(|(x, y_obs)| {
                let y_fit = predict(self.model, params, x);
                SampleResidual {
                    x,
                    y_obs,
                    y_fit,
                    residual: y_obs - y_fit,
                }
            })
            .collect()
    }
}
