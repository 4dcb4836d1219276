//! Least-squares minimization through the `levenberg-marquardt` crate.
//!
//! The caller supplies the residual vector as a closure over dual numbers.
//! Residual values come from a pass with no derivative seeded; column `j` of
//! the Jacobian comes from a pass with parameter `j` seeded. No derivative is
//! ever written by hand.
//!
//! A non-finite residual at the starting point ends the call before the
//! solver runs, since there is nothing to step back to. During the run the
//! best finite point evaluated is tracked, and that point is written back if
//! the solver stops somewhere worse.

use std::cell::RefCell;

use levenberg_marquardt::{LeastSquaresProblem, LevenbergMarquardt, TerminationReason};
use nalgebra::storage::Owned;
use nalgebra::{DMatrix, DVector, Dyn};
use num_dual::Dual64;

use crate::domain::Termination;

/// Differentiable scalar used for solving.
pub type AdScalar = Dual64;

/// Stopping rules handed to [`LevenbergMarquardt`].
#[derive(Debug, Clone)]
pub struct MinimizerOptions {
    /// Residual evaluations are capped at `patience * (n + 1)`.
    pub patience: usize,
    /// Relative reduction of the cost below which the fit stops.
    pub ftol: f64,
    /// Relative change of the parameters below which the fit stops.
    pub xtol: f64,
    /// Orthogonality between residuals and Jacobian columns below which the fit stops.
    pub gtol: f64,
}

impl Default for MinimizerOptions {
    fn default() -> Self {
        let tol = 30.0 * f64::EPSILON;
        Self {
            patience: 100,
            ftol: tol,
            xtol: tol,
            gtol: tol,
        }
    }
}

/// What happened during a [`minimize`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimizeReport {
    pub converged: bool,
    /// Residual evaluations spent by the solver.
    pub evaluations: usize,
    /// Sum of squared residuals at the final iterate.
    pub cost: f64,
    pub termination: Termination,
}

/// Adapter between a residual closure and [`LeastSquaresProblem`].
struct ResidualProblem<'a, F> {
    residuals: &'a F,
    params: DVector<f64>,
    best: RefCell<Option<(f64, DVector<f64>)>>,
}

impl<'a, F> ResidualProblem<'a, F>
where
    F: Fn(&[AdScalar]) -> Vec<AdScalar>,
{
    fn new(residuals: &'a F, params: &[f64]) -> Self {
        Self {
            residuals,
            params: DVector::from_column_slice(params),
            best: RefCell::new(None),
        }
    }

    fn values(&self) -> DVector<f64> {
        let plain: Vec<AdScalar> = self.params.iter().map(|&v| AdScalar::from(v)).collect();
        let r: Vec<f64> = (self.residuals)(&plain).iter().map(|d| d.re).collect();
        DVector::from_vec(r)
    }

    fn remember(&self, r: &DVector<f64>) {
        let cost = r.norm_squared();
        if !cost.is_finite() {
            return;
        }
        let mut best = self.best.borrow_mut();
        let improved = match best.as_ref() {
            Some((best_cost, _)) => cost < *best_cost,
            None => true,
        };
        if improved {
            *best = Some((cost, self.params.clone()));
        }
    }
}

impl<F> LeastSquaresProblem<f64, Dyn, Dyn> for ResidualProblem<'_, F>
where
    F: Fn(&[AdScalar]) -> Vec<AdScalar>,
{
    type ResidualStorage = Owned<f64, Dyn>;
    type JacobianStorage = Owned<f64, Dyn, Dyn>;
    type ParameterStorage = Owned<f64, Dyn>;

    fn set_params(&mut self, x: &DVector<f64>) {
        self.params.copy_from(x);
    }

    fn params(&self) -> DVector<f64> {
        self.params.clone()
    }

    fn residuals(&self) -> Option<DVector<f64>> {
        let r = self.values();
        self.remember(&r);
        Some(r)
    }

    fn jacobian(&self) -> Option<DMatrix<f64>> {
        let n = self.params.len();
        let mut columns = Vec::with_capacity(n);
        for j in 0..n {
            let seeded: Vec<AdScalar> = self
                .params
                .iter()
                .enumerate()
                .map(|(k, &v)| AdScalar::new(v, if k == j { 1.0 } else { 0.0 }))
                .collect();
            let column: Vec<f64> = (self.residuals)(&seeded).iter().map(|d| d.eps).collect();
            columns.push(DVector::from_vec(column));
        }
        if columns.is_empty() {
            return Some(DMatrix::zeros(self.values().len(), 0));
        }
        Some(DMatrix::from_columns(&columns))
    }
}

/// Minimize the sum of squares of `residuals`, starting from and writing back to `params`.
///
/// `params` is overwritten even when the call does not converge; in that case
/// it holds the best point found.
pub fn minimize<F>(residuals: F, params: &mut [f64], opts: &MinimizerOptions) -> MinimizeReport
where
    F: Fn(&[AdScalar]) -> Vec<AdScalar>,
{
    let problem = ResidualProblem::new(&residuals, params);
    let start_cost = problem.values().norm_squared();
    if !start_cost.is_finite() {
        log::debug!("non-finite residuals at start: cost={start_cost}");
        return MinimizeReport {
            converged: false,
            evaluations: 0,
            cost: start_cost,
            termination: Termination::NonFiniteStart,
        };
    }

    let solver = LevenbergMarquardt::new()
        .with_patience(opts.patience)
        .with_ftol(opts.ftol)
        .with_xtol(opts.xtol)
        .with_gtol(opts.gtol);
    let (problem, report) = solver.minimize(problem);

    let termination = termination_from(&report.termination);
    let mut x = problem.params();
    let mut cost = problem.values().norm_squared();
    if let Some((best_cost, best_x)) = problem.best.into_inner() {
        if !(cost <= best_cost) {
            cost = best_cost;
            x = best_x;
        }
    }

    log::debug!(
        "levenberg-marquardt stopped: {:?} after {} evaluations, cost={cost:.6e}",
        report.termination,
        report.number_of_evaluations
    );

    params.copy_from_slice(x.as_slice());

    MinimizeReport {
        converged: report.termination.was_successful(),
        evaluations: report.number_of_evaluations,
        cost,
        termination,
    }
}

fn termination_from(reason: &TerminationReason) -> Termination {
    match reason {
        TerminationReason::ResidualsZero => Termination::ResidualsZero,
        TerminationReason::Orthogonal => Termination::Orthogonal,
        TerminationReason::Converged { .. } => Termination::Converged,
        TerminationReason::LostPatience => Termination::LostPatience,
        TerminationReason::NoImprovementPossible(..) => Termination::NoImprovementPossible,
        TerminationReason::Numerical(..) => Termination::Numerical,
        _ => Termination::InvalidProblem,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rosenbrock(p: &[AdScalar]) -> Vec<AdScalar> {
        vec![
            AdScalar::from(1.0) - p[0],
            AdScalar::from(10.0) * (p[1] - p[0] * p[0]),
        ]
    }

    #[test]
    fn jacobian_columns_come_from_seeded_passes() {
        // r = [p0 + 2 p1, p0 * p1]
        let residuals = |p: &[AdScalar]| vec![p[0] + AdScalar::from(2.0) * p[1], p[0] * p[1]];
        let problem = ResidualProblem::new(&residuals, &[3.0, -1.0]);

        let r = problem.values();
        assert_eq!(r.as_slice(), &[1.0, -3.0]);

        let j = problem.jacobian().unwrap();
        assert_eq!(j.shape(), (2, 2));
        assert_eq!(j[(0, 0)], 1.0);
        assert_eq!(j[(0, 1)], 2.0);
        assert_eq!(j[(1, 0)], -1.0);
        assert_eq!(j[(1, 1)], 3.0);
    }

    #[test]
    fn solves_linear_system_exactly() {
        // p0 + p1 = 3, p0 - p1 = 1
        let residuals = |p: &[AdScalar]| {
            vec![p[0] + p[1] - AdScalar::from(3.0), p[0] - p[1] - AdScalar::from(1.0)]
        };
        let mut p = [0.0, 0.0];
        let report = minimize(residuals, &mut p, &MinimizerOptions::default());
        assert!(report.converged, "{report:?}");
        assert!((p[0] - 2.0).abs() < 1e-10);
        assert!((p[1] - 1.0).abs() < 1e-10);
        assert!(report.cost < 1e-20);
    }

    #[test]
    fn minimizes_rosenbrock() {
        let mut p = [-1.2, 1.0];
        let report = minimize(rosenbrock, &mut p, &MinimizerOptions::default());
        assert!(report.converged, "{report:?}");
        assert!((p[0] - 1.0).abs() < 1e-6);
        assert!((p[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn non_finite_start_is_reported() {
        let bad = |p: &[AdScalar]| vec![p[0] / AdScalar::from(0.0)];
        let mut p = [1.0];
        let report = minimize(bad, &mut p, &MinimizerOptions::default());
        assert!(!report.converged);
        assert_eq!(report.termination, Termination::NonFiniteStart);
        assert_eq!(report.evaluations, 0);
        assert_eq!(p, [1.0]);
    }

    #[test]
    fn evaluation_budget_is_respected() {
        let mut p = [-1.2, 1.0];
        let opts = MinimizerOptions {
            patience: 1,
            ..MinimizerOptions::default()
        };
        let report = minimize(rosenbrock, &mut p, &opts);
        assert!(!report.converged, "{report:?}");
        assert_eq!(report.termination, Termination::LostPatience);
        // Never worse than the start: 2.2^2 + 4.4^2.
        assert!(report.cost <= 24.2 + 1e-9, "{report:?}");
    }
}
