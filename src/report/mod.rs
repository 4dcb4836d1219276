//! Reporting utilities: fit outcomes and formatted terminal output.

pub mod format;

pub use format::*;

use crate::domain::{FitOutcome, ModelKind};
use crate::fit::{CurveFitting, MinimizeReport};

/// Summarize a finished fit, re-evaluating the residual with plain `f64`.
pub fn build_outcome(
    problem: &CurveFitting,
    initial: Vec<f64>,
    params: Vec<f64>,
    report: &MinimizeReport,
) -> FitOutcome {
    let model: ModelKind = problem.model();
    let residual = problem.residual(&params);
    let n = problem.samples().len();
    let rmse = if n > 0 { (residual / n as f64).sqrt() } else { f64::NAN };

    FitOutcome {
        model,
        display_name: model.display_name(),
        initial,
        params,
        residual,
        rmse,
        n,
        converged: report.converged,
        evaluations: report.evaluations,
        termination: report.termination,
        swapped: model.fits_swapped_samples(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SampleSet;
    use crate::fit::MinimizerOptions;

    #[test]
    fn outcome_reports_plain_residual_and_rmse() {
        let problem = CurveFitting::new(
            SampleSet::from_pairs(&[(0.0, 1.0), (1.0, 3.0), (2.0, 6.0), (3.0, 7.0)]),
            ModelKind::Line,
        );
        let initial = vec![1.0, 1.0];
        let mut params = initial.clone();
        let report = problem.solve_with(&mut params, &MinimizerOptions::default());

        let outcome = build_outcome(&problem, initial, params.clone(), &report);
        assert!(outcome.converged);
        assert_eq!(outcome.n, 4);
        assert_eq!(outcome.residual, problem.residual(&params));
        assert!((outcome.rmse - (outcome.residual / 4.0).sqrt()).abs() < 1e-15);
        // Least squares line through the points: slope 2.1, intercept 1.1 -> SSE 0.7
        assert!((outcome.params[0] - 2.1).abs() < 1e-8);
        assert!((outcome.params[1] - 1.1).abs() < 1e-8);
        assert!((outcome.residual - 0.7).abs() < 1e-10);
    }
}
