//! Shared "fit pipeline" logic.
//!
//! Keeping this in one place avoids mixing the core workflow
//! (load samples -> per model: initial guess -> solve -> outcome)
//! with presentation, which lives in `app` (printing, plots, exports).

use crate::domain::{FitConfig, FitOutcome, SampleSet};
use crate::error::AppError;
use crate::fit::{CurveFitting, MinimizerOptions};
use crate::models::initial_guess;
use crate::report::build_outcome;

/// One fitted model together with the problem it was fitted on.
#[derive(Debug, Clone)]
pub struct ModelRun {
    pub problem: CurveFitting,
    pub outcome: FitOutcome,
}

/// All computed outputs of a single `curvefit fit` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub samples: SampleSet,
    pub fits: Vec<ModelRun>,
}

impl RunOutput {
    pub fn outcomes(&self) -> Vec<FitOutcome> {
        self.fits.iter().map(|f| f.outcome.clone()).collect()
    }
}

/// Load the data file named in `config` and fit every requested model.
pub fn run_fit(config: &FitConfig) -> Result<RunOutput, AppError> {
    let samples = crate::io::load_samples(&config.data_path)?;
    run_fit_with_samples(config, samples)
}

/// Fit every requested model against already loaded samples.
pub fn run_fit_with_samples(config: &FitConfig, samples: SampleSet) -> Result<RunOutput, AppError> {
    if samples.is_empty() {
        return Err(AppError::no_data(format!(
            "No samples found in '{}'.",
            config.data_path.display()
        )));
    }

    let kinds = config.model_spec.kinds(config.degree);
    if config.initial.is_some() && kinds.len() != 1 {
        return Err(AppError::input("--init requires a single --model."));
    }

    let mut opts = MinimizerOptions {
        patience: config.patience,
        ..MinimizerOptions::default()
    };
    if let Some(tol) = config.tol {
        opts.ftol = tol;
        opts.xtol = tol;
    }

    let mut fits = Vec::with_capacity(kinds.len());
    for kind in kinds {
        let data = if kind.fits_swapped_samples() {
            samples.swapped()
        } else {
            samples.clone()
        };
        let problem = CurveFitting::new(data, kind);

        let initial = match &config.initial {
            Some(init) => {
                if init.len() != problem.parameter_count() {
                    return Err(AppError::input(format!(
                        "--init has {} values but {} expects {}.",
                        init.len(),
                        kind.display_name(),
                        problem.parameter_count()
                    )));
                }
                init.clone()
            }
            None => initial_guess(kind, problem.samples()),
        };

        if samples.len() < problem.parameter_count() {
            log::warn!(
                "{}: {} samples for {} parameters, fit is underdetermined",
                kind.display_name(),
                samples.len(),
                problem.parameter_count()
            );
        }

        let mut params = initial.clone();
        let report = problem.solve_with(&mut params, &opts);
        if report.converged {
            log::info!(
                "{}: converged after {} evaluations ({:?})",
                kind.display_name(),
                report.evaluations,
                report.termination
            );
        } else {
            log::warn!(
                "{}: did not converge after {} evaluations ({:?})",
                kind.display_name(),
                report.evaluations,
                report.termination
            );
        }

        let outcome = build_outcome(&problem, initial, params, &report);
        fits.push(ModelRun { problem, outcome });
    }

    Ok(RunOutput { samples, fits })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::domain::{ModelKind, ModelSpec};

    fn config(model_spec: ModelSpec, initial: Option<Vec<f64>>) -> FitConfig {
        FitConfig {
            data_path: PathBuf::from("data.csv"),
            model_spec,
            degree: 2,
            initial,
            patience: 100,
            tol: None,
            plot: false,
            plot_width: 80,
            plot_height: 20,
            export_results: None,
            export_json: None,
        }
    }

    fn line_samples() -> SampleSet {
        SampleSet::from_pairs(&[(0.0, 1.0), (1.0, 3.0), (2.0, 5.0), (3.0, 7.0)])
    }

    #[test]
    fn all_models_are_fitted_in_order() {
        let run = run_fit_with_samples(&config(ModelSpec::All, None), line_samples()).unwrap();
        let kinds: Vec<ModelKind> = run.fits.iter().map(|f| f.outcome.model).collect();
        assert_eq!(
            kinds,
            vec![
                ModelKind::Line,
                ModelKind::Polynomial { degree: 2 },
                ModelKind::Catenary,
                ModelKind::Exponential,
                ModelKind::InverseCycloid,
            ]
        );

        let line = &run.fits[0].outcome;
        assert!(line.converged);
        assert_eq!(line.initial, vec![1.0, 1.0]);
        assert!((line.params[0] - 2.0).abs() < 1e-6);
        assert!((line.params[1] - 1.0).abs() < 1e-6);

        // Inverse cycloid is fitted on swapped samples.
        let cycloid = &run.fits[4];
        assert!(cycloid.outcome.swapped);
        assert_eq!(cycloid.problem.samples().x(), line_samples().y());
    }

    #[test]
    fn hanging_catenary_fits_without_explicit_guess() {
        let pairs: Vec<(f64, f64)> = (0..=38)
            .map(|i| {
                let x = i as f64;
                (x, -8.0 * ((x - 19.0) / 8.0).cosh() + 40.0)
            })
            .collect();
        let cfg = config(ModelSpec::Catenary, None);
        let run = run_fit_with_samples(&cfg, SampleSet::from_pairs(&pairs)).unwrap();

        let outcome = &run.fits[0].outcome;
        assert!(outcome.converged, "{outcome:?}");
        assert!((outcome.params[0] + 8.0).abs() < 1e-5, "{outcome:?}");
        assert!((outcome.params[1] - 19.0).abs() < 1e-5, "{outcome:?}");
        assert!((outcome.params[2] - 40.0).abs() < 1e-5, "{outcome:?}");
        assert!(outcome.residual < 1e-12, "{outcome:?}");
    }

    #[test]
    fn explicit_initial_guess_is_used() {
        let cfg = config(ModelSpec::Line, Some(vec![0.0, 0.0]));
        let run = run_fit_with_samples(&cfg, line_samples()).unwrap();
        assert_eq!(run.fits.len(), 1);
        assert_eq!(run.fits[0].outcome.initial, vec![0.0, 0.0]);
        assert!(run.fits[0].outcome.converged);
    }

    #[test]
    fn initial_guess_arity_is_checked() {
        let cfg = config(ModelSpec::Catenary, Some(vec![1.0, 2.0]));
        let err = run_fit_with_samples(&cfg, line_samples()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn initial_guess_needs_single_model() {
        let cfg = config(ModelSpec::All, Some(vec![1.0, 2.0]));
        let err = run_fit_with_samples(&cfg, line_samples()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn empty_data_is_an_error() {
        let empty = SampleSet::new(vec![], vec![]);
        let err = run_fit_with_samples(&config(ModelSpec::Line, None), empty).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
