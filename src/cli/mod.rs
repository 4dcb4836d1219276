//! Command-line parsing for the curve fitter.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the modeling/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::ModelSpec;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "curvefit",
    version,
    about = "Nonlinear least-squares curve fitting"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit one or more models to a data file and print the fitted parameters.
    ///
    /// `curvefit DATA_FILE` is shorthand for `curvefit fit DATA_FILE`.
    Fit(FitArgs),
    /// Generate synthetic samples from a known model.
    Sample(SampleArgs),
    /// Print a summary JSON written by `curvefit fit --export-json`.
    Show(ShowArgs),
}

/// Options for fitting.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Data file: one `y` per line (x = line index) or `x,y` per line.
    #[arg(value_name = "DATA_FILE")]
    pub data: PathBuf,

    /// Which model(s) to fit.
    #[arg(short = 'm', long, value_enum, default_value_t = ModelSpec::All)]
    pub model: ModelSpec,

    /// Polynomial degree (used by `--model polynomial` and `all`).
    #[arg(long, default_value_t = 2)]
    pub degree: usize,

    /// Comma-separated initial guess (single-model runs only).
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub init: Option<Vec<f64>>,

    /// Minimizer budget: at most `patience * (params + 1)` evaluations.
    #[arg(long, default_value_t = 100)]
    pub patience: usize,

    /// Relative cost and parameter tolerance (default: 30 machine epsilons).
    #[arg(long)]
    pub tol: Option<f64>,

    /// Render an ASCII plot per fitted model.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export per-sample fitted values to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the fit summary to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,
}

/// Options for synthetic sample generation.
#[derive(Debug, Parser, Clone)]
pub struct SampleArgs {
    /// Model to sample from (`all` is not accepted).
    #[arg(short = 'm', long, value_enum)]
    pub model: ModelSpec,

    /// Polynomial degree for `--model polynomial`.
    #[arg(long, default_value_t = 2)]
    pub degree: usize,

    /// Comma-separated true parameters.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
    pub params: Vec<f64>,

    /// Number of samples.
    #[arg(short = 'n', long, default_value_t = 50)]
    pub count: usize,

    /// Smallest x.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub x_min: f64,

    /// Largest x.
    #[arg(long, default_value_t = 10.0, allow_hyphen_values = true)]
    pub x_max: f64,

    /// Standard deviation of additive Gaussian noise on y.
    #[arg(long, default_value_t = 0.0)]
    pub noise: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Write samples here instead of stdout.
    #[arg(short = 'o', long)]
    pub out: Option<PathBuf>,
}

/// Options for printing a saved summary.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Summary JSON produced by `curvefit fit --export-json`.
    #[arg(value_name = "JSON")]
    pub summary: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_defaults() {
        let cli = Cli::parse_from(["curvefit", "fit", "data.csv"]);
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        assert_eq!(args.data, PathBuf::from("data.csv"));
        assert_eq!(args.model, ModelSpec::All);
        assert_eq!(args.degree, 2);
        assert!(args.init.is_none());
        assert!(!args.plot);
    }

    #[test]
    fn fit_parses_model_and_negative_init() {
        let cli = Cli::parse_from([
            "curvefit",
            "fit",
            "data.csv",
            "--model",
            "inverse-cycloid",
            "--init",
            "-1.5,2,0.25",
        ]);
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        assert_eq!(args.model, ModelSpec::InverseCycloid);
        assert_eq!(args.init, Some(vec![-1.5, 2.0, 0.25]));
    }

    #[test]
    fn sample_requires_params() {
        assert!(Cli::try_parse_from(["curvefit", "sample", "--model", "line"]).is_err());
        let cli = Cli::parse_from([
            "curvefit", "sample", "-m", "line", "--params", "2,1", "-n", "3",
        ]);
        let Command::Sample(args) = cli.command else {
            panic!("expected sample");
        };
        assert_eq!(args.params, vec![2.0, 1.0]);
        assert_eq!(args.count, 3);
    }
}
