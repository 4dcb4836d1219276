//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads samples and fits the requested models
//! - prints reports/plots
//! - writes optional exports

use std::fs::File;
use std::io::Write;

use clap::Parser;

use crate::cli::{Command, FitArgs, SampleArgs, ShowArgs};
use crate::domain::{FitConfig, SampleConfig, SampleResidual};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `curvefit` binary.
pub fn run() -> Result<(), AppError> {
    init_logging();

    // `curvefit data.csv` behaves like `curvefit fit data.csv`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Sample(args) => handle_sample(args),
        Command::Show(args) => handle_show(args),
    }
}

fn init_logging() {
    // Ignore the error if a logger is already installed.
    let env = env_logger::Env::default().default_filter_or("warn");
    let _ = env_logger::Builder::from_env(env).try_init();
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args)?;
    let run = pipeline::run_fit(&config)?;

    println!("{}", crate::report::format_dataset(&config.data_path, &run.samples));
    for fit in &run.fits {
        println!("{}", crate::report::format_outcome(&fit.outcome));
        if config.plot {
            let plot = crate::plot::render_ascii_plot(
                fit.problem.samples(),
                fit.outcome.model,
                &fit.outcome.params,
                config.plot_width,
                config.plot_height,
            );
            println!("{plot}");
        }
    }

    let outcomes = run.outcomes();
    if outcomes.len() > 1 {
        println!("{}", crate::report::format_comparison(&outcomes));
    }

    // Optional exports.
    if let Some(path) = &config.export_results {
        let rows: Vec<(_, Vec<SampleResidual>)> = run
            .fits
            .iter()
            .map(|f| (f.outcome.clone(), f.problem.sample_residuals(&f.outcome.params)))
            .collect();
        crate::io::write_results_csv(path, &rows)?;
        log::info!("wrote per-sample results to {}", path.display());
    }
    if let Some(path) = &config.export_json {
        crate::io::write_summary_json(path, &config.data_path, run.samples.len(), &outcomes)?;
        log::info!("wrote fit summary to {}", path.display());
    }

    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = sample_config_from_args(&args)?;
    let samples = crate::data::generate_samples(&config)?;

    match &config.out {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                AppError::internal(format!("Failed to create '{}': {e}", path.display()))
            })?;
            crate::io::write_samples(file, &samples)?;
            log::info!("wrote {} samples to {}", samples.len(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            crate::io::write_samples(&mut lock, &samples)?;
            lock.flush()
                .map_err(|e| AppError::internal(format!("Failed to flush stdout: {e}")))?;
        }
    }
    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let summary = crate::io::read_summary_json(&args.summary)?;

    println!("Data file: {} ({} samples)", summary.data_file, summary.n_samples);
    for fit in &summary.fits {
        println!("{}", crate::report::format_outcome(fit));
    }
    if summary.fits.len() > 1 {
        println!("{}", crate::report::format_comparison(&summary.fits));
    }
    Ok(())
}

pub fn fit_config_from_args(args: &FitArgs) -> Result<FitConfig, AppError> {
    if args.patience == 0 {
        return Err(AppError::input("--patience must be at least 1."));
    }
    if let Some(tol) = args.tol {
        if !(tol.is_finite() && tol >= 0.0) {
            return Err(AppError::input("--tol must be a non-negative number."));
        }
    }

    Ok(FitConfig {
        data_path: args.data.clone(),
        model_spec: args.model,
        degree: args.degree,
        initial: args.init.clone(),
        patience: args.patience,
        tol: args.tol,
        plot: args.plot,
        plot_width: args.width,
        plot_height: args.height,
        export_results: args.export.clone(),
        export_json: args.export_json.clone(),
    })
}

pub fn sample_config_from_args(args: &SampleArgs) -> Result<SampleConfig, AppError> {
    let kinds = args.model.kinds(args.degree);
    let [model] = kinds.as_slice() else {
        return Err(AppError::input("sample needs a single --model (not 'all')."));
    };

    Ok(SampleConfig {
        model: *model,
        params: args.params.clone(),
        count: args.count,
        x_min: args.x_min,
        x_max: args.x_max,
        noise: args.noise,
        seed: args.seed,
        out: args.out.clone(),
    })
}

/// Rewrite argv so a bare data file defaults to `fit`.
///
/// Rules:
/// - `curvefit data.csv ...`         -> `curvefit fit data.csv ...`
/// - `curvefit --help/--version/-h`  -> unchanged
/// - `curvefit fit|sample|show ...`  -> unchanged
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    let is_subcommand = matches!(arg1.as_str(), "fit" | "sample" | "show");
    if is_top_level_help_or_version || is_subcommand || arg1.starts_with('-') {
        return argv;
    }

    argv.insert(1, "fit".to_string());
    argv
}
