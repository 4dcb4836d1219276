//! Export fit results and generated samples to CSV.
//!
//! The exports are meant to be easy to consume in spreadsheets or downstream
//! scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::domain::{FitOutcome, SampleResidual, SampleSet};
use crate::error::AppError;

/// One fitted model paired with its per-sample values.
pub type FittedRows = (FitOutcome, Vec<SampleResidual>);

#[derive(Serialize)]
struct ResultRow<'a> {
    model: &'a str,
    x: f64,
    y_obs: f64,
    y_fit: f64,
    residual: f64,
}

/// Write per-sample results for every fitted model to a CSV file.
///
/// `rows` pairs each outcome with the residuals computed in the coordinates
/// the model was fitted in (swapped for inverse models).
pub fn write_results_csv(path: &Path, rows: &[FittedRows]) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::internal(format!(
            "Failed to create export CSV '{}': {e}",
            path.display()
        ))
    })?;
    write_results(file, rows)
}

fn write_results<W: Write>(out: W, rows: &[FittedRows]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(out);
    for (outcome, residuals) in rows {
        for r in residuals {
            writer
                .serialize(ResultRow {
                    model: &outcome.display_name,
                    x: r.x,
                    y_obs: r.y_obs,
                    y_fit: r.y_fit,
                    residual: r.residual,
                })
                .map_err(|e| {
                    AppError::internal(format!("Failed to write export CSV row: {e}"))
                })?;
        }
    }
    writer
        .flush()
        .map_err(|e| AppError::internal(format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

/// Write samples as headerless `x,y` lines, readable by the ingest.
pub fn write_samples<W: Write>(out: W, samples: &SampleSet) -> Result<(), AppError> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    for (x, y) in samples.iter() {
        writer
            .write_record([x.to_string(), y.to_string()])
            .map_err(|e| AppError::internal(format!("Failed to write samples: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::internal(format!("Failed to flush samples: {e}")))?;
    Ok(())
}
