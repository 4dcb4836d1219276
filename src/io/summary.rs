//! Read/write the JSON fit summary.
//!
//! The summary is the portable record of a run: which file was fitted, and
//! for every model its initial guess, fitted parameters, residual and
//! convergence details. The schema is `domain::FitSummaryFile`.

use std::fs::File;
use std::path::Path;

use crate::domain::{FitOutcome, FitSummaryFile};
use crate::error::AppError;

/// Write a summary JSON file.
pub fn write_summary_json(
    path: &Path,
    data_file: &Path,
    n_samples: usize,
    fits: &[FitOutcome],
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::internal(format!(
            "Failed to create summary JSON '{}': {e}",
            path.display()
        ))
    })?;

    let summary = FitSummaryFile {
        tool: "curvefit".to_string(),
        data_file: data_file.display().to_string(),
        n_samples,
        fits: fits.to_vec(),
    };

    serde_json::to_writer_pretty(file, &summary)
        .map_err(|e| AppError::internal(format!("Failed to write summary JSON: {e}")))?;

    Ok(())
}

/// Read a summary JSON file.
pub fn read_summary_json(path: &Path) -> Result<FitSummaryFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::input(format!(
            "Failed to open summary JSON '{}': {e}",
            path.display()
        ))
    })?;
    let summary: FitSummaryFile = serde_json::from_reader(file)
        .map_err(|e| AppError::input(format!("Invalid summary JSON: {e}")))?;
    Ok(summary)
}
