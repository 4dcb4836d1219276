//! Sample file ingest.
//!
//! Each line holds either one field (`y`, with `x` taken as the zero-based
//! record index) or two comma-separated fields (`x,y`). Any other field count,
//! or a field that is not a number, stops the whole load with a format error
//! naming the offending line. There is no partial recovery.
//!
//! Fields are trimmed; blank lines are skipped by the CSV reader and do not
//! consume an index.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::domain::SampleSet;
use crate::error::AppError;

/// Load samples from a file on disk.
pub fn load_samples(path: &Path) -> Result<SampleSet, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::input(format!(
            "Failed to open data file '{}': {e}",
            path.display()
        ))
    })?;
    let samples = parse_samples(file)?;
    log::info!("loaded {} samples from {}", samples.len(), path.display());
    Ok(samples)
}

/// Parse samples from any reader.
pub fn parse_samples<R: Read>(input: R) -> Result<SampleSet, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let mut x = Vec::new();
    let mut y = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| AppError::input(format!("Failed to read data file: {e}")))?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 1);

        match record.len() {
            1 => {
                x.push(idx as f64);
                y.push(parse_field(&record[0], line)?);
            }
            2 => {
                x.push(parse_field(&record[0], line)?);
                y.push(parse_field(&record[1], line)?);
            }
            n => {
                return Err(AppError::input(format!(
                    "Bad file format at line {line}: expected 1 or 2 fields, found {n}."
                )));
            }
        }
    }

    Ok(SampleSet::new(x, y))
}

fn parse_field(field: &str, line: usize) -> Result<f64, AppError> {
    field.parse::<f64>().map_err(|_| {
        AppError::input(format!(
            "Bad file format at line {line}: '{field}' is not a number."
        ))
    })
}
