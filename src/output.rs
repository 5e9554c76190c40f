//! Output formatting and persistence for grade reports.
//!
//! Supports pretty-printing, JSON files, and CSV append of per-subject rows.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::grading::types::{GradeReport, GradedSubject};
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty(report: &GradeReport) {
    debug!("{:#?}", report);
}

/// Logs a report as pretty-printed JSON.
pub fn print_json(report: &GradeReport) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Writes a report to `path` as pretty-printed JSON, replacing any existing file.
pub fn write_json(path: &str, report: &GradeReport) -> Result<()> {
    let body = serde_json::to_vec_pretty(report)?;
    std::fs::write(path, body).with_context(|| format!("failed to write report to {path}"))?;
    debug!(path, "Report written");
    Ok(())
}

/// Appends one CSV row per graded subject.
///
/// Creates the file with headers if it does not already exist.
pub fn append_records(path: &str, rows: &[GradedSubject]) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, rows = rows.len(), "Appending CSV records");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}
