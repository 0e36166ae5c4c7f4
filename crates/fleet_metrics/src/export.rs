//! Metrics table export.
//!
//! The combined (or per-run) table goes out as CSV for downstream pandas
//! consumers, and as JSON or Parquet for everything else. Column set and
//! names are a stable contract; see `csv::COLUMNS`.

use std::fs::File;
use std::path::Path;

use crate::pipeline::MetricsTable;

#[path = "export/csv.rs"]
mod csv;
#[path = "export/json.rs"]
mod json;
#[path = "export/parquet.rs"]
mod parquet;

fn create_output_file(
    table: &MetricsTable,
    path: impl AsRef<Path>,
) -> Result<File, Box<dyn std::error::Error>> {
    if table.is_empty() {
        return Err("no metrics rows to export".into());
    }
    Ok(File::create(path)?)
}

/// Export a metrics table to CSV.
///
/// # Errors
///
/// Returns an error if the table is empty or file creation/writing fails.
pub fn export_to_csv(
    table: &MetricsTable,
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = create_output_file(table, path)?;
    csv::export_to_csv_impl(table, file)
}

/// Export a metrics table to pretty-printed JSON (an array of row objects).
///
/// # Errors
///
/// Returns an error if the table is empty or file creation/serialization
/// fails.
pub fn export_to_json(
    table: &MetricsTable,
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = create_output_file(table, path)?;
    json::export_to_json_impl(table, file)
}

/// Export a metrics table to Parquet, one column per CSV column.
///
/// # Errors
///
/// Returns an error if the table is empty or file creation/writing fails.
pub fn export_to_parquet(
    table: &MetricsTable,
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = create_output_file(table, path)?;
    parquet::export_to_parquet_impl(table, file)
}
