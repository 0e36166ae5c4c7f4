//! Batch metrics extraction for fleet simulation runs.
//!
//! This crate walks directories of completed simulation runs, parses each
//! run's periodic snapshot files, aggregates them into per-snapshot metric
//! rows (via [`fleet_core`]), and exports the combined table to CSV, JSON,
//! or Parquet.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::PathBuf;
//! use fleet_metrics::{export_to_csv, run_batch};
//!
//! // Discover and process every run folder under the given roots.
//! let roots = vec![PathBuf::from("data/runs")];
//! let outcome = run_batch(&roots, Some(8), true);
//!
//! for skipped in &outcome.skipped {
//!     eprintln!("skipped {}: {}", skipped.folder.display(), skipped.reason);
//! }
//!
//! export_to_csv(&outcome.table, "metrics.csv").unwrap();
//! ```
//!
//! # Architecture
//!
//! - [`run_info`]: run configuration decoded from folder names
//! - [`parameters`]: `parameters.txt` loading and run settings
//! - [`pipeline`]: per-run snapshot iteration and table assembly
//! - [`batch`]: folder discovery and parallel extraction across runs
//! - [`export`]: CSV/JSON/Parquet output

pub mod batch;
pub mod error;
pub mod export;
pub mod parameters;
pub mod pipeline;
pub mod run_info;

pub use batch::{
    discover_run_folders, process_run_folder, run_batch, run_batch_folders, BatchOutcome,
    SkippedRun, DEFAULT_WORKERS, PARAMETER_FILE,
};
pub use error::PipelineError;
pub use export::{export_to_csv, export_to_json, export_to_parquet};
pub use parameters::{ParameterValue, RunParameters, RunSettings};
pub use pipeline::{extract_run_metrics, snapshot_filename, MetricsRow, MetricsTable, SNAPSHOT_DIR};
pub use run_info::{determine_step, RunDate, RunInfo, DEFAULT_STEP_SECS, STEP_CANDIDATES};
