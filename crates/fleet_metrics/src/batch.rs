//! Batch discovery and parallel extraction across run folders.
//!
//! Runs are fully independent, so the batch fans folders out over a rayon
//! pool. Each worker owns its run's sharing state and table exclusively;
//! results come back in discovery order and concatenate row-wise. A failed
//! folder is recorded and skipped, never fatal.

use std::fs;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use log::warn;
use rayon::prelude::*;

use crate::error::PipelineError;
use crate::parameters::{RunParameters, RunSettings};
use crate::pipeline::{extract_run_metrics, MetricsTable};

/// Parameter file expected inside every run folder.
pub const PARAMETER_FILE: &str = "parameters.txt";

/// Worker pool size used by the example batch entry point.
pub const DEFAULT_WORKERS: usize = 8;

/// A run folder the batch had to skip, with the reason.
#[derive(Debug)]
pub struct SkippedRun {
    pub folder: PathBuf,
    pub reason: PipelineError,
}

/// Result of one batch: everything that succeeded, plus an enumerable list
/// of what did not.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub table: MetricsTable,
    pub skipped: Vec<SkippedRun>,
}

/// Discover run folders directly under `root`.
///
/// A run folder's name splits into 4 or 5 dash-separated components
/// (`v1000-c2-w300-p0`, optionally with a date suffix token). Results are
/// sorted by name so batch output is deterministic.
pub fn discover_run_folders(root: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    let mut folders = Vec::new();
    let entries = fs::read_dir(root).map_err(|e| PipelineError::io(root, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| PipelineError::io(root, e))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = entry.file_name();
        let components = name.to_string_lossy().split('-').count();
        if components == 4 || components == 5 {
            folders.push(path);
        }
    }
    folders.sort();
    Ok(folders)
}

/// Process one run folder: load its parameters, then run the pipeline.
pub fn process_run_folder(run_dir: &Path) -> Result<MetricsTable, PipelineError> {
    let params = RunParameters::load(&run_dir.join(PARAMETER_FILE))?;
    let settings = RunSettings::from_parameters(&params)?;
    extract_run_metrics(run_dir, &settings, false)
}

/// Run the whole batch across one or more root directories.
///
/// Folders are processed on a rayon pool (`num_threads`, or rayon's default
/// when `None`); per-folder results are collected in discovery order. An
/// unreadable root is skipped with a warning like any other failed unit.
pub fn run_batch(
    roots: &[PathBuf],
    num_threads: Option<usize>,
    show_progress: bool,
) -> BatchOutcome {
    let mut folders = Vec::new();
    for root in roots {
        match discover_run_folders(root) {
            Ok(found) => folders.extend(found),
            Err(err) => warn!("skipping root {}: {err}", root.display()),
        }
    }
    run_batch_folders(folders, num_threads, show_progress)
}

/// Run the batch over an explicit folder list, preserving its order.
pub fn run_batch_folders(
    folders: Vec<PathBuf>,
    num_threads: Option<usize>,
    show_progress: bool,
) -> BatchOutcome {
    let pb = if show_progress && !folders.is_empty() {
        let bar = ProgressBar::new(folders.len() as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
                .expect("valid progress template")
                .progress_chars("#>-"),
        );
        Some(bar)
    } else {
        None
    };

    let pool = match num_threads {
        Some(threads) => rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build(),
        None => rayon::ThreadPoolBuilder::new().build(),
    }
    .expect("failed to create thread pool");

    let pb_ref = pb.as_ref();
    let results: Vec<(PathBuf, Result<MetricsTable, PipelineError>)> = pool.install(|| {
        folders
            .into_par_iter()
            .map(|folder| {
                let result = process_run_folder(&folder);
                if let Some(bar) = pb_ref {
                    bar.inc(1);
                }
                (folder, result)
            })
            .collect()
    });

    if let Some(ref bar) = pb {
        bar.finish_with_message("Completed");
    }

    let mut outcome = BatchOutcome::default();
    for (folder, result) in results {
        match result {
            Ok(table) => outcome.table.extend(table),
            Err(reason) => {
                warn!("skipping run folder {}: {reason}", folder.display());
                outcome.skipped.push(SkippedRun { folder, reason });
            }
        }
    }
    outcome
}
