//! Per-run snapshot iteration and metrics table assembly.
//!
//! A run folder holds a `graphs/` directory with one snapshot file per
//! timestep. The pipeline walks the timestep indices in order, parses and
//! aggregates each snapshot, and threads one [`SharingTracker`] through the
//! whole sequence; ordering matters because the sharing counters depend on
//! what was seen in earlier snapshots.

use std::fs;
use std::path::Path;

use chrono::{Duration, NaiveDateTime};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, warn};
use serde::Serialize;

use fleet_core::{aggregate_snapshot, SharingTracker, Snapshot, SnapshotMetrics};

use crate::error::PipelineError;
use crate::parameters::RunSettings;
use crate::run_info::{determine_step, RunInfo};

/// Subdirectory of a run folder holding the snapshot files.
pub const SNAPSHOT_DIR: &str = "graphs";

/// Expected snapshot filename for time offset `t` (seconds).
pub fn snapshot_filename(t: u64) -> String {
    format!("data-{SNAPSHOT_DIR}-{t}.txt")
}

/// One output row: run parameters, time alignment, and the aggregated
/// snapshot statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsRow {
    /// Snapshot time offset from the start of the run (seconds).
    pub time: u64,
    /// Wall-clock timestamp, when the folder name encodes a start date.
    pub timestamp: Option<NaiveDateTime>,
    pub n_vehicles: u32,
    pub capacity: u32,
    pub rebalancing: bool,
    pub is_long: bool,
    #[serde(flatten)]
    pub metrics: SnapshotMetrics,
}

/// Ordered metrics rows of one run (or, after concatenation, of a batch).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricsTable {
    pub rows: Vec<MetricsRow>,
}

impl MetricsTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append another table's rows, preserving order.
    pub fn extend(&mut self, other: MetricsTable) {
        self.rows.extend(other.rows);
    }
}

/// Extract the metrics table for one run folder.
///
/// Iterates snapshot indices `0..N` where `N` is the number of files in the
/// run's snapshot directory. A missing, unreadable, or unparsable snapshot
/// skips that index with a warning; the run continues. When the folder name
/// lacks date components the rows are emitted without timestamps.
pub fn extract_run_metrics(
    run_dir: &Path,
    settings: &RunSettings,
    show_progress: bool,
) -> Result<MetricsTable, PipelineError> {
    let folder_name = run_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let info = RunInfo::parse(&folder_name)?;
    let step = determine_step(&run_dir.to_string_lossy());

    let snapshot_dir = run_dir.join(SNAPSHOT_DIR);
    let n_snapshots = fs::read_dir(&snapshot_dir)
        .map_err(|e| PipelineError::io(&snapshot_dir, e))?
        .count();

    let start = match info.start_date() {
        Ok(date) => date.and_hms_opt(0, 0, 0),
        Err(PipelineError::MissingStartDate) => {
            debug!("run {folder_name}: no start date in folder name, rows stay un-indexed");
            None
        }
        Err(other) => return Err(other),
    };

    let pb = if show_progress && n_snapshots > 0 {
        let bar = ProgressBar::new(n_snapshots as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40.cyan/blue}] {pos}/{len}")
                .expect("valid progress template")
                .progress_chars("#>-"),
        );
        bar.set_message(folder_name.clone());
        Some(bar)
    } else {
        None
    };

    let mut sharing = SharingTracker::new();
    let mut rows = Vec::with_capacity(n_snapshots);
    for index in 0..n_snapshots {
        let t = index as u64 * step as u64;
        let path = snapshot_dir.join(snapshot_filename(t));

        if let Some(metrics) = process_snapshot(&path, &mut sharing) {
            rows.push(MetricsRow {
                time: t,
                timestamp: start.map(|s| s + Duration::seconds(t as i64)),
                n_vehicles: settings.n_vehicles,
                capacity: settings.capacity,
                rebalancing: settings.rebalancing,
                is_long: settings.is_long,
                metrics,
            });
        }
        if let Some(ref bar) = pb {
            bar.inc(1);
        }
    }
    if let Some(bar) = pb {
        bar.finish_and_clear();
    }

    Ok(MetricsTable { rows })
}

/// Read, parse, and aggregate one snapshot file. Any failure skips the
/// index (logged), keeping the rest of the run alive.
fn process_snapshot(path: &Path, sharing: &mut SharingTracker) -> Option<SnapshotMetrics> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            warn!("skipping snapshot {}: {err}", path.display());
            return None;
        }
    };
    match Snapshot::parse(&text) {
        Ok(snapshot) => Some(aggregate_snapshot(&snapshot, sharing)),
        Err(err) => {
            warn!("skipping snapshot {}: {err}", path.display());
            None
        }
    }
}
