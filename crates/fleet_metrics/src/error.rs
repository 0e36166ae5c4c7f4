//! Failure modes above the single-snapshot level.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use fleet_core::SnapshotError;

/// Errors raised while processing one run folder or the batch around it.
///
/// Per-snapshot failures degrade to a skipped timestep inside the run
/// pipeline; per-run failures degrade to a skipped folder at the batch
/// boundary. Nothing here aborts the batch.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error("run folder name '{0}' does not encode run parameters")]
    MalformedFolderName(String),
    #[error("run metadata lacks the date components needed for time alignment")]
    MissingStartDate,
    #[error("parameter file is missing required key '{0}'")]
    MissingParameter(String),
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PipelineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
