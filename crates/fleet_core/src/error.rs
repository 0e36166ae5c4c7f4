//! Failure modes while parsing one snapshot file.

use thiserror::Error;

/// A snapshot that cannot be parsed. The run pipeline catches these and
/// skips the affected timestep rather than aborting the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// A required section header never appeared before end of file.
    #[error("section '{0}' not found in snapshot")]
    SectionNotFound(&'static str),
    /// A data line carried fewer fields than the record requires.
    #[error("malformed {section} record: expected at least {expected} fields, found {found}")]
    MalformedRecord {
        section: &'static str,
        expected: usize,
        found: usize,
    },
}
