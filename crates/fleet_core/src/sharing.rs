//! Cross-snapshot ride-sharing detection state.

use std::collections::HashSet;

/// Remembers which passenger trips have already been counted as shared
/// within one run.
///
/// Owned exclusively by one run-pipeline invocation and threaded through
/// the snapshot sequence in timestep order; the sharing counters are
/// order-dependent, so a tracker must never be reused across runs or
/// updated concurrently. Marks are insert-only: once a trip is shared it
/// stays shared for the rest of the run.
#[derive(Debug, Clone, Default)]
pub struct SharingTracker {
    shared: HashSet<u64>,
}

impl SharingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether this passenger's trip was marked shared in an earlier
    /// snapshot (or earlier in the current one).
    pub fn is_shared(&self, passenger: u64) -> bool {
        self.shared.contains(&passenger)
    }

    /// Mark a passenger's trip as shared. Returns `true` only the first
    /// time that passenger is marked within the run.
    pub fn mark_shared(&mut self, passenger: u64) -> bool {
        self.shared.insert(passenger)
    }

    /// Number of distinct passengers marked so far.
    pub fn marked_count(&self) -> usize {
        self.shared.len()
    }
}
