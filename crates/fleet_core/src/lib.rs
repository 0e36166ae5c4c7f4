//! Core snapshot parsing and metrics aggregation for mobility-on-demand
//! simulator output.
//!
//! A simulation run emits one text snapshot per timestep with four sections
//! (Requests, Vehicles, Passengers, Performance). This crate turns one
//! snapshot into typed records ([`snapshot::Snapshot`]) and aggregates it
//! into a single metrics row ([`aggregate::SnapshotMetrics`]), threading
//! cross-snapshot ride-sharing state ([`sharing::SharingTracker`]) through
//! the run. All functions here are pure over in-memory text; file iteration
//! and table assembly live in the `fleet_metrics` crate.

pub mod aggregate;
pub mod error;
pub mod records;
pub mod sharing;
pub mod snapshot;
pub mod stats;
pub mod tokenize;

pub use aggregate::{aggregate_snapshot, SnapshotMetrics, PASSENGER_BINS};
pub use error::SnapshotError;
pub use records::{EmptyType, PassengerRecord, PerformanceRecord, RequestRecord, VehicleRecord};
pub use sharing::SharingTracker;
pub use snapshot::Snapshot;
pub use stats::SampleStats;
