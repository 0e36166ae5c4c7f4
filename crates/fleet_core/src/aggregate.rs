//! Per-snapshot metrics aggregation.

use serde::Serialize;

use crate::records::EmptyType;
use crate::sharing::SharingTracker;
use crate::snapshot::Snapshot;
use crate::stats::SampleStats;

/// Occupancy histogram bins: vehicles carrying exactly k passengers for
/// k in 0..=10. Vehicles above the last bin are not binned.
pub const PASSENGER_BINS: usize = 11;

/// All aggregated statistics for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotMetrics {
    pub mean_passengers: f64,
    pub med_passengers: f64,
    pub std_passengers: f64,
    /// Vehicles carrying at least one passenger.
    pub active_taxis: u64,
    pub mean_km_travelled: f64,
    pub std_km_travelled: f64,
    pub total_km_travelled: f64,
    /// `time_pass[k]` counts vehicles carrying exactly k passengers.
    pub time_pass: [u64; PASSENGER_BINS],
    pub empty_rebalancing: u64,
    pub empty_moving_to_pickup: u64,
    pub empty_waiting: u64,
    pub not_empty: u64,
    /// Newly detected sharing instances: passengers first seen in a
    /// multi-passenger vehicle this snapshot, at most once per run.
    pub n_shared: u64,
    /// Sharing observations across all snapshots so far, including solo
    /// passengers continuing an already-shared trip.
    pub n_shared_overall: u64,
    pub mean_waiting_time: f64,
    pub med_waiting_time: f64,
    pub std_waiting_time: f64,
    pub mean_delay: f64,
    pub med_delay: f64,
    pub std_delay: f64,
    pub n_reqs_assigned: u64,
    pub n_reqs_unassigned: u64,
    pub n_reqs: u64,
    pub n_pickups: u64,
    pub n_dropoffs: u64,
    pub n_ignored: u64,
    pub total_passengers: u64,
}

/// Aggregate one parsed snapshot into a metrics row, updating the run's
/// sharing state in place.
///
/// The two sharing counters follow different rules. A vehicle carrying exactly
/// one passenger contributes to `n_shared_overall` only when that trip was
/// already marked shared in an earlier snapshot (the co-rider has since
/// been dropped off). A vehicle carrying two or more passengers contributes
/// one observation for the first and the last passenger in its list, and
/// each of those passengers is marked shared, counting toward `n_shared`
/// the first time only.
///
/// # Panics
///
/// Panics when the snapshot's vehicle list is empty; a run with at least
/// one vehicle always reports every vehicle in every snapshot, so an empty
/// list is a parsing or simulator bug.
pub fn aggregate_snapshot(snapshot: &Snapshot, sharing: &mut SharingTracker) -> SnapshotMetrics {
    let n_reqs_assigned = snapshot.requests.iter().filter(|r| r.assigned).count() as u64;
    let n_reqs_unassigned = snapshot.requests.len() as u64 - n_reqs_assigned;

    let mut passenger_counts = Vec::with_capacity(snapshot.vehicles.len());
    let mut distances = Vec::with_capacity(snapshot.vehicles.len());
    let mut active_taxis = 0u64;
    let mut time_pass = [0u64; PASSENGER_BINS];
    let mut empty_rebalancing = 0u64;
    let mut empty_moving_to_pickup = 0u64;
    let mut empty_waiting = 0u64;
    let mut not_empty = 0u64;
    let mut n_shared = 0u64;
    let mut n_shared_overall = 0u64;

    for vehicle in &snapshot.vehicles {
        let count = vehicle.passenger_count();
        passenger_counts.push(count as f64);
        distances.push(vehicle.distance_travelled);
        if count > 0 {
            active_taxis += 1;
        }
        if count < PASSENGER_BINS {
            time_pass[count] += 1;
        }
        match vehicle.empty_type() {
            EmptyType::EmptyRebalancing => empty_rebalancing += 1,
            EmptyType::EmptyMovingToPickup => empty_moving_to_pickup += 1,
            EmptyType::EmptyWaiting => empty_waiting += 1,
            EmptyType::NotEmpty => not_empty += 1,
        }
        match vehicle.passengers.as_slice() {
            [] => {}
            [solo] => {
                if sharing.is_shared(*solo) {
                    n_shared_overall += 1;
                }
            }
            [first, .., last] => {
                for id in [*first, *last] {
                    n_shared_overall += 1;
                    if sharing.mark_shared(id) {
                        n_shared += 1;
                    }
                }
            }
        }
    }

    let passengers = SampleStats::from_values(&passenger_counts);
    let km = SampleStats::from_values(&distances);
    let total_km_travelled = distances.iter().sum();

    let mut waiting_times = Vec::new();
    let mut delays = Vec::new();
    for trip in snapshot.passengers.iter().filter(|p| p.is_completed()) {
        waiting_times.push(trip.waiting_time());
        delays.push(trip.delay());
    }
    let (waiting, delay) = if waiting_times.is_empty() {
        (SampleStats::zeros(), SampleStats::zeros())
    } else {
        (
            SampleStats::from_values(&waiting_times),
            SampleStats::from_values(&delays),
        )
    };

    SnapshotMetrics {
        mean_passengers: passengers.mean,
        med_passengers: passengers.median,
        std_passengers: passengers.std_dev,
        active_taxis,
        mean_km_travelled: km.mean,
        std_km_travelled: km.std_dev,
        total_km_travelled,
        time_pass,
        empty_rebalancing,
        empty_moving_to_pickup,
        empty_waiting,
        not_empty,
        n_shared,
        n_shared_overall,
        mean_waiting_time: waiting.mean,
        med_waiting_time: waiting.median,
        std_waiting_time: waiting.std_dev,
        mean_delay: delay.mean,
        med_delay: delay.median,
        std_delay: delay.std_dev,
        n_reqs_assigned,
        n_reqs_unassigned,
        n_reqs: snapshot.requests.len() as u64,
        n_pickups: snapshot.performance.n_pickups,
        n_dropoffs: snapshot.performance.n_dropoffs,
        n_ignored: snapshot.performance.n_ignored,
        total_passengers: snapshot.total_passengers,
    }
}
