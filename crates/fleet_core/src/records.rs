//! Typed records extracted from the four snapshot sections.
//!
//! Each extractor is a pure function over one data line. Field offsets and
//! delimiters reproduce the simulator's output format exactly; they are a
//! fixed external contract, not something to redesign.

use crate::error::SnapshotError;
use crate::tokenize;

/// Numeric-token index of the "assigned" field on a request line.
const REQUEST_ASSIGNED_FIELD: usize = 11;
/// Minimum numeric tokens on a request line.
const REQUEST_FIELDS: usize = 12;
/// Minimum `%`-delimited groups on a vehicle line.
const VEHICLE_GROUPS: usize = 7;
/// `%`-group index of the distance-travelled field.
const VEHICLE_DISTANCE_GROUP: usize = 5;
/// Numeric tokens on a passenger trip line.
const PASSENGER_FIELDS: usize = 16;
/// Numeric tokens on the performance counters line.
const PERFORMANCE_FIELDS: usize = 6;

/// Classification of a vehicle's occupancy at one timestep.
///
/// Precedence is fixed and auditable: a set rebalancing flag wins over
/// everything, then an empty vehicle with pending pickup requests, then an
/// empty idle vehicle; anything carrying passengers is `NotEmpty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmptyType {
    EmptyRebalancing,
    EmptyMovingToPickup,
    EmptyWaiting,
    NotEmpty,
}

impl EmptyType {
    /// All classes, in output-column order.
    pub const ALL: [EmptyType; 4] = [
        EmptyType::EmptyRebalancing,
        EmptyType::EmptyMovingToPickup,
        EmptyType::EmptyWaiting,
        EmptyType::NotEmpty,
    ];

    /// Classify one vehicle. Exactly one class applies to every vehicle.
    pub fn classify(has_passengers: bool, has_pending_requests: bool, rebalancing: bool) -> Self {
        if rebalancing {
            EmptyType::EmptyRebalancing
        } else if !has_passengers && has_pending_requests {
            EmptyType::EmptyMovingToPickup
        } else if !has_passengers && !has_pending_requests {
            EmptyType::EmptyWaiting
        } else {
            EmptyType::NotEmpty
        }
    }

    /// Stable output column name for this class.
    pub fn column_name(&self) -> &'static str {
        match self {
            EmptyType::EmptyRebalancing => "empty_rebalancing",
            EmptyType::EmptyMovingToPickup => "empty_moving_to_pickup",
            EmptyType::EmptyWaiting => "empty_waiting",
            EmptyType::NotEmpty => "not_empty",
        }
    }
}

/// One pending or assigned request line from the Requests section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequestRecord {
    /// Positive value in the assignment field means a vehicle was assigned.
    pub assigned: bool,
}

impl RequestRecord {
    pub fn parse(line: &str) -> Result<Self, SnapshotError> {
        let tokens = tokenize::numeric_tokens(line);
        if tokens.len() < REQUEST_FIELDS {
            return Err(SnapshotError::MalformedRecord {
                section: "Requests",
                expected: REQUEST_FIELDS,
                found: tokens.len(),
            });
        }
        Ok(Self {
            assigned: tokens[REQUEST_ASSIGNED_FIELD] > 0.0,
        })
    }
}

/// One vehicle line from the Vehicles section.
///
/// Vehicle lines are `%`-delimited: group 1 lists onboard passenger ids,
/// group 2 lists pending pickup-request ids, group 5 is the distance
/// travelled this step, and the final group is the rebalancing flag.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleRecord {
    /// Onboard passenger trip identities, in list order.
    pub passengers: Vec<u64>,
    /// Pending pickup-request identities.
    pub pending_requests: Vec<i64>,
    /// Distance travelled during this timestep (km).
    pub distance_travelled: f64,
    /// Whether the vehicle is currently rebalancing.
    pub rebalancing: bool,
}

impl VehicleRecord {
    pub fn parse(line: &str) -> Result<Self, SnapshotError> {
        let groups: Vec<&str> = line.split('%').collect();
        if groups.len() < VEHICLE_GROUPS {
            return Err(SnapshotError::MalformedRecord {
                section: "Vehicles",
                expected: VEHICLE_GROUPS,
                found: groups.len(),
            });
        }
        let distance_travelled = groups[VEHICLE_DISTANCE_GROUP]
            .trim()
            .parse::<f64>()
            .map_err(|_| SnapshotError::MalformedRecord {
                section: "Vehicles",
                expected: VEHICLE_GROUPS,
                found: VEHICLE_DISTANCE_GROUP,
            })?;
        let rebalancing = groups
            .last()
            .map(|flag| flag.trim() == "1")
            .unwrap_or(false);
        Ok(Self {
            passengers: tokenize::integer_tokens(groups[1])
                .into_iter()
                .map(|id| id as u64)
                .collect(),
            pending_requests: tokenize::integer_tokens(groups[2]),
            distance_travelled,
            rebalancing,
        })
    }

    pub fn passenger_count(&self) -> usize {
        self.passengers.len()
    }

    pub fn empty_type(&self) -> EmptyType {
        EmptyType::classify(
            !self.passengers.is_empty(),
            !self.pending_requests.is_empty(),
            self.rebalancing,
        )
    }
}

/// One trip line from the Passengers section.
///
/// Coordinates are stored `[y, x]` as the simulator writes them (latitude
/// second on the line, first in the pair).
#[derive(Debug, Clone, PartialEq)]
pub struct PassengerRecord {
    pub identity: u64,
    pub origin: [f64; 2],
    pub destination: [f64; 2],
    pub station_origin: u64,
    pub station_origin_coord: [f64; 2],
    pub station_destination: u64,
    pub station_destination_coord: [f64; 2],
    pub time_req: f64,
    pub time_pickup: f64,
    pub time_dropoff: f64,
    /// Free-flow optimal travel time for this trip (seconds).
    pub travel_time_optim: f64,
    /// Vehicle that picked the passenger up.
    pub vehicle_pickup: u64,
}

impl PassengerRecord {
    pub fn parse(line: &str) -> Result<Self, SnapshotError> {
        let t = tokenize::numeric_tokens(line);
        if t.len() < PASSENGER_FIELDS {
            return Err(SnapshotError::MalformedRecord {
                section: "Passengers",
                expected: PASSENGER_FIELDS,
                found: t.len(),
            });
        }
        Ok(Self {
            identity: t[0] as u64,
            origin: [t[2], t[1]],
            destination: [t[4], t[3]],
            station_origin: t[5] as u64,
            station_origin_coord: [t[7], t[6]],
            station_destination: t[8] as u64,
            station_destination_coord: [t[10], t[9]],
            time_req: t[11],
            time_pickup: t[12],
            time_dropoff: t[13],
            travel_time_optim: t[14].trunc(),
            vehicle_pickup: t[15] as u64,
        })
    }

    /// A trip is completed once its dropoff time is set.
    pub fn is_completed(&self) -> bool {
        self.time_dropoff > 0.0
    }

    /// Time from request to pickup.
    pub fn waiting_time(&self) -> f64 {
        self.time_pickup - self.time_req
    }

    /// Extra travel time over the free-flow optimum.
    pub fn delay(&self) -> f64 {
        self.time_dropoff - self.time_req - self.travel_time_optim
    }
}

/// Aggregate counters from the Performance section, taken verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerformanceRecord {
    pub n_pickups: u64,
    pub total_pickups: u64,
    pub n_dropoffs: u64,
    pub total_dropoffs: u64,
    pub n_ignored: u64,
    pub total_ignored: u64,
}

impl PerformanceRecord {
    pub fn parse(line: &str) -> Result<Self, SnapshotError> {
        let t = tokenize::numeric_tokens(line);
        if t.len() < PERFORMANCE_FIELDS {
            return Err(SnapshotError::MalformedRecord {
                section: "Performance",
                expected: PERFORMANCE_FIELDS,
                found: t.len(),
            });
        }
        Ok(Self {
            n_pickups: t[0] as u64,
            total_pickups: t[1] as u64,
            n_dropoffs: t[2] as u64,
            total_dropoffs: t[3] as u64,
            n_ignored: t[4] as u64,
            total_ignored: t[5] as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_priority_order() {
        // rebalancing beats everything, including carrying passengers
        assert_eq!(
            EmptyType::classify(true, true, true),
            EmptyType::EmptyRebalancing
        );
        assert_eq!(
            EmptyType::classify(false, true, false),
            EmptyType::EmptyMovingToPickup
        );
        assert_eq!(
            EmptyType::classify(false, false, false),
            EmptyType::EmptyWaiting
        );
        assert_eq!(EmptyType::classify(true, false, false), EmptyType::NotEmpty);
        assert_eq!(EmptyType::classify(true, true, false), EmptyType::NotEmpty);
    }

    #[test]
    fn test_vehicle_parse_with_passengers() {
        let v = VehicleRecord::parse("%2,7%%0%0%1.2%0").unwrap();
        assert_eq!(v.passengers, vec![2, 7]);
        assert!(v.pending_requests.is_empty());
        assert_eq!(v.distance_travelled, 1.2);
        assert!(!v.rebalancing);
        assert_eq!(v.empty_type(), EmptyType::NotEmpty);
    }

    #[test]
    fn test_vehicle_parse_empty_waiting() {
        let v = VehicleRecord::parse("%%%0%0%0.5%0").unwrap();
        assert!(v.passengers.is_empty());
        assert!(v.pending_requests.is_empty());
        assert_eq!(v.distance_travelled, 0.5);
        assert_eq!(v.empty_type(), EmptyType::EmptyWaiting);
    }

    #[test]
    fn test_vehicle_parse_moving_to_pickup_and_rebalancing() {
        let moving = VehicleRecord::parse("%%31%0%0%0.8%0").unwrap();
        assert_eq!(moving.pending_requests, vec![31]);
        assert_eq!(moving.empty_type(), EmptyType::EmptyMovingToPickup);

        let rb = VehicleRecord::parse("%%%0%0%2.0%1").unwrap();
        assert!(rb.rebalancing);
        assert_eq!(rb.empty_type(), EmptyType::EmptyRebalancing);
    }

    #[test]
    fn test_vehicle_too_few_groups() {
        let err = VehicleRecord::parse("%1%2%3").unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::MalformedRecord {
                section: "Vehicles",
                ..
            }
        ));
    }

    #[test]
    fn test_request_assigned_field() {
        let assigned = RequestRecord::parse("0 1.0 2.0 3.0 4.0 5 6 7 8 9 10 12").unwrap();
        assert!(assigned.assigned);
        let unassigned = RequestRecord::parse("0 1.0 2.0 3.0 4.0 5 6 7 8 9 10 -1").unwrap();
        assert!(!unassigned.assigned);
        let err = RequestRecord::parse("1 2 3").unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::MalformedRecord {
                section: "Requests",
                expected: 12,
                found: 3
            }
        ));
    }

    #[test]
    fn test_passenger_parse_and_derived_times() {
        let line = "42 -73.98 40.75 -73.96 40.78 5 -73.97 40.76 8 -73.95 40.77 100 130 400 250 3";
        let p = PassengerRecord::parse(line).unwrap();
        assert_eq!(p.identity, 42);
        assert_eq!(p.origin, [40.75, -73.98]);
        assert_eq!(p.destination, [40.78, -73.96]);
        assert_eq!(p.station_origin, 5);
        assert_eq!(p.station_destination, 8);
        assert_eq!(p.vehicle_pickup, 3);
        assert!(p.is_completed());
        assert_eq!(p.waiting_time(), 30.0);
        assert_eq!(p.delay(), 50.0);
    }

    #[test]
    fn test_passenger_pending_trip() {
        let line = "7 -73.98 40.75 -73.96 40.78 5 -73.97 40.76 8 -73.95 40.77 100 0 -1 250 0";
        let p = PassengerRecord::parse(line).unwrap();
        assert!(!p.is_completed());
    }

    #[test]
    fn test_performance_counters() {
        let p = PerformanceRecord::parse("3 120 2 110 1 15").unwrap();
        assert_eq!(p.n_pickups, 3);
        assert_eq!(p.total_pickups, 120);
        assert_eq!(p.n_dropoffs, 2);
        assert_eq!(p.n_ignored, 1);
        assert_eq!(p.total_ignored, 15);
    }
}
