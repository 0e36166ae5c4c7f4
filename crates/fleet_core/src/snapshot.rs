//! Ordered section scanning over one snapshot file.
//!
//! A snapshot holds four sections in fixed order, each introduced by a
//! header line containing a literal section name:
//!
//! ```text
//! Requests: <n>
//! <column sub-header>
//! <request line>*
//! <blank>
//! Vehicles: <n>
//! <vehicle line>*
//! <blank>
//! Passengers: <n>
//! <passenger line>*
//! <blank>
//! Performance
//! <counters line>
//! ```
//!
//! Parsing is pure over in-memory text; the caller reads the file.

use crate::error::SnapshotError;
use crate::records::{PassengerRecord, PerformanceRecord, RequestRecord, VehicleRecord};
use crate::tokenize;

const REQUESTS_HEADER: &str = "Requests";
const VEHICLES_HEADER: &str = "Vehicles";
const PASSENGERS_HEADER: &str = "Passengers";
const PERFORMANCE_HEADER: &str = "Performance";

/// All records of one snapshot file, in section order.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub requests: Vec<RequestRecord>,
    pub vehicles: Vec<VehicleRecord>,
    /// Total trips known to the simulator at this step, from the
    /// Passengers header line.
    pub total_passengers: u64,
    pub passengers: Vec<PassengerRecord>,
    pub performance: PerformanceRecord,
}

impl Snapshot {
    /// Parse one full snapshot from text.
    pub fn parse(text: &str) -> Result<Self, SnapshotError> {
        let lines: Vec<&str> = text.lines().collect();
        let mut cursor = 0;

        let requests = parse_requests(&lines, &mut cursor)?;
        let vehicles = parse_vehicles(&lines, &mut cursor)?;
        let (total_passengers, passengers) = parse_passengers(&lines, &mut cursor)?;
        let performance = parse_performance(&lines, &mut cursor)?;

        Ok(Self {
            requests,
            vehicles,
            total_passengers,
            passengers,
            performance,
        })
    }
}

/// Advance to the line containing `header` and return its index.
fn seek_header(
    lines: &[&str],
    cursor: &mut usize,
    header: &'static str,
) -> Result<usize, SnapshotError> {
    while *cursor < lines.len() {
        let at = *cursor;
        *cursor += 1;
        if lines[at].contains(header) {
            return Ok(at);
        }
    }
    Err(SnapshotError::SectionNotFound(header))
}

fn parse_requests(lines: &[&str], cursor: &mut usize) -> Result<Vec<RequestRecord>, SnapshotError> {
    seek_header(lines, cursor, REQUESTS_HEADER)?;
    // One column sub-header line sits between the header and the data.
    *cursor += 1;

    let mut requests = Vec::new();
    while *cursor < lines.len() {
        let line = lines[*cursor];
        if line.trim().is_empty() || line.contains(VEHICLES_HEADER) {
            break;
        }
        requests.push(RequestRecord::parse(line)?);
        *cursor += 1;
    }
    Ok(requests)
}

fn parse_vehicles(lines: &[&str], cursor: &mut usize) -> Result<Vec<VehicleRecord>, SnapshotError> {
    seek_header(lines, cursor, VEHICLES_HEADER)?;

    let mut vehicles = Vec::new();
    while *cursor < lines.len() {
        let line = lines[*cursor];
        if line.trim().is_empty() || line.contains(PASSENGERS_HEADER) {
            break;
        }
        vehicles.push(VehicleRecord::parse(line)?);
        *cursor += 1;
    }
    Ok(vehicles)
}

fn parse_passengers(
    lines: &[&str],
    cursor: &mut usize,
) -> Result<(u64, Vec<PassengerRecord>), SnapshotError> {
    let header_at = seek_header(lines, cursor, PASSENGERS_HEADER)?;
    let total_passengers = tokenize::integer_tokens(lines[header_at])
        .into_iter()
        .next()
        .filter(|n| *n >= 0)
        .ok_or(SnapshotError::MalformedRecord {
            section: "Passengers",
            expected: 1,
            found: 0,
        })? as u64;

    // Trip lines run until the first line with no numeric tokens (a blank
    // line or the Performance header).
    let mut passengers = Vec::new();
    while *cursor < lines.len() {
        let line = lines[*cursor];
        if tokenize::numeric_tokens(line).is_empty() {
            break;
        }
        passengers.push(PassengerRecord::parse(line)?);
        *cursor += 1;
    }
    Ok((total_passengers, passengers))
}

fn parse_performance(
    lines: &[&str],
    cursor: &mut usize,
) -> Result<PerformanceRecord, SnapshotError> {
    seek_header(lines, cursor, PERFORMANCE_HEADER)?;
    let line = lines.get(*cursor).copied().unwrap_or("");
    *cursor += 1;
    PerformanceRecord::parse(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::EmptyType;

    const REQUEST_LINE_ASSIGNED: &str = "0 -73.99 40.73 -73.97 40.75 10 11 12 13 14 15 2";
    const REQUEST_LINE_PENDING: &str = "1 -73.99 40.73 -73.97 40.75 10 11 12 13 14 15 0";
    const PASSENGER_LINE_DONE: &str =
        "3 -73.98 40.75 -73.96 40.78 5 -73.97 40.76 8 -73.95 40.77 100 130 400 250 3";
    const PASSENGER_LINE_RIDING: &str =
        "4 -73.98 40.75 -73.96 40.78 5 -73.97 40.76 8 -73.95 40.77 200 230 -1 180 1";

    fn sample_snapshot() -> String {
        [
            "Requests: 2",
            "id ox oy dx dy t ... assigned",
            REQUEST_LINE_ASSIGNED,
            REQUEST_LINE_PENDING,
            "",
            "Vehicles: 3",
            "%%%0%0%0.5%0",
            "%2,7%%0%0%1.2%0",
            "%%31%0%0%0.8%1",
            "",
            "Passengers: 5",
            PASSENGER_LINE_DONE,
            PASSENGER_LINE_RIDING,
            "",
            "Performance",
            "3 120 2 110 1 15",
        ]
        .join("\n")
    }

    #[test]
    fn test_parse_full_snapshot() {
        let snap = Snapshot::parse(&sample_snapshot()).unwrap();

        assert_eq!(snap.requests.len(), 2);
        assert!(snap.requests[0].assigned);
        assert!(!snap.requests[1].assigned);

        assert_eq!(snap.vehicles.len(), 3);
        assert_eq!(snap.vehicles[0].empty_type(), EmptyType::EmptyWaiting);
        assert_eq!(snap.vehicles[1].passengers, vec![2, 7]);
        assert_eq!(snap.vehicles[2].empty_type(), EmptyType::EmptyRebalancing);

        assert_eq!(snap.total_passengers, 5);
        assert_eq!(snap.passengers.len(), 2);
        assert!(snap.passengers[0].is_completed());
        assert!(!snap.passengers[1].is_completed());

        assert_eq!(snap.performance.n_pickups, 3);
        assert_eq!(snap.performance.n_dropoffs, 2);
        assert_eq!(snap.performance.n_ignored, 1);
    }

    #[test]
    fn test_empty_request_and_passenger_sections() {
        let text = [
            "Requests: 0",
            "id ox oy dx dy t ... assigned",
            "",
            "Vehicles: 1",
            "%%%0%0%0.0%0",
            "",
            "Passengers: 0",
            "",
            "Performance",
            "0 0 0 0 0 0",
        ]
        .join("\n");
        let snap = Snapshot::parse(&text).unwrap();
        assert!(snap.requests.is_empty());
        assert!(snap.passengers.is_empty());
        assert_eq!(snap.total_passengers, 0);
    }

    #[test]
    fn test_missing_section_header() {
        let text = "Requests: 0\nsub\n\nPassengers: 0\n\nPerformance\n0 0 0 0 0 0";
        let err = Snapshot::parse(text).unwrap_err();
        assert_eq!(err, SnapshotError::SectionNotFound("Vehicles"));
    }

    #[test]
    fn test_truncated_performance_section() {
        let text = [
            "Requests: 0",
            "sub",
            "",
            "Vehicles: 1",
            "%%%0%0%0.0%0",
            "",
            "Passengers: 0",
            "",
            "Performance",
        ]
        .join("\n");
        let err = Snapshot::parse(&text).unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::MalformedRecord {
                section: "Performance",
                found: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_vehicle_line_surfaces() {
        let text = [
            "Requests: 0",
            "sub",
            "",
            "Vehicles: 1",
            "%1%2",
            "",
            "Passengers: 0",
            "",
            "Performance",
            "0 0 0 0 0 0",
        ]
        .join("\n");
        let err = Snapshot::parse(&text).unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::MalformedRecord {
                section: "Vehicles",
                ..
            }
        ));
    }
}
