#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use fleet_metrics::{snapshot_filename, PARAMETER_FILE, SNAPSHOT_DIR};

/// A complete snapshot file with a caller-chosen Vehicles section.
///
/// The Requests, Passengers, and Performance sections are fixed: one
/// assigned and one pending request, one completed and one in-flight trip,
/// and non-zero pickup/dropoff/ignored counters.
pub fn snapshot_text(vehicle_lines: &[&str]) -> String {
    let mut lines = vec![
        "Requests: 2".to_string(),
        "id ox oy dx dy t ... assigned".to_string(),
        "0 -73.99 40.73 -73.97 40.75 10 11 12 13 14 15 2".to_string(),
        "1 -73.99 40.73 -73.97 40.75 10 11 12 13 14 15 0".to_string(),
        String::new(),
        "Vehicles: 0".to_string(),
    ];
    lines.extend(vehicle_lines.iter().map(|l| l.to_string()));
    lines.extend([
        String::new(),
        "Passengers: 5".to_string(),
        "3 -73.98 40.75 -73.96 40.78 5 -73.97 40.76 8 -73.95 40.77 100 130 400 250 3".to_string(),
        "4 -73.98 40.75 -73.96 40.78 5 -73.97 40.76 8 -73.95 40.77 200 230 -1 180 1".to_string(),
        String::new(),
        "Performance".to_string(),
        "3 120 2 110 1 15".to_string(),
    ]);
    lines.join("\n")
}

/// A snapshot whose vehicle fleet is one idle vehicle plus one carrying the
/// given passenger ids.
pub fn snapshot_with_passengers(ids: &str) -> String {
    let carrying = format!("%{ids}%%0%0%1.2%0");
    snapshot_text(&["%%%0%0%0.5%0", &carrying])
}

/// Build a run folder under `root`: a `parameters.txt` and one snapshot
/// file per entry in `snapshots`, spaced 30 simulated seconds apart.
pub fn write_run_folder(
    root: &Path,
    name: &str,
    n_vehicles: u32,
    snapshots: &[String],
) -> PathBuf {
    let run_dir = root.join(name);
    let graphs = run_dir.join(SNAPSHOT_DIR);
    fs::create_dir_all(&graphs).expect("run folder should be creatable");

    let params = format!(
        "NUMBER_VEHICLES: {n_vehicles}\nmaxPassengersVehicle: 2\nUSE_REBALANCING: 1\n"
    );
    fs::write(run_dir.join(PARAMETER_FILE), params).expect("parameters should write");

    for (index, text) in snapshots.iter().enumerate() {
        let t = index as u64 * 30;
        fs::write(graphs.join(snapshot_filename(t)), text).expect("snapshot should write");
    }
    run_dir
}
