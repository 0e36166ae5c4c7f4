mod support;

use std::fs;

use tempfile::TempDir;

use fleet_metrics::{
    discover_run_folders, export_to_csv, process_run_folder, run_batch, SNAPSHOT_DIR,
};

use support::{snapshot_text, write_run_folder};

#[test]
fn discovery_keeps_only_run_shaped_folders_sorted_by_name() {
    let root = TempDir::new().unwrap();
    for name in ["v500-c4-w300-p0", "v1000-c2-w300-p0", "notes", "a-b"] {
        fs::create_dir(root.path().join(name)).unwrap();
    }
    // A file with a run-shaped name must not be picked up.
    fs::write(root.path().join("v9-c9-w9-p9"), "").unwrap();

    let folders = discover_run_folders(root.path()).unwrap();

    let names: Vec<String> = folders
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["v1000-c2-w300-p0", "v500-c4-w300-p0"]);
}

#[test]
fn discovery_of_missing_root_is_an_error() {
    let root = TempDir::new().unwrap();
    let missing = root.path().join("does-not-exist");
    assert!(discover_run_folders(&missing).is_err());
}

#[test]
fn process_run_folder_reads_settings_from_parameter_file() {
    let root = TempDir::new().unwrap();
    let snapshots = vec![snapshot_text(&["%%%0%0%0.5%0"])];
    let run_dir = write_run_folder(root.path(), "v1000-c2-w300-p0", 1000, &snapshots);

    let table = process_run_folder(&run_dir).unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(table.rows[0].n_vehicles, 1000);
    assert_eq!(table.rows[0].capacity, 2);
    assert!(table.rows[0].rebalancing);

    // A single run's table exports like any other, giving per-run output.
    let per_run_csv = run_dir.join("metrics.csv");
    export_to_csv(&table, &per_run_csv).unwrap();
    let contents = fs::read_to_string(per_run_csv).unwrap();
    assert_eq!(contents.lines().count(), 2);
}

#[test]
fn batch_concatenates_runs_in_discovery_order() {
    let root = TempDir::new().unwrap();
    let one = vec![snapshot_text(&["%%%0%0%0.5%0"])];
    let two = vec![
        snapshot_text(&["%%%0%0%0.5%0"]),
        snapshot_text(&["%%%0%0%0.5%0"]),
    ];
    write_run_folder(root.path(), "v1000-c2-w300-p0", 1000, &one);
    write_run_folder(root.path(), "v500-c4-w300-p0", 500, &two);

    let outcome = run_batch(&[root.path().to_path_buf()], Some(2), false);

    assert!(outcome.skipped.is_empty());
    assert_eq!(outcome.table.len(), 3);
    let fleet_sizes: Vec<u32> = outcome.table.rows.iter().map(|r| r.n_vehicles).collect();
    assert_eq!(fleet_sizes, vec![1000, 500, 500]);
}

#[test]
fn folder_without_parameter_file_is_skipped_not_fatal() {
    let root = TempDir::new().unwrap();
    let good = vec![snapshot_text(&["%%%0%0%0.5%0"])];
    write_run_folder(root.path(), "v1000-c2-w300-p0", 1000, &good);

    let bad = root.path().join("v500-c4-w300-p0");
    fs::create_dir_all(bad.join(SNAPSHOT_DIR)).unwrap();

    let outcome = run_batch(&[root.path().to_path_buf()], Some(2), false);

    assert_eq!(outcome.table.len(), 1);
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].folder, bad);
}

#[test]
fn unreadable_root_skips_quietly() {
    let root = TempDir::new().unwrap();
    let good = vec![snapshot_text(&["%%%0%0%0.5%0"])];
    write_run_folder(root.path(), "v1000-c2-w300-p0", 1000, &good);

    let roots = vec![
        root.path().to_path_buf(),
        root.path().join("does-not-exist"),
    ];
    let outcome = run_batch(&roots, Some(2), false);

    assert_eq!(outcome.table.len(), 1);
    assert!(outcome.skipped.is_empty());
}
