//! Example: Batch metrics extraction across run folders.
//!
//! This example demonstrates how to:
//! 1. Discover run folders under one or more root directories
//! 2. Process them in parallel
//! 3. Export the combined table to CSV/JSON/Parquet
//!
//! Usage: extract_batch <root-dir> [<root-dir> ...]

use std::path::PathBuf;

use fleet_metrics::{
    export_to_csv,
    // export_to_json, export_to_parquet,
    run_batch, DEFAULT_WORKERS,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let roots: Vec<PathBuf> = std::env::args().skip(1).map(PathBuf::from).collect();
    if roots.is_empty() {
        return Err("usage: extract_batch <root-dir> [<root-dir> ...]".into());
    }

    println!("Scanning {} root(s) for run folders...", roots.len());
    let outcome = run_batch(&roots, Some(DEFAULT_WORKERS), true);
    println!(
        "Extracted {} metric rows ({} folders skipped)",
        outcome.table.len(),
        outcome.skipped.len()
    );

    for skipped in &outcome.skipped {
        println!("  skipped {}: {}", skipped.folder.display(), skipped.reason);
    }

    // Export results
    println!("\nExporting results...");
    // export_to_json(&outcome.table, "metrics.json")?;
    // println!("Exported to metrics.json");

    // export_to_parquet(&outcome.table, "metrics.parquet")?;
    // println!("Exported to metrics.parquet");

    export_to_csv(&outcome.table, "metrics.csv")?;
    println!("Exported to metrics.csv");

    Ok(())
}
