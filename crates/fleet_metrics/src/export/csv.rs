use crate::pipeline::{MetricsRow, MetricsTable};

/// Output column order, a stable contract for downstream consumers.
pub(crate) const COLUMNS: [&str; 43] = [
    "time",
    "timestamp",
    "n_vehicles",
    "capacity",
    "rebalancing",
    "is_long",
    "mean_passengers",
    "med_passengers",
    "std_passengers",
    "active_taxis",
    "mean_km_travelled",
    "std_km_travelled",
    "total_km_travelled",
    "time_pass_0",
    "time_pass_1",
    "time_pass_2",
    "time_pass_3",
    "time_pass_4",
    "time_pass_5",
    "time_pass_6",
    "time_pass_7",
    "time_pass_8",
    "time_pass_9",
    "time_pass_10",
    "empty_rebalancing",
    "empty_moving_to_pickup",
    "empty_waiting",
    "not_empty",
    "n_shared",
    "n_shared_overall",
    "mean_waiting_time",
    "med_waiting_time",
    "std_waiting_time",
    "mean_delay",
    "med_delay",
    "std_delay",
    "n_reqs_assigned",
    "n_reqs_unassigned",
    "n_reqs",
    "n_pickups",
    "n_dropoffs",
    "n_ignored",
    "total_passengers",
];

pub(crate) fn export_to_csv_impl(
    table: &MetricsTable,
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_writer(file);

    wtr.write_record(COLUMNS)?;
    for row in &table.rows {
        wtr.write_record(record_fields(row))?;
    }

    wtr.flush()?;
    Ok(())
}

fn record_fields(row: &MetricsRow) -> Vec<String> {
    let m = &row.metrics;
    let mut fields = vec![
        row.time.to_string(),
        row.timestamp.map(|ts| ts.to_string()).unwrap_or_default(),
        row.n_vehicles.to_string(),
        row.capacity.to_string(),
        (row.rebalancing as u8).to_string(),
        (row.is_long as u8).to_string(),
        m.mean_passengers.to_string(),
        m.med_passengers.to_string(),
        m.std_passengers.to_string(),
        m.active_taxis.to_string(),
        m.mean_km_travelled.to_string(),
        m.std_km_travelled.to_string(),
        m.total_km_travelled.to_string(),
    ];
    fields.extend(m.time_pass.iter().map(|bin| bin.to_string()));
    fields.extend([
        m.empty_rebalancing.to_string(),
        m.empty_moving_to_pickup.to_string(),
        m.empty_waiting.to_string(),
        m.not_empty.to_string(),
        m.n_shared.to_string(),
        m.n_shared_overall.to_string(),
        m.mean_waiting_time.to_string(),
        m.med_waiting_time.to_string(),
        m.std_waiting_time.to_string(),
        m.mean_delay.to_string(),
        m.med_delay.to_string(),
        m.std_delay.to_string(),
        m.n_reqs_assigned.to_string(),
        m.n_reqs_unassigned.to_string(),
        m.n_reqs.to_string(),
        m.n_pickups.to_string(),
        m.n_dropoffs.to_string(),
        m.n_ignored.to_string(),
        m.total_passengers.to_string(),
    ]);
    debug_assert_eq!(fields.len(), COLUMNS.len());
    fields
}
