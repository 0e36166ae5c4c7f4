use std::fs::File;
use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, UInt32Array, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use crate::pipeline::{MetricsRow, MetricsTable};

fn u64_column(rows: &[MetricsRow], get: impl Fn(&MetricsRow) -> u64) -> ArrayRef {
    Arc::new(UInt64Array::from(
        rows.iter().map(get).collect::<Vec<_>>(),
    ))
}

fn f64_column(rows: &[MetricsRow], get: impl Fn(&MetricsRow) -> f64) -> ArrayRef {
    Arc::new(Float64Array::from(
        rows.iter().map(get).collect::<Vec<_>>(),
    ))
}

pub(crate) fn export_to_parquet_impl(
    table: &MetricsTable,
    file: File,
) -> Result<(), Box<dyn std::error::Error>> {
    let rows = table.rows.as_slice();

    let mut fields = vec![
        Field::new("time", DataType::UInt64, false),
        Field::new("timestamp", DataType::Int64, true),
        Field::new("n_vehicles", DataType::UInt32, false),
        Field::new("capacity", DataType::UInt32, false),
        Field::new("rebalancing", DataType::Boolean, false),
        Field::new("is_long", DataType::Boolean, false),
        Field::new("mean_passengers", DataType::Float64, false),
        Field::new("med_passengers", DataType::Float64, false),
        Field::new("std_passengers", DataType::Float64, false),
        Field::new("active_taxis", DataType::UInt64, false),
        Field::new("mean_km_travelled", DataType::Float64, false),
        Field::new("std_km_travelled", DataType::Float64, false),
        Field::new("total_km_travelled", DataType::Float64, false),
    ];

    // Epoch seconds; null when the run folder carried no date.
    let timestamp: Vec<Option<i64>> = rows
        .iter()
        .map(|r| r.timestamp.map(|ts| ts.and_utc().timestamp()))
        .collect();

    let mut arrays: Vec<ArrayRef> = vec![
        u64_column(rows, |r| r.time),
        Arc::new(Int64Array::from(timestamp)),
        Arc::new(UInt32Array::from(
            rows.iter().map(|r| r.n_vehicles).collect::<Vec<_>>(),
        )),
        Arc::new(UInt32Array::from(
            rows.iter().map(|r| r.capacity).collect::<Vec<_>>(),
        )),
        Arc::new(BooleanArray::from(
            rows.iter().map(|r| r.rebalancing).collect::<Vec<_>>(),
        )),
        Arc::new(BooleanArray::from(
            rows.iter().map(|r| r.is_long).collect::<Vec<_>>(),
        )),
        f64_column(rows, |r| r.metrics.mean_passengers),
        f64_column(rows, |r| r.metrics.med_passengers),
        f64_column(rows, |r| r.metrics.std_passengers),
        u64_column(rows, |r| r.metrics.active_taxis),
        f64_column(rows, |r| r.metrics.mean_km_travelled),
        f64_column(rows, |r| r.metrics.std_km_travelled),
        f64_column(rows, |r| r.metrics.total_km_travelled),
    ];

    for bin in 0..fleet_core::PASSENGER_BINS {
        fields.push(Field::new(
            format!("time_pass_{bin}"),
            DataType::UInt64,
            false,
        ));
        arrays.push(u64_column(rows, move |r| r.metrics.time_pass[bin]));
    }

    let counters: [(&str, fn(&MetricsRow) -> u64); 11] = [
        ("empty_rebalancing", |r| r.metrics.empty_rebalancing),
        ("empty_moving_to_pickup", |r| r.metrics.empty_moving_to_pickup),
        ("empty_waiting", |r| r.metrics.empty_waiting),
        ("not_empty", |r| r.metrics.not_empty),
        ("n_shared", |r| r.metrics.n_shared),
        ("n_shared_overall", |r| r.metrics.n_shared_overall),
        ("n_reqs_assigned", |r| r.metrics.n_reqs_assigned),
        ("n_reqs_unassigned", |r| r.metrics.n_reqs_unassigned),
        ("n_reqs", |r| r.metrics.n_reqs),
        ("n_pickups", |r| r.metrics.n_pickups),
        ("n_dropoffs", |r| r.metrics.n_dropoffs),
    ];
    let (trip_counters, perf_counters) = counters.split_at(6);
    for (name, get) in trip_counters {
        fields.push(Field::new(*name, DataType::UInt64, false));
        arrays.push(u64_column(rows, get));
    }

    let trip_stats: [(&str, fn(&MetricsRow) -> f64); 6] = [
        ("mean_waiting_time", |r| r.metrics.mean_waiting_time),
        ("med_waiting_time", |r| r.metrics.med_waiting_time),
        ("std_waiting_time", |r| r.metrics.std_waiting_time),
        ("mean_delay", |r| r.metrics.mean_delay),
        ("med_delay", |r| r.metrics.med_delay),
        ("std_delay", |r| r.metrics.std_delay),
    ];
    for (name, get) in trip_stats {
        fields.push(Field::new(name, DataType::Float64, false));
        arrays.push(f64_column(rows, get));
    }

    for (name, get) in perf_counters {
        fields.push(Field::new(*name, DataType::UInt64, false));
        arrays.push(u64_column(rows, get));
    }
    for (name, get) in [
        ("n_ignored", (|r: &MetricsRow| r.metrics.n_ignored) as fn(&MetricsRow) -> u64),
        ("total_passengers", |r| r.metrics.total_passengers),
    ] {
        fields.push(Field::new(name, DataType::UInt64, false));
        arrays.push(u64_column(rows, get));
    }

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), arrays)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}
