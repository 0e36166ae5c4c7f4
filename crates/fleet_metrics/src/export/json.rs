use crate::pipeline::MetricsTable;

pub(crate) fn export_to_json_impl(
    table: &MetricsTable,
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    serde_json::to_writer_pretty(file, &table.rows)?;
    Ok(())
}
