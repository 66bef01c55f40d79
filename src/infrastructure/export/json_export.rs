// ============================================================
// JSON EXPORT
// ============================================================

use crate::domain::cleaning::CleaningReport;
use crate::domain::error::{AppError, Result};
use crate::domain::table::Dataset;

/// Serialize the dataset as a pretty-printed JSON array of row objects
/// keyed by column name, in column order.
///
/// With `include_metadata` and a report, the array is wrapped as
/// `{ "data": [...], "cleaningReport": {...} }`.
pub fn write_json(
    dataset: &Dataset,
    include_metadata: bool,
    report: Option<&CleaningReport>,
) -> Result<Vec<u8>> {
    let data = rows_as_objects(dataset);

    let value = match report {
        Some(report) if include_metadata => serde_json::json!({
            "data": data,
            "cleaningReport": report,
        }),
        _ => serde_json::Value::Array(data),
    };

    serde_json::to_vec_pretty(&value)
        .map_err(|e| AppError::Export(format!("Failed to serialize JSON export: {}", e)))
}

fn rows_as_objects(dataset: &Dataset) -> Vec<serde_json::Value> {
    dataset
        .rows()
        .iter()
        .map(|row| {
            let mut object = serde_json::Map::with_capacity(dataset.column_count());
            for (name, cell) in dataset.columns().iter().zip(row) {
                object.insert(name.clone(), cell.to_json_value());
            }
            serde_json::Value::Object(object)
        })
        .collect()
}
