// ============================================================
// JSON FLATTENER USE CASE
// ============================================================
// Expand selected keys of JSON-valued columns into new columns

use crate::domain::cleaning::{JsonExtractionConfig, JsonFlatteningReport};
use crate::domain::table::{CellValue, Dataset, JsonColumnInventory};

/// JSON flattening stage.
///
/// New columns are appended after existing ones as `<column>_<field>`;
/// the source JSON column is retained unmodified. Cells that are missing
/// or fail to parse leave the new fields null for that row, never
/// aborting the operation.
pub struct JsonFlattener<'a> {
    config: &'a JsonExtractionConfig,
    inventory: &'a JsonColumnInventory,
}

impl<'a> JsonFlattener<'a> {
    pub fn new(config: &'a JsonExtractionConfig, inventory: &'a JsonColumnInventory) -> Self {
        Self { config, inventory }
    }

    pub fn apply(&self, dataset: &Dataset) -> (Dataset, Option<JsonFlatteningReport>) {
        if !self.config.has_work() {
            return (dataset.clone(), None);
        }

        // Source columns in dataset order, each with its ordered fields
        let plan: Vec<(usize, String, Vec<String>)> = dataset
            .columns()
            .iter()
            .enumerate()
            .filter_map(|(index, name)| {
                let extraction = self.config.columns.get(name)?;
                if !extraction.enabled {
                    return None;
                }
                let fields = self.ordered_fields(name, extraction.enabled_fields());
                if fields.is_empty() {
                    return None;
                }
                Some((index, name.clone(), fields))
            })
            .collect();

        if plan.is_empty() {
            return (dataset.clone(), None);
        }

        let mut columns = dataset.columns().to_vec();
        let mut new_columns = Vec::new();
        for (_, name, fields) in &plan {
            for field in fields {
                let column = format!("{}_{}", name, field);
                columns.push(column.clone());
                new_columns.push(column);
            }
        }

        let rows: Vec<Vec<CellValue>> = dataset
            .rows()
            .iter()
            .map(|row| {
                let mut out = row.clone();
                for (index, _, fields) in &plan {
                    let object = row.get(*index).and_then(parse_json_object);
                    for field in fields {
                        let cell = object
                            .as_ref()
                            .and_then(|o| o.get(field))
                            .map(CellValue::from_json)
                            .unwrap_or(CellValue::Null);
                        out.push(cell);
                    }
                }
                out
            })
            .collect();

        tracing::debug!(
            columns_flattened = plan.len(),
            new_columns = new_columns.len(),
            "json flattening complete"
        );

        let report = JsonFlatteningReport {
            columns_flattened: plan.into_iter().map(|(_, name, _)| name).collect(),
            new_columns,
        };
        (Dataset::new(columns, rows), Some(report))
    }

    /// Enabled fields in the detector's inventory order; fields the
    /// detector never saw follow alphabetically.
    fn ordered_fields(&self, column: &str, enabled: Vec<&str>) -> Vec<String> {
        let inventory = self.inventory.fields_for(column).unwrap_or(&[]);

        let mut ordered: Vec<String> = inventory
            .iter()
            .filter(|field| enabled.contains(&field.as_str()))
            .cloned()
            .collect();

        let mut extras: Vec<String> = enabled
            .iter()
            .filter(|field| !inventory.iter().any(|known| known == *field))
            .map(|field| field.to_string())
            .collect();
        extras.sort();

        ordered.extend(extras);
        ordered
    }
}

/// Parse a cell as a JSON object, tolerating anything that is not one.
fn parse_json_object(cell: &CellValue) -> Option<serde_json::Map<String, serde_json::Value>> {
    let text = cell.as_text()?.trim();
    if !text.starts_with('{') {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(serde_json::Value::Object(object)) => Some(object),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cleaning::ColumnExtraction;
    use crate::domain::table::JsonColumnFields;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn dataset() -> Dataset {
        Dataset::new(
            vec!["id".to_string(), "metadata".to_string()],
            vec![
                vec![
                    CellValue::Number(1.0),
                    CellValue::Text(r#"{"city": "NY", "age": 30}"#.to_string()),
                ],
                vec![
                    CellValue::Number(2.0),
                    CellValue::Text("not json".to_string()),
                ],
                vec![CellValue::Number(3.0), CellValue::Null],
            ],
        )
    }

    fn inventory() -> JsonColumnInventory {
        JsonColumnInventory {
            columns: vec![JsonColumnFields {
                column: "metadata".to_string(),
                fields: vec!["city".to_string(), "age".to_string()],
            }],
        }
    }

    fn config(fields: &[(&str, bool)]) -> JsonExtractionConfig {
        let mut field_map = HashMap::new();
        for (name, enabled) in fields {
            field_map.insert(name.to_string(), *enabled);
        }
        let mut columns = HashMap::new();
        columns.insert(
            "metadata".to_string(),
            ColumnExtraction {
                enabled: true,
                fields: field_map,
            },
        );
        JsonExtractionConfig { columns }
    }

    #[test]
    fn test_flatten_appends_selected_fields() {
        let config = config(&[("city", true), ("age", true)]);
        let inventory = inventory();
        let flattener = JsonFlattener::new(&config, &inventory);
        let (result, report) = flattener.apply(&dataset());

        assert_eq!(
            result.columns(),
            &["id", "metadata", "metadata_city", "metadata_age"]
        );
        assert_eq!(result.rows()[0][2], CellValue::Text("NY".to_string()));
        assert_eq!(result.rows()[0][3], CellValue::Number(30.0));

        let report = report.unwrap();
        assert_eq!(report.columns_flattened, vec!["metadata"]);
        assert_eq!(report.new_columns, vec!["metadata_city", "metadata_age"]);
    }

    #[test]
    fn test_source_column_retained_unmodified() {
        let config = config(&[("city", true)]);
        let inventory = inventory();
        let flattener = JsonFlattener::new(&config, &inventory);
        let (result, _) = flattener.apply(&dataset());

        assert_eq!(
            result.rows()[0][1],
            CellValue::Text(r#"{"city": "NY", "age": 30}"#.to_string())
        );
    }

    #[test]
    fn test_unparsable_and_missing_cells_yield_null() {
        let config = config(&[("city", true)]);
        let inventory = inventory();
        let flattener = JsonFlattener::new(&config, &inventory);
        let (result, _) = flattener.apply(&dataset());

        assert_eq!(result.rows()[1][2], CellValue::Null);
        assert_eq!(result.rows()[2][2], CellValue::Null);
    }

    #[test]
    fn test_disabled_fields_not_extracted() {
        let config = config(&[("city", true), ("age", false)]);
        let inventory = inventory();
        let flattener = JsonFlattener::new(&config, &inventory);
        let (result, _) = flattener.apply(&dataset());

        assert_eq!(result.columns(), &["id", "metadata", "metadata_city"]);
    }

    #[test]
    fn test_fields_outside_inventory_sort_last() {
        let config = config(&[("zip", true), ("city", true)]);
        let inventory = inventory();
        let flattener = JsonFlattener::new(&config, &inventory);
        let (result, _) = flattener.apply(&dataset());

        assert_eq!(
            result.columns(),
            &["id", "metadata", "metadata_city", "metadata_zip"]
        );
    }

    #[test]
    fn test_no_work_is_noop() {
        let config = JsonExtractionConfig::default();
        let inventory = inventory();
        let flattener = JsonFlattener::new(&config, &inventory);
        let source = dataset();
        let (result, report) = flattener.apply(&source);

        assert_eq!(result, source);
        assert!(report.is_none());
    }

    #[test]
    fn test_absent_key_yields_null() {
        let ds = Dataset::new(
            vec!["metadata".to_string()],
            vec![vec![CellValue::Text(r#"{"age": 1}"#.to_string())]],
        );
        let config = config(&[("city", true)]);
        let inventory = inventory();
        let flattener = JsonFlattener::new(&config, &inventory);
        let (result, _) = flattener.apply(&ds);

        assert_eq!(result.rows()[0][1], CellValue::Null);
    }
}
