// ============================================================
// DATASET PROFILER USE CASE
// ============================================================
// Ingest-time statistics: type counts, missing share, distributions,
// JSON field inventory, and a leading-row preview

use std::collections::BTreeMap;

use crate::domain::profile::{
    ColumnTypeCounts, DatasetProfile, ValueDistribution, PREVIEW_ROWS, TOP_DISTRIBUTION_VALUES,
};
use crate::domain::table::{CellValue, ColumnClass, Dataset};
use crate::infrastructure::csv::ColumnClassifier;

/// Builds a [`DatasetProfile`] from a freshly parsed dataset.
pub struct DatasetProfiler<'a> {
    classifier: &'a ColumnClassifier,
}

impl<'a> DatasetProfiler<'a> {
    pub fn new(classifier: &'a ColumnClassifier) -> Self {
        Self { classifier }
    }

    pub fn profile(&self, dataset: &Dataset) -> DatasetProfile {
        let classes = self.classifier.classify(dataset);
        let inventory = self.classifier.detect_json_columns(dataset);

        let mut column_types = ColumnTypeCounts::default();
        for class in &classes {
            match class {
                ColumnClass::Text => column_types.text += 1,
                ColumnClass::Numeric => column_types.numeric += 1,
                ColumnClass::Json => column_types.json += 1,
            }
        }

        let total_cells = dataset.row_count() * dataset.column_count();
        let missing_data_percentage = if total_cells == 0 {
            0.0
        } else {
            dataset.missing_cell_count() as f64 / total_cells as f64 * 100.0
        };

        let distributions: BTreeMap<String, ValueDistribution> = dataset
            .columns()
            .iter()
            .enumerate()
            .filter(|(index, _)| classes[*index] != ColumnClass::Json)
            .map(|(index, name)| (name.clone(), column_distribution(dataset, index)))
            .collect();

        let json_fields: BTreeMap<String, Vec<String>> = inventory
            .columns
            .iter()
            .map(|c| (c.column.clone(), c.fields.clone()))
            .collect();

        let preview: Vec<serde_json::Value> = dataset
            .rows()
            .iter()
            .take(PREVIEW_ROWS)
            .map(|row| {
                let mut object = serde_json::Map::new();
                for (name, cell) in dataset.columns().iter().zip(row) {
                    object.insert(name.clone(), cell.to_json_value());
                }
                serde_json::Value::Object(object)
            })
            .collect();

        DatasetProfile {
            total_rows: dataset.row_count(),
            total_columns: dataset.column_count(),
            missing_data_percentage,
            column_types,
            json_columns: inventory.column_names(),
            json_fields,
            distributions,
            preview,
            column_names: dataset.columns().to_vec(),
        }
    }
}

/// Top display values of a column by frequency. Ties keep the value seen
/// first, so repeated profiling of the same data is deterministic.
fn column_distribution(dataset: &Dataset, index: usize) -> ValueDistribution {
    let mut counts: Vec<(String, usize)> = Vec::new();

    for cell in dataset.column_values(index) {
        if cell.is_missing() {
            continue;
        }
        let text = cell.to_display_string();
        match counts.iter_mut().find(|(value, _)| *value == text) {
            Some((_, count)) => *count += 1,
            None => counts.push((text, 1)),
        }
    }

    // Stable sort preserves first-seen order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(TOP_DISTRIBUTION_VALUES);

    ValueDistribution {
        values: counts.iter().map(|(value, _)| value.clone()).collect(),
        counts: counts.into_iter().map(|(_, count)| count).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dataset() -> Dataset {
        Dataset::new(
            vec!["status".to_string(), "age".to_string(), "meta".to_string()],
            vec![
                vec![
                    CellValue::Text("active".to_string()),
                    CellValue::Number(30.0),
                    CellValue::Text(r#"{"city":"NY"}"#.to_string()),
                ],
                vec![
                    CellValue::Text("active".to_string()),
                    CellValue::Null,
                    CellValue::Text(r#"{"city":"LA"}"#.to_string()),
                ],
                vec![
                    CellValue::Text("closed".to_string()),
                    CellValue::Number(45.0),
                    CellValue::Null,
                ],
            ],
        )
    }

    #[test]
    fn test_profile_counts_and_missing_share() {
        let classifier = ColumnClassifier::default();
        let profile = DatasetProfiler::new(&classifier).profile(&dataset());

        assert_eq!(profile.total_rows, 3);
        assert_eq!(profile.total_columns, 3);
        assert_eq!(profile.column_types.text, 1);
        assert_eq!(profile.column_types.numeric, 1);
        assert_eq!(profile.column_types.json, 1);
        // 2 missing cells of 9
        assert!((profile.missing_data_percentage - 22.222).abs() < 0.01);
        assert_eq!(profile.json_columns, vec!["meta"]);
        assert_eq!(profile.json_fields["meta"], vec!["city"]);
    }

    #[test]
    fn test_distributions_skip_json_columns() {
        let classifier = ColumnClassifier::default();
        let profile = DatasetProfiler::new(&classifier).profile(&dataset());

        assert!(profile.distributions.contains_key("status"));
        assert!(!profile.distributions.contains_key("meta"));

        let status = &profile.distributions["status"];
        assert_eq!(status.values, vec!["active", "closed"]);
        assert_eq!(status.counts, vec![2, 1]);
    }

    #[test]
    fn test_preview_rows_as_objects() {
        let classifier = ColumnClassifier::default();
        let profile = DatasetProfiler::new(&classifier).profile(&dataset());

        assert_eq!(profile.preview.len(), 3);
        assert_eq!(profile.preview[0]["status"], "active");
        assert_eq!(profile.preview[0]["age"], 30);
        assert_eq!(profile.preview[1]["age"], serde_json::Value::Null);
    }

    #[test]
    fn test_empty_dataset_profile() {
        let classifier = ColumnClassifier::default();
        let profile = DatasetProfiler::new(&classifier).profile(&Dataset::empty());

        assert_eq!(profile.total_rows, 0);
        assert_eq!(profile.missing_data_percentage, 0.0);
        assert!(profile.preview.is_empty());
    }
}
