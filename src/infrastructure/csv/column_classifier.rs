// ============================================================
// COLUMN CLASSIFIER
// ============================================================
// Sample column values to infer type tags and detect JSON columns

use crate::domain::table::{
    CellValue, ColumnClass, Dataset, DetectionConfig, JsonColumnFields, JsonColumnInventory,
};

/// Classifies columns and detects JSON-valued columns from a value sample.
pub struct ColumnClassifier {
    config: DetectionConfig,
}

impl ColumnClassifier {
    pub fn new(config: DetectionConfig) -> Self {
        Self { config }
    }

    /// Classify every column, in column order.
    ///
    /// JSON outranks numeric: a column whose values are JSON objects never
    /// classifies as numeric even if the remainder parses numerically.
    /// Columns with no non-missing values classify as text.
    pub fn classify(&self, dataset: &Dataset) -> Vec<ColumnClass> {
        (0..dataset.column_count())
            .map(|index| self.classify_column(dataset, index))
            .collect()
    }

    fn classify_column(&self, dataset: &Dataset, index: usize) -> ColumnClass {
        let sample = self.sample_column(dataset, index);
        if sample.is_empty() {
            return ColumnClass::Text;
        }

        // The JSON ratio is taken over the whole sample window, missing
        // cells included, so a sparse column does not inflate the ratio
        let json_count = sample
            .iter()
            .filter(|cell| parse_json_object(cell).is_some())
            .count();
        if json_count as f64 > sample.len() as f64 * self.config.json_ratio_threshold {
            return ColumnClass::Json;
        }

        // The numeric ratio only considers values that are present
        let non_missing = sample.iter().filter(|cell| !cell.is_missing()).count();
        if non_missing == 0 {
            return ColumnClass::Text;
        }
        let numeric_count = sample
            .iter()
            .filter(|cell| cell.as_number().is_some())
            .count();
        if numeric_count as f64 > non_missing as f64 * self.config.numeric_ratio_threshold {
            return ColumnClass::Numeric;
        }

        ColumnClass::Text
    }

    /// Scan the dataset for columns whose values are predominantly JSON
    /// objects, collecting the union of top-level keys in first-seen order.
    pub fn detect_json_columns(&self, dataset: &Dataset) -> JsonColumnInventory {
        let mut columns = Vec::new();

        for (index, name) in dataset.columns().iter().enumerate() {
            let sample = self.sample_column(dataset, index);
            if sample.is_empty() {
                continue;
            }

            let mut json_count = 0usize;
            let mut fields: Vec<String> = Vec::new();

            for cell in &sample {
                if let Some(object) = parse_json_object(cell) {
                    json_count += 1;
                    for key in object.keys() {
                        if !fields.iter().any(|f| f == key) {
                            fields.push(key.clone());
                        }
                    }
                }
            }

            if json_count as f64 > sample.len() as f64 * self.config.json_ratio_threshold {
                columns.push(JsonColumnFields {
                    column: name.clone(),
                    fields,
                });
            }
        }

        tracing::debug!(json_columns = columns.len(), "JSON column detection complete");
        JsonColumnInventory { columns }
    }

    /// First values of a column, capped at the sample limit. Missing
    /// cells stay in the sample; they count toward the ratio denominators.
    fn sample_column<'a>(&self, dataset: &'a Dataset, index: usize) -> Vec<&'a CellValue> {
        dataset
            .column_values(index)
            .take(self.config.sample_rows)
            .collect()
    }
}

impl Default for ColumnClassifier {
    fn default() -> Self {
        Self::new(DetectionConfig::default())
    }
}

/// Parse a cell as a JSON object. Anything that is not text starting with
/// `{`, or that fails to parse, is ignored rather than propagated.
fn parse_json_object(cell: &CellValue) -> Option<serde_json::Map<String, serde_json::Value>> {
    let text = cell.as_text()?;
    if !text.trim_start().starts_with('{') {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(serde_json::Value::Object(map)) => Some(map),
        _ => None,
    }
}
