// ============================================================
// COLUMN CLASSIFICATION
// ============================================================
// Derived type tags and the thresholds that drive them

use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};

/// Inferred type tag for a column. Classification drives default
/// imputation and display hints only; it never changes stored values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnClass {
    Text,
    Numeric,
    Json,
}

/// Thresholds for column classification and JSON column detection.
///
/// These are policy knobs rather than hard-coded magic numbers so tests
/// can override them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Maximum number of non-missing values sampled per column (default: 100)
    pub sample_rows: usize,

    /// Fraction of sampled values that must parse as JSON objects for a
    /// column to classify as JSON (default: 0.10)
    pub json_ratio_threshold: f64,

    /// Fraction of sampled values that must parse numerically for a
    /// column to classify as numeric (default: 0.8)
    pub numeric_ratio_threshold: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            sample_rows: 100,
            json_ratio_threshold: 0.10,
            numeric_ratio_threshold: 0.8,
        }
    }
}

impl DetectionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate threshold values, naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.sample_rows == 0 {
            return Err(AppError::Validation(
                "sampleRows must be > 0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.json_ratio_threshold) {
            return Err(AppError::Validation(
                "jsonRatioThreshold must be between 0.0 and 1.0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.numeric_ratio_threshold) {
            return Err(AppError::Validation(
                "numericRatioThreshold must be between 0.0 and 1.0".to_string(),
            ));
        }
        Ok(())
    }
}

/// One detected JSON column and the object keys seen in its sample,
/// deduplicated in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonColumnFields {
    pub column: String,
    pub fields: Vec<String>,
}

/// Result of JSON column detection across a dataset, in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonColumnInventory {
    pub columns: Vec<JsonColumnFields>,
}

impl JsonColumnInventory {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn fields_for(&self, column: &str) -> Option<&[String]> {
        self.columns
            .iter()
            .find(|c| c.column == column)
            .map(|c| c.fields.as_slice())
    }

    /// Column names only, in detection order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.column.clone()).collect()
    }
}
