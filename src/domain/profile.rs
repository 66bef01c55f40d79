// ============================================================
// DATASET PROFILE
// ============================================================
// Statistics returned at ingest time: row/column counts, missing-data
// share, column type counts, value distributions, and a row preview

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Number of leading rows included in the profile preview.
pub const PREVIEW_ROWS: usize = 20;

/// Number of top values reported per column distribution.
pub const TOP_DISTRIBUTION_VALUES: usize = 10;

/// Counts of columns per inferred classification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnTypeCounts {
    pub text: usize,
    pub numeric: usize,
    pub json: usize,
}

/// Top values of one column by frequency, most frequent first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueDistribution {
    pub values: Vec<String>,
    pub counts: Vec<usize>,
}

/// Summary of an uploaded dataset, built once at ingest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetProfile {
    pub total_rows: usize,
    pub total_columns: usize,
    pub missing_data_percentage: f64,
    pub column_types: ColumnTypeCounts,
    pub json_columns: Vec<String>,
    pub json_fields: BTreeMap<String, Vec<String>>,
    pub distributions: BTreeMap<String, ValueDistribution>,
    /// First rows as JSON objects keyed by column name, missing cells null.
    pub preview: Vec<serde_json::Value>,
    pub column_names: Vec<String>,
}
