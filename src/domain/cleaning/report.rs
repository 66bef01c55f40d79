// ============================================================
// CLEANING REPORT
// ============================================================
// Structured record of every effectful pipeline stage. The readable
// summary is rendered purely from the structured fields, so no
// information exists only in prose form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Stage identifiers as they appear in `operations_performed`,
/// in fixed pipeline order.
pub mod ops {
    pub const COLUMN_NORMALIZATION: &str = "column_normalization";
    pub const MISSING_DATA_HANDLING: &str = "missing_data_handling";
    pub const STRING_CLEANING: &str = "string_cleaning";
    pub const ROW_FILTERING: &str = "row_filtering";
    pub const JSON_FLATTENING: &str = "json_flattening";
}

/// Row/column counts taken before the first stage and after the last.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningSummary {
    pub original_rows: usize,
    pub original_columns: usize,
    pub final_rows: usize,
    pub final_columns: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissingDataReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cells_filled: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows_removed: Option<usize>,
    /// Column name to fill method name, for smart fill.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fill_methods_used: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringCleaningReport {
    /// Number of distinct columns with at least one changed cell.
    pub fields_cleaned: usize,
    pub operations_applied: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilteringReport {
    pub rows_filtered: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonFlatteningReport {
    pub columns_flattened: Vec<String>,
    pub new_columns: Vec<String>,
}

/// Aggregated result of one cleaning invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleaningReport {
    pub summary: CleaningSummary,
    pub operations_performed: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub column_changes: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_data_report: Option<MissingDataReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string_cleaning_report: Option<StringCleaningReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filtering_report: Option<FilteringReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_flattening_report: Option<JsonFlatteningReport>,
    pub readable_summary: Vec<String>,
}

impl CleaningReport {
    pub fn new(original_rows: usize, original_columns: usize) -> Self {
        Self {
            summary: CleaningSummary {
                original_rows,
                original_columns,
                final_rows: original_rows,
                final_columns: original_columns,
            },
            ..Self::default()
        }
    }

    /// Render the human-readable summary from the structured fields.
    ///
    /// One contiguous block per stage that actually made changes; empty
    /// when every stage was a no-op.
    pub fn render_readable_summary(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if self.operations_performed.is_empty() {
            return lines;
        }

        lines.push(format!(
            "Data processed: {} → {} rows, {} → {} columns.",
            self.summary.original_rows,
            self.summary.final_rows,
            self.summary.original_columns,
            self.summary.final_columns
        ));

        if !self.column_changes.is_empty() {
            lines.push(format!(
                "Normalized {} column names.",
                self.column_changes.len()
            ));
        }

        if let Some(missing) = &self.missing_data_report {
            if let Some(removed) = missing.rows_removed.filter(|r| *r > 0) {
                lines.push(format!(
                    "Removed {} rows containing missing values.",
                    removed
                ));
            }
            if let Some(filled) = missing.cells_filled.filter(|f| *f > 0) {
                let methods = distinct_methods(&missing.fill_methods_used);
                match methods.as_slice() {
                    [] => lines.push(format!("Filled {} missing values.", filled)),
                    [(method, columns)] => lines.push(format!(
                        "Filled {} missing values using {} imputation for {} columns.",
                        filled, method, columns
                    )),
                    many => {
                        lines.push(format!("Filled {} missing values.", filled));
                        for (method, columns) in many {
                            lines.push(format!(
                                "Used {} imputation for {} columns.",
                                method, columns
                            ));
                        }
                    }
                }
            }
        }

        if let Some(string_cleaning) = &self.string_cleaning_report {
            if string_cleaning.fields_cleaned > 0 {
                lines.push(format!(
                    "Cleaned text in {} columns ({}).",
                    string_cleaning.fields_cleaned,
                    string_cleaning.operations_applied.join(", ")
                ));
            }
        }

        if let Some(filtering) = &self.filtering_report {
            if filtering.rows_filtered > 0 {
                lines.push(format!("Filtered out {} rows.", filtering.rows_filtered));
            }
        }

        if let Some(flattening) = &self.json_flattening_report {
            if !flattening.new_columns.is_empty() {
                lines.push(format!(
                    "Flattened {} JSON columns into {} new columns.",
                    flattening.columns_flattened.len(),
                    flattening.new_columns.len()
                ));
            }
        }

        lines
    }
}

/// Distinct fill methods with the number of columns each was used for,
/// ordered by method name for deterministic output.
fn distinct_methods(fill_methods_used: &BTreeMap<String, String>) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for method in fill_methods_used.values() {
        *counts.entry(method.as_str()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(method, count)| (method.to_string(), count))
        .collect()
}
