// ============================================================
// EXPORT INFRASTRUCTURE LAYER
// ============================================================
// Serialize a dataset to CSV, JSON, or XLSX bytes

mod csv_export;
mod json_export;
mod xlsx_export;

pub use csv_export::write_csv;
pub use json_export::write_json;
pub use xlsx_export::write_xlsx;

use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};

/// Target export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
    Xlsx,
}

impl ExportFormat {
    /// Parse a format name from the request. `spreadsheet` is accepted as
    /// an alias for `xlsx`; anything else is rejected before serialization
    /// is attempted.
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "xlsx" | "spreadsheet" => Ok(ExportFormat::Xlsx),
            other => Err(AppError::UnsupportedFormat(format!(
                "unsupported export format: {}",
                other
            ))),
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    pub fn file_extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

/// Export tuning flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportOptions {
    pub include_headers: bool,
    /// JSON export only: wrap the rows with the cleaning report.
    pub include_metadata: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_headers: true,
            include_metadata: false,
        }
    }
}

/// Serialized export payload plus its HTTP content type.
#[derive(Debug, Clone)]
pub struct Export {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}
