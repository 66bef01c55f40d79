//! CSV cleaning and transformation core.
//!
//! Takes an in-memory tabular dataset, applies a declarative cleaning
//! configuration (column normalization, missing-data handling, string
//! cleaning, row filtering, JSON flattening) and produces a new dataset
//! together with a structured cleaning report. The final dataset can be
//! exported as CSV, JSON, or XLSX.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::use_cases::processor::CsvProcessor;
pub use domain::cleaning::{CleaningOptions, CleaningReport, JsonExtractionConfig};
pub use domain::error::{AppError, Result};
pub use domain::profile::DatasetProfile;
pub use domain::table::{
    CellValue, ColumnClass, Dataset, DetectionConfig, JsonColumnInventory,
};
pub use infrastructure::csv::CsvParser;
pub use infrastructure::export::{Export, ExportFormat, ExportOptions};
