// ============================================================
// TABLE DOMAIN LAYER
// ============================================================
// Core types for in-memory tabular datasets
// No I/O, no async

mod cell;
mod classification;
mod dataset;

pub use cell::CellValue;
pub use classification::{ColumnClass, DetectionConfig, JsonColumnFields, JsonColumnInventory};
pub use dataset::{dedupe_column_names, Dataset};
