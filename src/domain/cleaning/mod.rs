// ============================================================
// CLEANING DOMAIN LAYER
// ============================================================
// Declarative cleaning configuration and the structured report
// produced by a cleaning run

mod extraction;
mod options;
mod report;

pub use extraction::{ColumnExtraction, JsonExtractionConfig};
pub use options::{
    CleaningOptions, ColumnFilter, FillMethod, FilterOperator, FilteringOptions,
    MissingDataOptions, MissingDataStrategy, NormalizeColumnsOptions, StringCleaningOptions,
};
pub use report::{
    ops, CleaningReport, CleaningSummary, FilteringReport, JsonFlatteningReport,
    MissingDataReport, StringCleaningReport,
};
