// ============================================================
// CSV PROCESSOR
// ============================================================
// Stateless facade over the cleaning pipeline: detection, profiling,
// cleaning, flattening, and export. Each call takes an explicit dataset
// and returns a new one; no state survives between calls.

use crate::application::use_cases::column_normalizer::ColumnNormalizer;
use crate::application::use_cases::json_flattener::JsonFlattener;
use crate::application::use_cases::missing_data::MissingDataResolver;
use crate::application::use_cases::profiler::DatasetProfiler;
use crate::application::use_cases::row_filter::RowFilter;
use crate::application::use_cases::string_cleaner::StringCleaner;
use crate::domain::cleaning::{ops, CleaningOptions, CleaningReport, JsonExtractionConfig};
use crate::domain::error::Result;
use crate::domain::profile::DatasetProfile;
use crate::domain::table::{Dataset, DetectionConfig, JsonColumnInventory};
use crate::infrastructure::csv::ColumnClassifier;
use crate::infrastructure::export::{self, Export, ExportFormat, ExportOptions};

pub struct CsvProcessor {
    classifier: ColumnClassifier,
}

impl CsvProcessor {
    pub fn new() -> Self {
        Self {
            classifier: ColumnClassifier::default(),
        }
    }

    /// Build a processor with custom detection thresholds. Rejects
    /// out-of-range thresholds up front.
    pub fn with_config(config: DetectionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            classifier: ColumnClassifier::new(config),
        })
    }

    /// Scan a dataset for JSON-valued columns and their observed keys.
    pub fn detect_json_columns(&self, dataset: &Dataset) -> JsonColumnInventory {
        self.classifier.detect_json_columns(dataset)
    }

    /// Ingest-time statistics for a freshly parsed dataset.
    pub fn profile(&self, dataset: &Dataset) -> DatasetProfile {
        DatasetProfiler::new(&self.classifier).profile(dataset)
    }

    /// Run the cleaning pipeline: column normalization, missing-data
    /// handling, string cleaning, row filtering, then JSON flattening when
    /// an extraction config is supplied. Stages run in that fixed order;
    /// `operations_performed` lists only the stages that changed something.
    pub fn clean(
        &self,
        dataset: &Dataset,
        options: &CleaningOptions,
        extraction: Option<&JsonExtractionConfig>,
    ) -> Result<(Dataset, CleaningReport)> {
        options.validate()?;
        if let Some(extraction) = extraction {
            extraction.validate()?;
        }

        tracing::info!(
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            "cleaning started"
        );

        let mut report = CleaningReport::new(dataset.row_count(), dataset.column_count());

        // Column types are inferred once, before any stage mutates values
        let classes = self.classifier.classify(dataset);

        let normalizer = ColumnNormalizer::new(options.normalize_columns.clone());
        let (mut current, column_changes) = normalizer.apply(dataset);
        if !column_changes.is_empty() {
            report
                .operations_performed
                .push(ops::COLUMN_NORMALIZATION.to_string());
            report.column_changes = column_changes;
        }

        let resolver = MissingDataResolver::new(options.missing_data.clone());
        let (next, missing_report) = resolver.apply(&current, &classes);
        current = next;
        if let Some(missing_report) = missing_report {
            report
                .operations_performed
                .push(ops::MISSING_DATA_HANDLING.to_string());
            report.missing_data_report = Some(missing_report);
        }

        let cleaner = StringCleaner::new(options.string_cleaning.clone());
        let (next, string_report) = cleaner.apply(&current, &classes);
        current = next;
        if let Some(string_report) = string_report {
            report
                .operations_performed
                .push(ops::STRING_CLEANING.to_string());
            report.string_cleaning_report = Some(string_report);
        }

        let filter = RowFilter::new(options.filtering.clone());
        let (next, filter_report) = filter.apply(&current);
        current = next;
        if let Some(filter_report) = filter_report {
            report
                .operations_performed
                .push(ops::ROW_FILTERING.to_string());
            report.filtering_report = Some(filter_report);
        }

        if let Some(extraction) = extraction {
            let inventory = self.classifier.detect_json_columns(&current);
            let flattener = JsonFlattener::new(extraction, &inventory);
            let (next, flatten_report) = flattener.apply(&current);
            current = next;
            if let Some(flatten_report) = flatten_report {
                report
                    .operations_performed
                    .push(ops::JSON_FLATTENING.to_string());
                report.json_flattening_report = Some(flatten_report);
            }
        }

        report.summary.final_rows = current.row_count();
        report.summary.final_columns = current.column_count();
        if options.generate_report {
            report.readable_summary = report.render_readable_summary();
        }

        tracing::info!(
            rows = current.row_count(),
            columns = current.column_count(),
            operations = report.operations_performed.len(),
            "cleaning finished"
        );

        Ok((current, report))
    }

    /// Flatten JSON columns on their own, outside a cleaning run.
    pub fn flatten(
        &self,
        dataset: &Dataset,
        extraction: &JsonExtractionConfig,
    ) -> Result<Dataset> {
        extraction.validate()?;
        let inventory = self.classifier.detect_json_columns(dataset);
        let (flattened, _) = JsonFlattener::new(extraction, &inventory).apply(dataset);
        Ok(flattened)
    }

    /// Serialize a dataset to the requested format. The cleaning report is
    /// only consulted for JSON exports with `include_metadata` set.
    pub fn export(
        &self,
        dataset: &Dataset,
        format: ExportFormat,
        options: &ExportOptions,
        report: Option<&CleaningReport>,
    ) -> Result<Export> {
        let bytes = match format {
            ExportFormat::Csv => export::write_csv(dataset, options.include_headers)?,
            ExportFormat::Json => export::write_json(dataset, options.include_metadata, report)?,
            ExportFormat::Xlsx => export::write_xlsx(dataset, options.include_headers)?,
        };

        Ok(Export {
            bytes,
            content_type: format.content_type(),
        })
    }
}

impl Default for CsvProcessor {
    fn default() -> Self {
        Self::new()
    }
}
