// ============================================================
// CSV EXPORT
// ============================================================

use csv::WriterBuilder;

use crate::domain::error::{AppError, Result};
use crate::domain::table::Dataset;

/// Serialize the dataset as CSV bytes using standard quoting rules, so
/// values containing delimiters, quotes, or newlines round-trip exactly.
pub fn write_csv(dataset: &Dataset, include_headers: bool) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());

    if include_headers && !dataset.columns().is_empty() {
        writer
            .write_record(dataset.columns())
            .map_err(|e| AppError::Export(format!("Failed to write CSV headers: {}", e)))?;
    }

    for row in dataset.rows() {
        let record: Vec<String> = row.iter().map(|cell| cell.to_display_string()).collect();
        writer
            .write_record(&record)
            .map_err(|e| AppError::Export(format!("Failed to write CSV row: {}", e)))?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Export(format!("Failed to flush CSV output: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::csv::CsvParser;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_round_trip_with_quoting() {
        let source = "name,notes\nAlice,\"has, commas\"\nBob,\"line\nbreak\"";
        let dataset = CsvParser::new().parse_content(source).unwrap();

        let bytes = write_csv(&dataset, true).unwrap();
        let reparsed = CsvParser::new()
            .parse_content(&String::from_utf8(bytes).unwrap())
            .unwrap();

        assert_eq!(reparsed, dataset);
    }

    #[test]
    fn test_headers_omitted() {
        let dataset = CsvParser::new().parse_content("a,b\n1,2").unwrap();
        let bytes = write_csv(&dataset, false).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "1,2\n");
    }
}
