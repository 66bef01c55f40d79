// ============================================================
// CSV PARSER
// ============================================================
// Parse CSV uploads into a Dataset with encoding and delimiter detection

use csv::ReaderBuilder;

use crate::domain::error::{AppError, Result};
use crate::domain::table::{CellValue, Dataset};

/// CSV parser producing a typed `Dataset`.
///
/// Cell values are kept verbatim: trimming and case-folding are cleaning
/// operations, not parsing concerns. Short records are padded with nulls
/// and long records truncated so every row matches the header width.
pub struct CsvParser {
    /// Delimiter character (default: comma)
    delimiter: u8,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Parse raw upload bytes, detecting the encoding.
    ///
    /// UTF-8 is tried first; non-UTF-8 input falls back to Windows-1252,
    /// which decodes any byte sequence.
    pub fn parse_bytes(bytes: &[u8]) -> Result<Dataset> {
        match std::str::from_utf8(bytes) {
            Ok(content) => Self::parse_content_auto_detect(content),
            Err(_) => {
                let (content, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
                Self::parse_content_auto_detect(&content)
            }
        }
    }

    /// Parse CSV content with automatic delimiter detection.
    pub fn parse_content_auto_detect(content: &str) -> Result<Dataset> {
        let delimiter = Self::detect_delimiter(content);
        Self::new().with_delimiter(delimiter).parse_content(content)
    }

    /// Parse CSV content from a string. The first record is the header.
    pub fn parse_content(&self, content: &str) -> Result<Dataset> {
        if content.trim().is_empty() {
            return Ok(Dataset::empty());
        }

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true) // Allow rows with different lengths
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::Parse(format!("Failed to read CSV headers: {}", e)))?
            .iter()
            .map(|h| h.to_string())
            .collect::<Vec<_>>();

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::Parse(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;

            let row = record.iter().map(CellValue::from_raw).collect();
            rows.push(row);
        }

        tracing::debug!(
            columns = headers.len(),
            rows = rows.len(),
            "parsed CSV content"
        );

        Ok(Dataset::new(headers, rows))
    }

    /// Detect delimiter from content (comma, semicolon, tab, pipe).
    ///
    /// Scores each candidate by per-line frequency and consistency over
    /// the first sample lines.
    pub fn detect_delimiter(content: &str) -> u8 {
        const SAMPLE_LINES: usize = 10;
        let candidates = [b',', b';', b'\t', b'|'];

        let sample_lines: Vec<_> = content.lines().take(SAMPLE_LINES).collect();
        if sample_lines.is_empty() {
            return b',';
        }

        let mut best_delimiter = b',';
        let mut best_score = 0.0f32;

        for &delimiter in &candidates {
            let field_counts: Vec<usize> = sample_lines
                .iter()
                .map(|line| line.bytes().filter(|&b| b == delimiter).count())
                .collect();

            let avg = field_counts.iter().sum::<usize>() as f32 / field_counts.len() as f32;
            let variance = field_counts
                .iter()
                .map(|&x| (x as f32 - avg).powi(2))
                .sum::<f32>()
                / field_counts.len() as f32;

            let score = avg / (1.0 + variance.sqrt());
            if score > best_score {
                best_score = score;
                best_delimiter = delimiter;
            }
        }

        best_delimiter
    }
}
