// ============================================================
// XLSX EXPORT
// ============================================================

use rust_xlsxwriter::Workbook;

use crate::domain::error::{AppError, Result};
use crate::domain::table::{CellValue, Dataset};

/// Serialize the dataset as a single-worksheet XLSX workbook.
/// Numbers and booleans keep their native cell types; nulls stay blank.
pub fn write_xlsx(dataset: &Dataset, include_headers: bool) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let mut row_offset = 0u32;
    if include_headers {
        for (col, name) in dataset.columns().iter().enumerate() {
            worksheet
                .write_string(0, col as u16, name)
                .map_err(|e| AppError::Export(format!("Failed to write XLSX header: {}", e)))?;
        }
        row_offset = 1;
    }

    for (row_index, row) in dataset.rows().iter().enumerate() {
        let target_row = row_offset + row_index as u32;
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            let result = match cell {
                CellValue::Null => continue,
                CellValue::Number(n) => worksheet.write_number(target_row, col, *n),
                CellValue::Bool(b) => worksheet.write_boolean(target_row, col, *b),
                CellValue::Text(s) => worksheet.write_string(target_row, col, s),
            };
            result.map_err(|e| AppError::Export(format!("Failed to write XLSX cell: {}", e)))?;
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| AppError::Export(format!("Failed to serialize XLSX workbook: {}", e)))
}
