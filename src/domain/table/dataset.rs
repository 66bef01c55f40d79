// ============================================================
// DATASET
// ============================================================
// Ordered columns plus rows of cell values

use serde::{Deserialize, Serialize};

use super::CellValue;

/// An in-memory table of named columns and ordered rows.
///
/// Invariant: column names are unique and every row has exactly
/// `columns.len()` cells, in column order. The constructor enforces both,
/// padding short rows with nulls and disambiguating duplicate names, so a
/// `Dataset` is well-formed from birth. Pipeline stages never mutate a
/// dataset in place; they build a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let columns = dedupe_column_names(columns);
        let width = columns.len();

        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.truncate(width);
                while row.len() < width {
                    row.push(CellValue::Null);
                }
                row
            })
            .collect();

        Self { columns, rows }
    }

    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Iterate the cells of one column, top to bottom.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &CellValue> {
        self.rows
            .iter()
            .filter_map(move |row| row.get(index))
    }

    /// Count of missing cells across the whole table.
    pub fn missing_cell_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.iter())
            .filter(|cell| cell.is_missing())
            .count()
    }
}

/// Make a list of column names unique while preserving order.
///
/// The first occurrence keeps its name; later duplicates get a numeric
/// suffix (`name_2`, `name_3`, ...). Used both at parse time and after
/// column normalization, where distinct headers can collide.
pub fn dedupe_column_names(names: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(names.len());

    for name in names {
        if !seen.contains(&name) {
            seen.push(name);
            continue;
        }

        let mut suffix = 2usize;
        loop {
            let candidate = format!("{}_{}", name, suffix);
            if !seen.contains(&candidate) {
                seen.push(candidate);
                break;
            }
            suffix += 1;
        }
    }

    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rows_padded_and_truncated() {
        let ds = Dataset::new(
            vec!["a".to_string(), "b".to_string()],
            vec![
                vec![CellValue::Number(1.0)],
                vec![
                    CellValue::Number(2.0),
                    CellValue::Number(3.0),
                    CellValue::Number(4.0),
                ],
            ],
        );

        assert_eq!(ds.rows()[0], vec![CellValue::Number(1.0), CellValue::Null]);
        assert_eq!(
            ds.rows()[1],
            vec![CellValue::Number(2.0), CellValue::Number(3.0)]
        );
    }

    #[test]
    fn test_duplicate_columns_disambiguated() {
        let names = dedupe_column_names(vec![
            "id".to_string(),
            "id".to_string(),
            "id".to_string(),
            "id_2".to_string(),
        ]);
        assert_eq!(names, vec!["id", "id_2", "id_3", "id_2_2"]);
    }

    #[test]
    fn test_missing_cell_count() {
        let ds = Dataset::new(
            vec!["a".to_string(), "b".to_string()],
            vec![
                vec![CellValue::Null, CellValue::Text("x".to_string())],
                vec![CellValue::Text("  ".to_string()), CellValue::Number(1.0)],
            ],
        );
        assert_eq!(ds.missing_cell_count(), 2);
    }
}
