// ============================================================
// STRING CLEANER USE CASE
// ============================================================
// Per-cell text normalization for text-classified columns

use crate::domain::cleaning::StringCleaningOptions;
use crate::domain::cleaning::StringCleaningReport;
use crate::domain::table::{CellValue, ColumnClass, Dataset};

/// Text cleanup stage. Runs only when explicitly enabled.
pub struct StringCleaner {
    options: StringCleaningOptions,
}

impl StringCleaner {
    pub fn new(options: StringCleaningOptions) -> Self {
        Self { options }
    }

    /// Clean text cells in the targeted columns. Targets are the caller's
    /// `specific_columns` when given, otherwise every text-classified
    /// column. Non-text cells and JSON columns pass through unchanged.
    pub fn apply(
        &self,
        dataset: &Dataset,
        classes: &[ColumnClass],
    ) -> (Dataset, Option<StringCleaningReport>) {
        if !self.options.enabled || !self.any_operation() {
            return (dataset.clone(), None);
        }

        let targets: Vec<bool> = if self.options.specific_columns.is_empty() {
            classes
                .iter()
                .map(|class| *class == ColumnClass::Text)
                .collect()
        } else {
            dataset
                .columns()
                .iter()
                .enumerate()
                .map(|(index, name)| {
                    self.options.specific_columns.contains(name)
                        && classes.get(index).copied() != Some(ColumnClass::Json)
                })
                .collect()
        };

        let mut column_changed = vec![false; dataset.column_count()];

        let rows: Vec<Vec<CellValue>> = dataset
            .rows()
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(index, cell)| {
                        if !targets[index] {
                            return cell.clone();
                        }
                        match cell {
                            CellValue::Text(text) if !cell.is_missing() => {
                                let cleaned = self.clean_text(text);
                                if cleaned != *text {
                                    column_changed[index] = true;
                                }
                                CellValue::Text(cleaned)
                            }
                            other => other.clone(),
                        }
                    })
                    .collect()
            })
            .collect();

        let fields_cleaned = column_changed.iter().filter(|changed| **changed).count();
        let dataset = Dataset::new(dataset.columns().to_vec(), rows);

        if fields_cleaned == 0 {
            return (dataset, None);
        }

        tracing::debug!(fields_cleaned, "string cleaning complete");
        (
            dataset,
            Some(StringCleaningReport {
                fields_cleaned,
                operations_applied: self.operation_names(),
            }),
        )
    }

    fn any_operation(&self) -> bool {
        self.options.trim_whitespace || self.options.lowercase || self.options.remove_punctuation
    }

    fn operation_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        if self.options.trim_whitespace {
            names.push("trim_whitespace".to_string());
        }
        if self.options.lowercase {
            names.push("lowercase".to_string());
        }
        if self.options.remove_punctuation {
            names.push("remove_punctuation".to_string());
        }
        names
    }

    fn clean_text(&self, text: &str) -> String {
        let mut out = text.to_string();

        if self.options.trim_whitespace {
            out = out.trim().to_string();
        }
        if self.options.lowercase {
            out = out.to_lowercase();
        }
        if self.options.remove_punctuation {
            // Trailing punctuation only; leading and interior stays
            out = out
                .trim_end_matches(|c: char| !c.is_alphanumeric())
                .to_string();
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dataset() -> Dataset {
        Dataset::new(
            vec!["name".to_string(), "score".to_string()],
            vec![
                vec![
                    CellValue::Text("  Alice!!  ".to_string()),
                    CellValue::Number(90.0),
                ],
                vec![CellValue::Text("Bob".to_string()), CellValue::Number(85.0)],
            ],
        )
    }

    fn options(
        trim_whitespace: bool,
        lowercase: bool,
        remove_punctuation: bool,
    ) -> StringCleaningOptions {
        StringCleaningOptions {
            enabled: true,
            trim_whitespace,
            lowercase,
            remove_punctuation,
            specific_columns: Vec::new(),
        }
    }

    #[test]
    fn test_all_operations_applied_in_order() {
        let cleaner = StringCleaner::new(options(true, true, true));
        let (result, report) = cleaner.apply(&dataset(), &[ColumnClass::Text, ColumnClass::Numeric]);

        assert_eq!(result.rows()[0][0], CellValue::Text("alice".to_string()));
        assert_eq!(result.rows()[1][0], CellValue::Text("bob".to_string()));
        let report = report.unwrap();
        assert_eq!(report.fields_cleaned, 1);
        assert_eq!(
            report.operations_applied,
            vec!["trim_whitespace", "lowercase", "remove_punctuation"]
        );
    }

    #[test]
    fn test_disabled_is_noop() {
        let cleaner = StringCleaner::new(StringCleaningOptions::default());
        let source = dataset();
        let (result, report) = cleaner.apply(&source, &[ColumnClass::Text, ColumnClass::Numeric]);

        assert_eq!(result, source);
        assert!(report.is_none());
    }

    #[test]
    fn test_non_text_cells_pass_through() {
        let cleaner = StringCleaner::new(options(true, true, true));
        let (result, _) = cleaner.apply(&dataset(), &[ColumnClass::Text, ColumnClass::Numeric]);
        assert_eq!(result.rows()[0][1], CellValue::Number(90.0));
    }

    #[test]
    fn test_json_columns_skipped() {
        let ds = Dataset::new(
            vec!["meta".to_string()],
            vec![vec![CellValue::Text(r#"{"a": 1}"#.to_string())]],
        );
        let cleaner = StringCleaner::new(StringCleaningOptions {
            specific_columns: vec!["meta".to_string()],
            ..options(true, true, true)
        });
        let (result, report) = cleaner.apply(&ds, &[ColumnClass::Json]);

        assert_eq!(result, ds);
        assert!(report.is_none());
    }

    #[test]
    fn test_specific_columns_limit_targets() {
        let ds = Dataset::new(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![
                CellValue::Text(" x ".to_string()),
                CellValue::Text(" y ".to_string()),
            ]],
        );
        let cleaner = StringCleaner::new(StringCleaningOptions {
            specific_columns: vec!["b".to_string()],
            ..options(true, false, false)
        });
        let (result, report) = cleaner.apply(&ds, &[ColumnClass::Text, ColumnClass::Text]);

        assert_eq!(result.rows()[0][0], CellValue::Text(" x ".to_string()));
        assert_eq!(result.rows()[0][1], CellValue::Text("y".to_string()));
        assert_eq!(report.unwrap().fields_cleaned, 1);
    }

    #[test]
    fn test_trailing_punctuation_only() {
        let cleaner = StringCleaner::new(options(false, false, true));
        assert_eq!(cleaner.clean_text("don't stop..."), "don't stop");
        assert_eq!(cleaner.clean_text("!leading"), "!leading");
    }

    #[test]
    fn test_no_changes_reports_nothing() {
        let ds = Dataset::new(
            vec!["a".to_string()],
            vec![vec![CellValue::Text("clean".to_string())]],
        );
        let cleaner = StringCleaner::new(options(true, false, true));
        let (_, report) = cleaner.apply(&ds, &[ColumnClass::Text]);
        assert!(report.is_none());
    }
}
