// ============================================================
// COLUMN NORMALIZER USE CASE
// ============================================================
// Rewrite column names per configured rules, recording every rename

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::cleaning::NormalizeColumnsOptions;
use crate::domain::table::{dedupe_column_names, Dataset};

static CAMEL_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").unwrap());
static SPECIAL_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_\s]").unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static UNDERSCORE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"__+").unwrap());

/// Column name normalization stage.
pub struct ColumnNormalizer {
    options: NormalizeColumnsOptions,
}

impl ColumnNormalizer {
    pub fn new(options: NormalizeColumnsOptions) -> Self {
        Self { options }
    }

    /// Produce a dataset with normalized column names and the map of
    /// renames that actually changed something. With no flags enabled the
    /// stage is a no-op and the map is empty.
    ///
    /// Normalization is idempotent: applying it to an already-normalized
    /// name yields the same name. Colliding names are disambiguated with
    /// a numeric suffix rather than silently dropping a column.
    pub fn apply(&self, dataset: &Dataset) -> (Dataset, BTreeMap<String, String>) {
        if !self.options.any_enabled() {
            return (dataset.clone(), BTreeMap::new());
        }

        let normalized: Vec<String> = dataset
            .columns()
            .iter()
            .enumerate()
            .map(|(index, name)| self.normalize_name(name, index))
            .collect();
        let normalized = dedupe_column_names(normalized);

        let changes: BTreeMap<String, String> = dataset
            .columns()
            .iter()
            .zip(&normalized)
            .filter(|(old, new)| old != new)
            .map(|(old, new)| (old.clone(), new.clone()))
            .collect();

        if !changes.is_empty() {
            tracing::debug!(renamed = changes.len(), "normalized column names");
        }

        let dataset = Dataset::new(normalized, dataset.rows().to_vec());
        (dataset, changes)
    }

    fn normalize_name(&self, name: &str, index: usize) -> String {
        let mut out = name.to_string();

        if self.options.trim_whitespace {
            out = out.trim().to_string();
        }

        if self.options.remove_special_chars {
            out = SPECIAL_CHARS.replace_all(&out, "").into_owned();
        }

        if self.options.snake_case {
            out = CAMEL_BOUNDARY.replace_all(&out, "${1}_${2}").into_owned();
            out = WHITESPACE_RUN.replace_all(&out, "_").into_owned();
        }

        if self.options.lowercase {
            out = out.to_lowercase();
        }

        // Underscore cleanup only applies when a transform above can
        // introduce underscores
        if self.options.snake_case || self.options.remove_special_chars {
            out = UNDERSCORE_RUN.replace_all(&out, "_").into_owned();
            out = out.trim_matches('_').to_string();
        }

        if out.starts_with(|c: char| c.is_ascii_digit()) {
            out = format!("col_{}", out);
        }

        if out.is_empty() {
            out = format!("column_{}", index);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::CellValue;
    use pretty_assertions::assert_eq;

    fn dataset(columns: &[&str]) -> Dataset {
        Dataset::new(
            columns.iter().map(|c| c.to_string()).collect(),
            vec![vec![CellValue::Number(1.0); columns.len()]],
        )
    }

    fn normalize_all() -> ColumnNormalizer {
        ColumnNormalizer::new(NormalizeColumnsOptions {
            snake_case: true,
            remove_special_chars: true,
            lowercase: true,
            trim_whitespace: true,
        })
    }

    #[test]
    fn test_full_normalization() {
        let (result, changes) =
            normalize_all().apply(&dataset(&[" First Name ", "userID", "Price ($)"]));

        assert_eq!(result.columns(), &["first_name", "user_id", "price"]);
        assert_eq!(changes.len(), 3);
        assert_eq!(changes[" First Name "], "first_name");
    }

    #[test]
    fn test_idempotent() {
        let normalizer = normalize_all();
        let (once, _) = normalizer.apply(&dataset(&["Order Date", "camelCaseCol", "a__b_"]));
        let (twice, changes) = normalizer.apply(&once);

        assert_eq!(once.columns(), twice.columns());
        assert!(changes.is_empty());
    }

    #[test]
    fn test_no_flags_is_noop() {
        let normalizer = ColumnNormalizer::new(NormalizeColumnsOptions::disabled());
        let source = dataset(&[" Messy Name!! "]);
        let (result, changes) = normalizer.apply(&source);

        assert_eq!(result, source);
        assert!(changes.is_empty());
    }

    #[test]
    fn test_collisions_disambiguated() {
        let (result, _) = normalize_all().apply(&dataset(&["User Name", "user_name", "USER NAME"]));
        assert_eq!(result.columns(), &["user_name", "user_name_2", "user_name_3"]);
    }

    #[test]
    fn test_digit_prefix_and_empty_fallback() {
        let (result, _) = normalize_all().apply(&dataset(&["2024 Sales", "!!!"]));
        assert_eq!(result.columns(), &["col_2024_sales", "column_1"]);
    }

    #[test]
    fn test_unchanged_names_not_reported() {
        let (_, changes) = normalize_all().apply(&dataset(&["already_fine", "Needs Work"]));
        assert_eq!(changes.len(), 1);
        assert!(changes.contains_key("Needs Work"));
    }
}
