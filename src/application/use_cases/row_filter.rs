// ============================================================
// ROW FILTER USE CASE
// ============================================================
// Drop empty rows, then rows failing the column predicate

use crate::domain::cleaning::{FilterOperator, FilteringOptions, FilteringReport};
use crate::domain::table::{CellValue, Dataset};

/// Row filtering stage. Two independent passes in a fixed order:
/// whole-empty-row removal, then the single-column predicate.
pub struct RowFilter {
    options: FilteringOptions,
}

impl RowFilter {
    pub fn new(options: FilteringOptions) -> Self {
        Self { options }
    }

    /// Apply both passes. `rows_filtered` is the combined count; a filter
    /// naming a column the dataset does not have leaves the data unchanged.
    pub fn apply(&self, dataset: &Dataset) -> (Dataset, Option<FilteringReport>) {
        let original_count = dataset.row_count();
        let mut dataset = dataset.clone();

        if self.options.remove_empty_rows {
            let rows: Vec<Vec<CellValue>> = dataset
                .rows()
                .iter()
                .filter(|row| !row.iter().all(CellValue::is_missing))
                .cloned()
                .collect();
            dataset = Dataset::new(dataset.columns().to_vec(), rows);
        }

        if self.options.column_filter.enabled {
            dataset = self.apply_column_filter(&dataset);
        }

        let filtered = original_count - dataset.row_count();
        if filtered == 0 {
            return (dataset, None);
        }

        tracing::debug!(rows_filtered = filtered, "row filtering complete");
        (
            dataset,
            Some(FilteringReport {
                rows_filtered: filtered,
            }),
        )
    }

    fn apply_column_filter(&self, dataset: &Dataset) -> Dataset {
        let filter = &self.options.column_filter;

        let Some(index) = filter
            .column
            .as_deref()
            .and_then(|name| dataset.column_index(name))
        else {
            // Unknown column name degrades to a no-op
            return dataset.clone();
        };

        let predicate: Box<dyn Fn(&CellValue) -> bool> = match filter.operator {
            FilterOperator::Equals | FilterOperator::NotEqual | FilterOperator::Contains => {
                let Some(needle) = filter
                    .value
                    .as_deref()
                    .map(str::to_lowercase)
                    .filter(|v| !v.is_empty())
                else {
                    return dataset.clone();
                };
                let operator = filter.operator;
                Box::new(move |cell| {
                    let haystack = cell.to_display_string().to_lowercase();
                    match operator {
                        FilterOperator::Equals => haystack == needle,
                        FilterOperator::NotEqual => haystack != needle,
                        FilterOperator::Contains => haystack.contains(&needle),
                        _ => unreachable!(),
                    }
                })
            }
            FilterOperator::GreaterThan | FilterOperator::LessThan => {
                let Some(bound) = parse_number(filter.value.as_deref()) else {
                    return dataset.clone();
                };
                let operator = filter.operator;
                Box::new(move |cell| {
                    cell.as_number().is_some_and(|n| match operator {
                        FilterOperator::GreaterThan => n > bound,
                        FilterOperator::LessThan => n < bound,
                        _ => unreachable!(),
                    })
                })
            }
            FilterOperator::Range => {
                let (Some(min), Some(max)) = (
                    parse_number(filter.min_value.as_deref()),
                    parse_number(filter.max_value.as_deref()),
                ) else {
                    return dataset.clone();
                };
                Box::new(move |cell| cell.as_number().is_some_and(|n| n >= min && n <= max))
            }
        };

        let rows: Vec<Vec<CellValue>> = dataset
            .rows()
            .iter()
            .filter(|row| row.get(index).is_some_and(|cell| predicate(cell)))
            .cloned()
            .collect();
        Dataset::new(dataset.columns().to_vec(), rows)
    }
}

fn parse_number(value: Option<&str>) -> Option<f64> {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cleaning::ColumnFilter;
    use pretty_assertions::assert_eq;

    fn dataset() -> Dataset {
        Dataset::new(
            vec!["status".to_string(), "age".to_string()],
            vec![
                vec![CellValue::Text("Active".to_string()), CellValue::Number(30.0)],
                vec![CellValue::Text("inactive".to_string()), CellValue::Number(45.0)],
                vec![CellValue::Text("pending".to_string()), CellValue::Number(20.0)],
            ],
        )
    }

    fn column_filter(column: &str, operator: FilterOperator, value: Option<&str>) -> FilteringOptions {
        FilteringOptions {
            remove_empty_rows: false,
            column_filter: ColumnFilter {
                enabled: true,
                column: Some(column.to_string()),
                operator,
                value: value.map(str::to_string),
                min_value: None,
                max_value: None,
            },
        }
    }

    #[test]
    fn test_equals_case_insensitive() {
        let filter = RowFilter::new(column_filter("status", FilterOperator::Equals, Some("active")));
        let (result, report) = filter.apply(&dataset());

        assert_eq!(result.row_count(), 1);
        assert_eq!(result.rows()[0][0], CellValue::Text("Active".to_string()));
        assert_eq!(report.unwrap().rows_filtered, 2);
    }

    #[test]
    fn test_contains() {
        let filter = RowFilter::new(column_filter("status", FilterOperator::Contains, Some("ACT")));
        let (result, _) = filter.apply(&dataset());
        assert_eq!(result.row_count(), 2);
    }

    #[test]
    fn test_not_equal() {
        let filter =
            RowFilter::new(column_filter("status", FilterOperator::NotEqual, Some("PENDING")));
        let (result, _) = filter.apply(&dataset());
        assert_eq!(result.row_count(), 2);
    }

    #[test]
    fn test_greater_than() {
        let filter =
            RowFilter::new(column_filter("age", FilterOperator::GreaterThan, Some("25")));
        let (result, report) = filter.apply(&dataset());

        assert_eq!(result.row_count(), 2);
        assert_eq!(report.unwrap().rows_filtered, 1);
    }

    #[test]
    fn test_range_inclusive() {
        let mut options = column_filter("age", FilterOperator::Range, None);
        options.column_filter.min_value = Some("20".to_string());
        options.column_filter.max_value = Some("30".to_string());
        let (result, _) = RowFilter::new(options).apply(&dataset());
        assert_eq!(result.row_count(), 2);
    }

    #[test]
    fn test_unknown_column_is_noop() {
        let filter = RowFilter::new(column_filter("gone", FilterOperator::Equals, Some("x")));
        let source = dataset();
        let (result, report) = filter.apply(&source);

        assert_eq!(result, source);
        assert!(report.is_none());
    }

    #[test]
    fn test_empty_value_is_noop() {
        let filter = RowFilter::new(column_filter("status", FilterOperator::Equals, Some("")));
        let (result, report) = filter.apply(&dataset());

        assert_eq!(result.row_count(), 3);
        assert!(report.is_none());
    }

    #[test]
    fn test_remove_empty_rows_combined_count() {
        let ds = Dataset::new(
            vec!["status".to_string()],
            vec![
                vec![CellValue::Null],
                vec![CellValue::Text("active".to_string())],
                vec![CellValue::Text("closed".to_string())],
            ],
        );
        let options = FilteringOptions {
            remove_empty_rows: true,
            column_filter: ColumnFilter {
                enabled: true,
                column: Some("status".to_string()),
                operator: FilterOperator::Equals,
                value: Some("active".to_string()),
                min_value: None,
                max_value: None,
            },
        };
        let (result, report) = RowFilter::new(options).apply(&ds);

        assert_eq!(result.row_count(), 1);
        assert_eq!(report.unwrap().rows_filtered, 2);
    }
}
