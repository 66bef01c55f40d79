// ============================================================
// MISSING DATA RESOLVER USE CASE
// ============================================================
// Fill or drop missing cells according to the configured strategy

use std::collections::{BTreeMap, HashMap};

use crate::domain::cleaning::{FillMethod, MissingDataOptions, MissingDataReport, MissingDataStrategy};
use crate::domain::table::{CellValue, ColumnClass, Dataset};

/// Placeholder used by smart fill for text columns.
const TEXT_PLACEHOLDER: &str = "Unknown";

/// Method name recorded when smart fill falls back to the text placeholder.
const DEFAULT_METHOD: &str = "default";

/// Missing-data stage. Exactly one strategy runs per invocation.
pub struct MissingDataResolver {
    options: MissingDataOptions,
}

impl MissingDataResolver {
    pub fn new(options: MissingDataOptions) -> Self {
        Self { options }
    }

    /// Apply the configured strategy. Returns the new dataset and a report
    /// fragment, or `None` when the stage had no effect (`keep`, or
    /// nothing to fill/remove).
    pub fn apply(
        &self,
        dataset: &Dataset,
        classes: &[ColumnClass],
    ) -> (Dataset, Option<MissingDataReport>) {
        match self.options.strategy {
            MissingDataStrategy::Keep => (dataset.clone(), None),
            MissingDataStrategy::Remove => self.remove_rows(dataset, None),
            MissingDataStrategy::RemoveSpecific => {
                let indices: Vec<usize> = self
                    .options
                    .specific_columns
                    .iter()
                    .filter_map(|name| dataset.column_index(name))
                    .collect();
                if indices.is_empty() {
                    // Stale column names degrade to a no-op
                    return (dataset.clone(), None);
                }
                self.remove_rows(dataset, Some(&indices))
            }
            MissingDataStrategy::Fill => self.fill_literal(dataset),
            MissingDataStrategy::SmartFill => self.smart_fill(dataset, classes),
        }
    }

    /// Drop rows with a missing cell in any column, or in any of the given
    /// columns when `indices` is set.
    fn remove_rows(
        &self,
        dataset: &Dataset,
        indices: Option<&[usize]>,
    ) -> (Dataset, Option<MissingDataReport>) {
        let original_count = dataset.row_count();

        let rows: Vec<Vec<CellValue>> = dataset
            .rows()
            .iter()
            .filter(|row| match indices {
                Some(indices) => !indices
                    .iter()
                    .any(|&i| row.get(i).is_some_and(CellValue::is_missing)),
                None => !row.iter().any(CellValue::is_missing),
            })
            .cloned()
            .collect();

        let removed = original_count - rows.len();
        let dataset = Dataset::new(dataset.columns().to_vec(), rows);

        if removed == 0 {
            return (dataset, None);
        }

        tracing::debug!(rows_removed = removed, "dropped rows with missing data");
        (
            dataset,
            Some(MissingDataReport {
                rows_removed: Some(removed),
                ..MissingDataReport::default()
            }),
        )
    }

    /// Replace every missing cell with the literal fill value.
    fn fill_literal(&self, dataset: &Dataset) -> (Dataset, Option<MissingDataReport>) {
        let mut filled = 0usize;

        let rows: Vec<Vec<CellValue>> = dataset
            .rows()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| {
                        if cell.is_missing() {
                            filled += 1;
                            CellValue::Text(self.options.fill_value.clone())
                        } else {
                            cell.clone()
                        }
                    })
                    .collect()
            })
            .collect();

        let dataset = Dataset::new(dataset.columns().to_vec(), rows);
        if filled == 0 {
            return (dataset, None);
        }

        (
            dataset,
            Some(MissingDataReport {
                cells_filled: Some(filled),
                ..MissingDataReport::default()
            }),
        )
    }

    /// Per-column imputation driven by column classification.
    ///
    /// Numeric columns use the configured fill method (`custom` maps to
    /// `mean`); a numeric column with no observed values falls back to
    /// zero. Text and JSON columns get the constant placeholder, or the
    /// column mode when requested.
    fn smart_fill(
        &self,
        dataset: &Dataset,
        classes: &[ColumnClass],
    ) -> (Dataset, Option<MissingDataReport>) {
        let mut filled = 0usize;
        let mut methods_used: BTreeMap<String, String> = BTreeMap::new();

        // Precompute one fill value per column that actually needs it
        let fill_values: Vec<Option<(CellValue, &'static str)>> = (0..dataset.column_count())
            .map(|index| {
                let has_missing = dataset.column_values(index).any(CellValue::is_missing);
                if !has_missing {
                    return None;
                }
                let class = classes.get(index).copied().unwrap_or(ColumnClass::Text);
                Some(self.column_fill_value(dataset, index, class))
            })
            .collect();

        let rows: Vec<Vec<CellValue>> = dataset
            .rows()
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(index, cell)| {
                        if !cell.is_missing() {
                            return cell.clone();
                        }
                        match &fill_values[index] {
                            Some((value, method)) => {
                                filled += 1;
                                methods_used
                                    .entry(dataset.columns()[index].clone())
                                    .or_insert_with(|| method.to_string());
                                value.clone()
                            }
                            None => cell.clone(),
                        }
                    })
                    .collect()
            })
            .collect();

        let dataset = Dataset::new(dataset.columns().to_vec(), rows);
        if filled == 0 {
            return (dataset, None);
        }

        tracing::debug!(cells_filled = filled, "smart fill complete");
        (
            dataset,
            Some(MissingDataReport {
                cells_filled: Some(filled),
                rows_removed: None,
                fill_methods_used: methods_used,
            }),
        )
    }

    fn column_fill_value(
        &self,
        dataset: &Dataset,
        index: usize,
        class: ColumnClass,
    ) -> (CellValue, &'static str) {
        if class == ColumnClass::Numeric {
            let values: Vec<f64> = dataset
                .column_values(index)
                .filter(|cell| !cell.is_missing())
                .filter_map(CellValue::as_number)
                .collect();

            if values.is_empty() {
                return (CellValue::Number(0.0), FillMethod::Zero.as_str());
            }

            // `custom` is not meaningful for numeric smart fill; mean is
            // the smart default
            let method = match self.options.fill_method {
                FillMethod::Custom => FillMethod::Mean,
                other => other,
            };

            let value = match method {
                FillMethod::Zero => 0.0,
                FillMethod::Mean => mean(&values),
                FillMethod::Median => median(values.clone()),
                FillMethod::Mode => mode_numeric(&values),
                FillMethod::Custom => unreachable!("custom mapped to mean above"),
            };
            return (CellValue::Number(value), method.as_str());
        }

        if self.options.fill_method == FillMethod::Mode {
            if let Some(value) = mode_text(dataset, index) {
                return (CellValue::Text(value), FillMethod::Mode.as_str());
            }
        }

        (
            CellValue::Text(TEXT_PLACEHOLDER.to_string()),
            DEFAULT_METHOD,
        )
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median with the standard definition: an even count averages the two
/// middle values after ascending sort.
fn median(mut values: Vec<f64>) -> f64 {
    values.sort_by(|a, b| a.total_cmp(b));
    let n = values.len();
    if n % 2 == 0 {
        (values[n / 2 - 1] + values[n / 2]) / 2.0
    } else {
        values[n / 2]
    }
}

/// Most frequent value; ties break to the earliest occurrence.
fn mode_numeric(values: &[f64]) -> f64 {
    let mut counts: HashMap<u64, (usize, usize)> = HashMap::new();
    for (position, value) in values.iter().enumerate() {
        let entry = counts.entry(value.to_bits()).or_insert((0, position));
        entry.0 += 1;
    }

    let mut best = (values[0], 0usize, 0usize);
    for (&bits, &(count, position)) in &counts {
        if count > best.1 || (count == best.1 && position < best.2) {
            best = (f64::from_bits(bits), count, position);
        }
    }
    best.0
}

/// Most frequent non-missing display value of a column.
fn mode_text(dataset: &Dataset, index: usize) -> Option<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();

    for cell in dataset.column_values(index) {
        if cell.is_missing() {
            continue;
        }
        let text = cell.to_display_string();
        match counts.iter_mut().find(|(value, _)| *value == text) {
            Some((_, count)) => *count += 1,
            None => counts.push((text, 1)),
        }
    }

    counts
        .into_iter()
        .max_by_key(|(_, count)| *count)
        .map(|(value, _)| value)
}
