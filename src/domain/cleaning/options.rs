// ============================================================
// CLEANING OPTIONS
// ============================================================
// Caller-supplied cleaning configuration with explicit defaults.
// Field names match the JSON the UI layer sends (camelCase); every
// omitted key resolves to its documented default, never to an error.

use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};

/// Top-level cleaning configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CleaningOptions {
    pub normalize_columns: NormalizeColumnsOptions,
    pub missing_data: MissingDataOptions,
    pub string_cleaning: StringCleaningOptions,
    pub filtering: FilteringOptions,
    pub generate_report: bool,
}

impl Default for CleaningOptions {
    fn default() -> Self {
        Self {
            normalize_columns: NormalizeColumnsOptions::default(),
            missing_data: MissingDataOptions::default(),
            string_cleaning: StringCleaningOptions::default(),
            filtering: FilteringOptions::default(),
            generate_report: true,
        }
    }
}

impl CleaningOptions {
    /// Deserialize from a JSON value, turning serde errors (unknown enum
    /// variants, wrong types) into a validation error.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        let options: Self = serde_json::from_value(value)
            .map_err(|e| AppError::Validation(format!("cleaningOptions: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Cross-field checks serde cannot express. Reports the offending
    /// field path; runs before any pipeline stage executes.
    pub fn validate(&self) -> Result<()> {
        let filter = &self.filtering.column_filter;
        if filter.enabled {
            if filter.column.as_deref().map_or(true, str::is_empty) {
                return Err(AppError::Validation(
                    "filtering.columnFilter.column must be set when the filter is enabled"
                        .to_string(),
                ));
            }

            match filter.operator {
                FilterOperator::GreaterThan | FilterOperator::LessThan => {
                    if parse_bound(filter.value.as_deref()).is_none() {
                        return Err(AppError::Validation(format!(
                            "filtering.columnFilter.value must be numeric for operator {}",
                            filter.operator.as_str()
                        )));
                    }
                }
                FilterOperator::Range => {
                    let min = parse_bound(filter.min_value.as_deref());
                    let max = parse_bound(filter.max_value.as_deref());
                    let (min, max) = match (min, max) {
                        (Some(min), Some(max)) => (min, max),
                        (None, _) => {
                            return Err(AppError::Validation(
                                "filtering.columnFilter.minValue must be numeric for operator range"
                                    .to_string(),
                            ))
                        }
                        (_, None) => {
                            return Err(AppError::Validation(
                                "filtering.columnFilter.maxValue must be numeric for operator range"
                                    .to_string(),
                            ))
                        }
                    };
                    if min > max {
                        return Err(AppError::Validation(
                            "filtering.columnFilter.minValue must not exceed maxValue".to_string(),
                        ));
                    }
                }
                _ => {}
            }
        }

        if self.missing_data.strategy == MissingDataStrategy::RemoveSpecific
            && self.missing_data.specific_columns.is_empty()
        {
            return Err(AppError::Validation(
                "missingData.specificColumns must not be empty when strategy is remove_specific"
                    .to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_bound(value: Option<&str>) -> Option<f64> {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

/// Column name normalization flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NormalizeColumnsOptions {
    pub snake_case: bool,
    pub remove_special_chars: bool,
    pub lowercase: bool,
    pub trim_whitespace: bool,
}

impl Default for NormalizeColumnsOptions {
    fn default() -> Self {
        Self {
            snake_case: true,
            remove_special_chars: true,
            lowercase: false,
            trim_whitespace: true,
        }
    }
}

impl NormalizeColumnsOptions {
    /// With no flags enabled the stage is a no-op.
    pub fn any_enabled(&self) -> bool {
        self.snake_case || self.remove_special_chars || self.lowercase || self.trim_whitespace
    }

    /// All flags off; used for the "leave data untouched" baseline.
    pub fn disabled() -> Self {
        Self {
            snake_case: false,
            remove_special_chars: false,
            lowercase: false,
            trim_whitespace: false,
        }
    }
}

/// How missing cells are resolved. A discriminated choice: exactly one
/// strategy is active per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingDataStrategy {
    Fill,
    Remove,
    RemoveSpecific,
    SmartFill,
    Keep,
}

/// Fill value selection for `fill` / `smart_fill`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillMethod {
    Custom,
    Zero,
    Mean,
    Median,
    Mode,
}

impl FillMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            FillMethod::Custom => "custom",
            FillMethod::Zero => "zero",
            FillMethod::Mean => "mean",
            FillMethod::Median => "median",
            FillMethod::Mode => "mode",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MissingDataOptions {
    pub strategy: MissingDataStrategy,
    pub fill_value: String,
    pub fill_method: FillMethod,
    pub specific_columns: Vec<String>,
}

impl Default for MissingDataOptions {
    fn default() -> Self {
        Self {
            strategy: MissingDataStrategy::Fill,
            fill_value: "N/A".to_string(),
            fill_method: FillMethod::Custom,
            specific_columns: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StringCleaningOptions {
    pub enabled: bool,
    pub trim_whitespace: bool,
    pub lowercase: bool,
    pub remove_punctuation: bool,
    pub specific_columns: Vec<String>,
}

impl Default for StringCleaningOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            trim_whitespace: true,
            lowercase: false,
            remove_punctuation: false,
            specific_columns: Vec::new(),
        }
    }
}

/// Predicate applied by the column filter pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    Equals,
    Contains,
    NotEqual,
    GreaterThan,
    LessThan,
    Range,
}

impl FilterOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Equals => "equals",
            FilterOperator::Contains => "contains",
            FilterOperator::NotEqual => "not_equal",
            FilterOperator::GreaterThan => "greater_than",
            FilterOperator::LessThan => "less_than",
            FilterOperator::Range => "range",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnFilter {
    pub enabled: bool,
    pub column: Option<String>,
    pub operator: FilterOperator,
    pub value: Option<String>,
    pub min_value: Option<String>,
    pub max_value: Option<String>,
}

impl Default for ColumnFilter {
    fn default() -> Self {
        Self {
            enabled: false,
            column: None,
            operator: FilterOperator::Equals,
            value: None,
            min_value: None,
            max_value: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilteringOptions {
    pub remove_empty_rows: bool,
    pub column_filter: ColumnFilter,
}
