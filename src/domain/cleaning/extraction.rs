// ============================================================
// JSON EXTRACTION CONFIG
// ============================================================
// Which JSON columns to flatten and which of their keys to extract

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};

/// Per-column flattening selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnExtraction {
    pub enabled: bool,
    #[serde(default)]
    pub fields: HashMap<String, bool>,
}

impl ColumnExtraction {
    /// Names of fields marked `true`.
    pub fn enabled_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// Mapping from column name to its flattening selection. Only keys marked
/// `true` under an `enabled` column are flattened.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JsonExtractionConfig {
    pub columns: HashMap<String, ColumnExtraction>,
}

impl JsonExtractionConfig {
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        let config: Self = serde_json::from_value(value)
            .map_err(|e| AppError::Validation(format!("jsonExtractionConfig: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.columns.keys().any(|name| name.trim().is_empty()) {
            return Err(AppError::Validation(
                "columns must not contain an empty column name".to_string(),
            ));
        }
        Ok(())
    }

    /// True when at least one enabled column has at least one enabled field.
    pub fn has_work(&self) -> bool {
        self.columns
            .values()
            .any(|c| c.enabled && c.fields.values().any(|enabled| *enabled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_from_ui_json() {
        let config = JsonExtractionConfig::from_json(serde_json::json!({
            "columns": {
                "metadata": { "enabled": true, "fields": { "city": true, "age": false } }
            }
        }))
        .unwrap();

        assert!(config.has_work());
        assert_eq!(config.columns["metadata"].enabled_fields(), vec!["city"]);
    }

    #[test]
    fn test_disabled_column_has_no_work() {
        let config = JsonExtractionConfig::from_json(serde_json::json!({
            "columns": {
                "metadata": { "enabled": false, "fields": { "city": true } }
            }
        }))
        .unwrap();
        assert!(!config.has_work());
    }
}
