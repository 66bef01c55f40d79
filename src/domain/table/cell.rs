// ============================================================
// CELL VALUE
// ============================================================
// A single cell in a tabular dataset

use serde::{Deserialize, Serialize};

/// A single cell value. JSON-object cells are stored as `Text` holding
/// the raw JSON source; they are only parsed on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Build a cell from a raw CSV value.
    ///
    /// Empty values become `Null`, numeric-looking values become `Number`,
    /// everything else stays `Text` unchanged.
    pub fn from_raw(value: &str) -> Self {
        if value.is_empty() {
            return CellValue::Null;
        }

        let trimmed = value.trim();
        if !trimmed.is_empty() {
            if let Ok(n) = trimmed.parse::<f64>() {
                if n.is_finite() && trimmed == value {
                    return CellValue::Number(n);
                }
            }
        }

        CellValue::Text(value.to_string())
    }

    /// Convert a JSON value into a cell, used when flattening JSON columns.
    /// Nested objects and arrays are kept as their compact JSON text.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => CellValue::Null,
            serde_json::Value::Bool(b) => CellValue::Bool(*b),
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(f) if f.is_finite() => CellValue::Number(f),
                _ => CellValue::Text(n.to_string()),
            },
            serde_json::Value::String(s) => CellValue::Text(s.clone()),
            other => CellValue::Text(other.to_string()),
        }
    }

    /// A cell is missing when it is null, empty, or whitespace-only text.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of the cell: a `Number`, or `Text` that parses as one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// String form used for CSV/XLSX export and filtering comparisons.
    /// Integral numbers print without a fractional part.
    pub fn to_display_string(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Text(s) => s.clone(),
        }
    }

    /// JSON form used for export and previews. Integral numbers serialize
    /// as integers rather than floats.
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            CellValue::Null => serde_json::Value::Null,
            CellValue::Bool(b) => serde_json::Value::Bool(*b),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 9.0e15 {
                    serde_json::Value::from(*n as i64)
                } else {
                    serde_json::Value::from(*n)
                }
            }
            CellValue::Text(s) => serde_json::Value::String(s.clone()),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 9.0e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_typing() {
        assert_eq!(CellValue::from_raw(""), CellValue::Null);
        assert_eq!(CellValue::from_raw("42"), CellValue::Number(42.0));
        assert_eq!(CellValue::from_raw("-3.5"), CellValue::Number(-3.5));
        assert_eq!(
            CellValue::from_raw("hello"),
            CellValue::Text("hello".to_string())
        );
        // Surrounding whitespace keeps the raw text so cleaning can trim it
        assert_eq!(
            CellValue::from_raw(" 42 "),
            CellValue::Text(" 42 ".to_string())
        );
    }

    #[test]
    fn test_missing_definition() {
        assert!(CellValue::Null.is_missing());
        assert!(CellValue::Text(String::new()).is_missing());
        assert!(CellValue::Text("   ".to_string()).is_missing());
        assert!(!CellValue::Text("x".to_string()).is_missing());
        assert!(!CellValue::Number(0.0).is_missing());
        assert!(!CellValue::Bool(false).is_missing());
    }

    #[test]
    fn test_display_string() {
        assert_eq!(CellValue::Number(15.0).to_display_string(), "15");
        assert_eq!(CellValue::Number(15.5).to_display_string(), "15.5");
        assert_eq!(CellValue::Null.to_display_string(), "");
        assert_eq!(CellValue::Bool(true).to_display_string(), "true");
    }

    #[test]
    fn test_json_scalar_roundtrip() {
        let cell: CellValue = serde_json::from_str("null").unwrap();
        assert_eq!(cell, CellValue::Null);
        let cell: CellValue = serde_json::from_str("3.5").unwrap();
        assert_eq!(cell, CellValue::Number(3.5));
        let cell: CellValue = serde_json::from_str("\"NY\"").unwrap();
        assert_eq!(cell, CellValue::Text("NY".to_string()));
    }
}
