use serde::{Deserialize, Serialize};
use std::fmt;

/// A single scalar grid entry.
///
/// Serialized untagged so a grid travels as a plain array of arrays of
/// JSON scalars (`null`, number, boolean, string).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Boolean(bool),
    Text(String),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// Check if the value is the `Empty` variant
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Empty cells and empty strings both count as "no value"
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Coerce the value to a number.
    ///
    /// This is the only coercion used by arithmetic. Text is trimmed and a
    /// `,` decimal separator is accepted. Booleans never coerce.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            CellValue::Empty | CellValue::Boolean(_) => None,
            CellValue::Number(n) => n.is_finite().then_some(*n),
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed
                    .replace(',', ".")
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
            }
        }
    }

    /// Render the value the way hosts display and export it
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            CellValue::Text(s) => s.clone(),
            CellValue::Boolean(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_number() {
        assert_eq!(CellValue::Number(42.0).to_number(), Some(42.0));
        assert_eq!(CellValue::text("123").to_number(), Some(123.0));
        assert_eq!(CellValue::text(" 12,5 ").to_number(), Some(12.5));
        assert_eq!(CellValue::text("").to_number(), None);
        assert_eq!(CellValue::text("abc").to_number(), None);
        assert_eq!(CellValue::text("inf").to_number(), None);
        assert_eq!(CellValue::Boolean(true).to_number(), None);
        assert_eq!(CellValue::Empty.to_number(), None);
    }

    #[test]
    fn test_blank() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::text("").is_blank());
        assert!(!CellValue::text(" ").is_blank());
        assert!(!CellValue::Number(0.0).is_blank());
    }

    #[test]
    fn test_as_text() {
        assert_eq!(CellValue::Number(42.0).as_text(), "42");
        assert_eq!(CellValue::Number(42.5).as_text(), "42.5");
        assert_eq!(CellValue::Boolean(true).as_text(), "TRUE");
        assert_eq!(CellValue::Empty.as_text(), "");
    }

    #[test]
    fn test_json_shape() {
        let row = vec![
            CellValue::text("Anita"),
            CellValue::Number(32.0),
            CellValue::Boolean(false),
            CellValue::Empty,
        ];
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"["Anita",32.0,false,null]"#);

        let back: Vec<CellValue> = serde_json::from_str(r#"["x", 3, true, null]"#).unwrap();
        assert_eq!(
            back,
            vec![
                CellValue::text("x"),
                CellValue::Number(3.0),
                CellValue::Boolean(true),
                CellValue::Empty,
            ]
        );
    }
}
