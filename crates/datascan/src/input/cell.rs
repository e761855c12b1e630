//! Cell values and type coercion.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single table entry.
///
/// Cells are only ever produced by [`Cell::coerce`] or
/// [`Cell::from_json`]; they never hold objects or arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Missing value.
    Null,
    /// Finite numeric value.
    Number(f64),
    /// `true` / `false`.
    Boolean(bool),
    /// Any other text, trimmed.
    Text(String),
}

impl Cell {
    /// Classify a raw text token.
    ///
    /// Empty input becomes [`Cell::Null`]. Otherwise the token is trimmed and
    /// tried as a finite number, then as a case-insensitive boolean, and
    /// falls back to text.
    pub fn coerce(raw: &str) -> Cell {
        if raw.is_empty() {
            return Cell::Null;
        }

        let trimmed = raw.trim();
        if let Some(n) = parse_number(trimmed) {
            return Cell::Number(n);
        }
        if trimmed.eq_ignore_ascii_case("true") {
            return Cell::Boolean(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return Cell::Boolean(false);
        }

        Cell::Text(trimmed.to_string())
    }

    /// Classify an already-typed JSON value.
    ///
    /// Numbers and booleans pass through; strings go through [`Cell::coerce`];
    /// objects and arrays are stringified and kept as text.
    pub fn from_json(value: &Value) -> Cell {
        match value {
            Value::Null => Cell::Null,
            Value::Bool(b) => Cell::Boolean(*b),
            Value::Number(n) => match n.as_f64() {
                Some(f) if f.is_finite() => Cell::Number(f),
                _ => Cell::Text(n.to_string()),
            },
            Value::String(s) => Cell::coerce(s),
            Value::Array(_) | Value::Object(_) => Cell::Text(value.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Null, or text that is blank after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Null => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// JSON representation used for issue values and row signatures.
    pub fn to_json(&self) -> Value {
        match self {
            Cell::Null => Value::Null,
            // Integral values within the exact f64 range are written as
            // integers, so `-0` and `0` share one encoding.
            Cell::Number(n) if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER => {
                Value::from(*n as i64)
            }
            Cell::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Cell::Boolean(b) => Value::Bool(*b),
            Cell::Text(s) => Value::String(s.clone()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Number(n) => f.write_str(&format_number(*n)),
            Cell::Boolean(b) => write!(f, "{}", b),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Cell {
    fn from(raw: &str) -> Self {
        Cell::coerce(raw)
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        if n.is_finite() { Cell::Number(n) } else { Cell::Null }
    }
}

impl From<bool> for Cell {
    fn from(b: bool) -> Self {
        Cell::Boolean(b)
    }
}

/// Parse a trimmed token as a finite number.
pub(crate) fn parse_number(token: &str) -> Option<f64> {
    if token.is_empty() {
        return None;
    }
    token.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Largest integer an `f64` holds exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Format a number the way it reads in a spreadsheet: no trailing `.0`.
pub(crate) fn format_number(n: f64) -> String {
    if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}
