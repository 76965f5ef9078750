//! Cell value interpretation

use std::fmt;

/// A cell value after numeric interpretation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum CellValue {
    /// Whole number
    Integer(i64),
    /// Floating point number
    Float(f64),
    /// Anything that did not parse as a number
    Text(String),
}

impl CellValue {
    /// Create a new text value
    pub fn text<S: Into<String>>(s: S) -> Self {
        CellValue::Text(s.into())
    }

    /// Try to get the value as a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Integer(n) => Some(*n as f64),
            CellValue::Float(n) => Some(*n),
            CellValue::Text(_) => None,
        }
    }

    /// Try to get the value as a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Check if the value is numeric
    pub fn is_number(&self) -> bool {
        !matches!(self, CellValue::Text(_))
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Integer(n) => write!(f, "{n}"),
            CellValue::Float(n) => write!(f, "{n}"),
            CellValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Integer(n)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Float(n)
    }
}

/// Options for [`numericise`]
#[derive(Debug, Clone, PartialEq)]
pub struct NumericiseOptions {
    /// Map empty strings to `Integer(0)`
    pub empty_to_zero: bool,
    /// Replacement for empty strings when `empty_to_zero` is off.
    /// `None` makes empty strings come back as `None`.
    pub default_blank: Option<CellValue>,
    /// Accept digit grouping such as `1_000`
    pub allow_underscores: bool,
}

impl Default for NumericiseOptions {
    fn default() -> Self {
        Self {
            empty_to_zero: false,
            default_blank: Some(CellValue::Text(String::new())),
            allow_underscores: false,
        }
    }
}

impl NumericiseOptions {
    pub fn empty_to_zero(mut self, on: bool) -> Self {
        self.empty_to_zero = on;
        self
    }

    pub fn default_blank(mut self, blank: Option<CellValue>) -> Self {
        self.default_blank = blank;
        self
    }

    pub fn allow_underscores(mut self, on: bool) -> Self {
        self.allow_underscores = on;
        self
    }
}

/// Interpret a raw cell string as an integer or float where possible.
///
/// # Examples
/// ```
/// use sheetwire_core::value::{numericise, CellValue, NumericiseOptions};
///
/// let opts = NumericiseOptions::default();
/// assert_eq!(numericise(Some("3"), &opts), Some(CellValue::Integer(3)));
/// assert_eq!(numericise(Some("3.1"), &opts), Some(CellValue::Float(3.1)));
/// assert_eq!(numericise(Some("faa"), &opts), Some(CellValue::text("faa")));
/// assert_eq!(numericise(None, &opts), None);
/// ```
pub fn numericise(value: Option<&str>, options: &NumericiseOptions) -> Option<CellValue> {
    let raw = value?;

    if raw.is_empty() {
        return if options.empty_to_zero {
            Some(CellValue::Integer(0))
        } else {
            options.default_blank.clone()
        };
    }

    if raw.contains('_') && !options.allow_underscores {
        return Some(CellValue::text(raw));
    }

    let Some(digits) = strip_digit_separators(raw.trim()) else {
        return Some(CellValue::text(raw));
    };

    if let Ok(n) = digits.parse::<i64>() {
        return Some(CellValue::Integer(n));
    }
    if let Ok(n) = digits.parse::<f64>() {
        return Some(CellValue::Float(n));
    }
    Some(CellValue::text(raw))
}

/// Apply [`numericise`] to every value of a row
pub fn numericise_all<S: AsRef<str>>(
    values: &[S],
    options: &NumericiseOptions,
) -> Vec<Option<CellValue>> {
    values
        .iter()
        .map(|v| numericise(Some(v.as_ref()), options))
        .collect()
}

/// Remove `_` separators. Each one must sit between two digits.
fn strip_digit_separators(s: &str) -> Option<String> {
    if !s.contains('_') {
        return Some(s.to_string());
    }

    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'_' {
            let before = i > 0 && bytes[i - 1].is_ascii_digit();
            let after = bytes.get(i + 1).is_some_and(|c| c.is_ascii_digit());
            if !(before && after) {
                return None;
            }
        } else {
            out.push(b as char);
        }
    }
    Some(out)
}
