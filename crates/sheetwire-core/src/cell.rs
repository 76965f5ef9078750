//! Transient cell values read from or written to a worksheet

use std::fmt;

use crate::address::rowcol_to_a1;
use crate::error::Result;
use crate::value::{numericise, CellValue, NumericiseOptions};

/// A single cell as returned by the service.
///
/// Cells are snapshots: they are built fresh on every read and writing one
/// back means issuing a new request for its address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Row number (1-based)
    pub row: u32,
    /// Column number (1-based)
    pub col: u32,
    /// Displayed value
    pub value: String,
}

impl Cell {
    pub fn new<S: Into<String>>(row: u32, col: u32, value: S) -> Self {
        Self {
            row,
            col,
            value: value.into(),
        }
    }

    /// A1 label of this cell's address
    pub fn label(&self) -> Result<String> {
        rowcol_to_a1(self.row, self.col)
    }

    /// The value read as a float, if it is one
    pub fn numeric_value(&self) -> Option<f64> {
        self.value.trim().parse().ok()
    }

    /// The value interpreted with [`numericise`]
    pub fn numericise(&self, options: &NumericiseOptions) -> Option<CellValue> {
        numericise(Some(&self.value), options)
    }

    /// Position and value as a triple, the shape the grid functions take
    pub fn to_triple(&self) -> (u32, u32, String) {
        (self.row, self.col, self.value.clone())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Cell R{}C{} {:?}>", self.row, self.col, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_label() {
        assert_eq!(Cell::new(3, 731, "").label().unwrap(), "ABC3");
        assert!(Cell::new(0, 1, "").label().is_err());
    }

    #[test]
    fn test_numeric_value() {
        assert_eq!(Cell::new(1, 1, "42").numeric_value(), Some(42.0));
        assert_eq!(Cell::new(1, 1, " 2.5 ").numeric_value(), Some(2.5));
        assert_eq!(Cell::new(1, 1, "n/a").numeric_value(), None);
        assert_eq!(Cell::new(1, 1, "").numeric_value(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Cell::new(2, 3, "x").to_string(), "<Cell R2C3 \"x\">");
    }
}
