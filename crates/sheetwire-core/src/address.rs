//! A1 address notation and identifier conversions
//!
//! Rows and columns are 1-based everywhere in this module, matching what the
//! remote service uses on the wire. Column letters are a bijective base-26
//! numbering: there is no zero digit, so `Z` is 26 and `AA` is 27.

use std::fmt;
use std::str::FromStr;

use lazy_regex::regex_captures;

use crate::error::{Error, Result};

/// Convert a 1-based column number to letters (1 = A, 26 = Z, 27 = AA, ...)
pub fn column_letters(col: u32) -> Result<String> {
    if col < 1 {
        return Err(Error::InvalidInput(format!(
            "column must be >= 1, got {col}"
        )));
    }

    let mut result = String::new();
    let mut n = col;

    while n > 0 {
        n -= 1;
        let c = ((n % 26) as u8 + b'A') as char;
        result.insert(0, c);
        n /= 26;
    }

    Ok(result)
}

/// Convert column letters to a 1-based column number (A = 1, Z = 26, AA = 27, ...)
///
/// Letter case is ignored.
pub fn letters_to_column(letters: &str) -> Result<u32> {
    if letters.is_empty() {
        return Err(Error::InvalidLabel("empty column letters".into()));
    }

    let mut col: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::InvalidLabel(format!(
                "invalid column letter '{c}' in '{letters}'"
            )));
        }
        let digit = c.to_ascii_uppercase() as u32 - 'A' as u32 + 1;
        col = col
            .checked_mul(26)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(|| Error::InvalidLabel(format!("column '{letters}' is too large")))?;
    }

    Ok(col)
}

/// Translate a (row, column) pair into an A1 label.
///
/// # Examples
/// ```
/// use sheetwire_core::address::rowcol_to_a1;
///
/// assert_eq!(rowcol_to_a1(1, 1).unwrap(), "A1");
/// assert_eq!(rowcol_to_a1(3, 731).unwrap(), "ABC3");
/// ```
pub fn rowcol_to_a1(row: u32, col: u32) -> Result<String> {
    if row < 1 {
        return Err(Error::InvalidInput(format!("row must be >= 1, got {row}")));
    }
    let mut label = column_letters(col)?;
    label.push_str(&row.to_string());
    Ok(label)
}

/// Translate an A1 label into a (row, column) pair.
///
/// # Examples
/// ```
/// use sheetwire_core::address::a1_to_rowcol;
///
/// assert_eq!(a1_to_rowcol("B12").unwrap(), (12, 2));
/// assert_eq!(a1_to_rowcol("abc3").unwrap(), (3, 731));
/// assert!(a1_to_rowcol("12B").is_err());
/// assert!(a1_to_rowcol("A01").is_err());
/// ```
pub fn a1_to_rowcol(label: &str) -> Result<(u32, u32)> {
    // Rows start at 1 with no leading zeros, so every label has one spelling
    let Some((_, letters, digits)) = regex_captures!(r"^([A-Za-z]+)([1-9][0-9]*)$", label) else {
        return Err(Error::InvalidLabel(label.to_string()));
    };

    let row: u32 = digits
        .parse()
        .map_err(|_| Error::InvalidLabel(format!("row number in '{label}' is too large")))?;

    let col = letters_to_column(letters)?;
    Ok((row, col))
}

/// Quote a sheet title for use in a range reference: `'My sheet'!A1:B2`.
pub fn quoted_range(sheet_title: &str, a1: &str) -> String {
    let title = sheet_title.replace('\'', "''");
    if a1.is_empty() {
        format!("'{title}'")
    } else {
        format!("'{title}'!{a1}")
    }
}

/// A rectangular block of cells such as `A1:C10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct A1Range {
    /// Top-left corner as (row, col)
    pub start: (u32, u32),
    /// Bottom-right corner as (row, col)
    pub end: (u32, u32),
}

impl A1Range {
    /// Create a range from two corners, normalized to top-left / bottom-right
    pub fn new(first: (u32, u32), last: (u32, u32)) -> Result<Self> {
        for (row, col) in [first, last] {
            if row < 1 || col < 1 {
                return Err(Error::InvalidInput(format!(
                    "range corner ({row}, {col}) must be 1-based"
                )));
            }
        }
        Ok(Self {
            start: (first.0.min(last.0), first.1.min(last.1)),
            end: (first.0.max(last.0), first.1.max(last.1)),
        })
    }

    /// Parse `A1:B2` or a single label such as `C3`
    pub fn parse(s: &str) -> Result<Self> {
        match s.split_once(':') {
            Some((first, last)) => Self::new(a1_to_rowcol(first)?, a1_to_rowcol(last)?),
            None => {
                let cell = a1_to_rowcol(s)?;
                Ok(Self {
                    start: cell,
                    end: cell,
                })
            }
        }
    }

    /// Number of rows covered
    pub fn row_count(&self) -> u32 {
        self.end.0 - self.start.0 + 1
    }

    /// Number of columns covered
    pub fn col_count(&self) -> u32 {
        self.end.1 - self.start.1 + 1
    }

    /// Check if a (row, col) position falls inside the range
    pub fn contains(&self, row: u32, col: u32) -> bool {
        row >= self.start.0 && row <= self.end.0 && col >= self.start.1 && col <= self.end.1
    }
}

impl fmt::Display for A1Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Corners are validated on construction, so the conversions cannot fail.
        let start = rowcol_to_a1(self.start.0, self.start.1).map_err(|_| fmt::Error)?;
        let end = rowcol_to_a1(self.end.0, self.end.1).map_err(|_| fmt::Error)?;
        write!(f, "{start}:{end}")
    }
}

impl FromStr for A1Range {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Convert a legacy worksheet id (e.g. `od6`) into the numeric grid id used in
/// sheet URLs (`#gid=0`).
pub fn wid_to_gid(wid: &str) -> Result<String> {
    let (digits, mask) = if wid.chars().count() > 3 {
        let mut chars = wid.chars();
        chars.next();
        (chars.as_str(), 474)
    } else {
        (wid, 31578)
    };

    let value = u64::from_str_radix(digits, 36)
        .map_err(|e| Error::InvalidInput(format!("invalid worksheet id '{wid}': {e}")))?;
    Ok((value ^ mask).to_string())
}

/// Extract the spreadsheet key from a browser URL.
///
/// Both `/spreadsheets/d/<key>` and the older `ccc?key=<key>` forms are accepted.
pub fn extract_id_from_url(url: &str) -> Result<String> {
    if let Some((_, key)) = regex_captures!(r"/spreadsheets/d/([a-zA-Z0-9_-]+)", url) {
        return Ok(key.to_string());
    }
    if let Some((_, key)) = regex_captures!(r"key=([^&#]+)", url) {
        return Ok(key.to_string());
    }
    Err(Error::NoValidUrlKey(url.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letters(1).unwrap(), "A");
        assert_eq!(column_letters(2).unwrap(), "B");
        assert_eq!(column_letters(26).unwrap(), "Z");
        assert_eq!(column_letters(27).unwrap(), "AA");
        assert_eq!(column_letters(52).unwrap(), "AZ");
        assert_eq!(column_letters(104).unwrap(), "CZ");
        assert_eq!(column_letters(702).unwrap(), "ZZ");
        assert_eq!(column_letters(703).unwrap(), "AAA");
        assert_eq!(column_letters(731).unwrap(), "ABC");
        assert!(column_letters(0).is_err());
    }

    #[test]
    fn test_letters_to_column() {
        assert_eq!(letters_to_column("A").unwrap(), 1);
        assert_eq!(letters_to_column("Z").unwrap(), 26);
        assert_eq!(letters_to_column("AA").unwrap(), 27);
        assert_eq!(letters_to_column("ABC").unwrap(), 731);

        // Case insensitive
        assert_eq!(letters_to_column("abc").unwrap(), 731);
        assert_eq!(letters_to_column("cZ").unwrap(), 104);

        assert!(letters_to_column("").is_err());
        assert!(letters_to_column("A1").is_err());
        assert!(letters_to_column("ZZZZZZZZZZZZ").is_err());
    }

    #[test]
    fn test_rowcol_to_a1() {
        assert_eq!(rowcol_to_a1(3, 731).unwrap(), "ABC3");
        assert_eq!(rowcol_to_a1(1, 104).unwrap(), "CZ1");
        assert_eq!(rowcol_to_a1(12, 2).unwrap(), "B12");
    }

    #[test]
    fn test_rowcol_to_a1_rejects_zero() {
        assert!(matches!(rowcol_to_a1(0, 1), Err(Error::InvalidInput(_))));
        assert!(matches!(rowcol_to_a1(1, 0), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_a1_to_rowcol() {
        assert_eq!(a1_to_rowcol("ABC3").unwrap(), (3, 731));
        assert_eq!(a1_to_rowcol("A1").unwrap(), (1, 1));
        assert_eq!(a1_to_rowcol("z26").unwrap(), (26, 26));
    }

    #[test]
    fn test_a1_to_rowcol_errors() {
        for bad in ["", "A", "1", "1A", "A1B", "$A$1", "A 1", "A0", "A01", "B007", "A99999999999"] {
            assert!(
                matches!(a1_to_rowcol(bad), Err(Error::InvalidLabel(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_addr_converters_round_trip() {
        for row in 1..=256 {
            for col in 1..=511 {
                let label = rowcol_to_a1(row, col).unwrap();
                assert_eq!(a1_to_rowcol(&label).unwrap(), (row, col));
            }
        }
    }

    proptest! {
        #[test]
        fn prop_round_trip(row in 1u32..1_000_000, col in 1u32..100_000) {
            let label = rowcol_to_a1(row, col).unwrap();
            prop_assert_eq!(a1_to_rowcol(&label).unwrap(), (row, col));
        }

        #[test]
        fn prop_lowercase_labels_decode(row in 1u32..10_000, col in 1u32..20_000) {
            let label = rowcol_to_a1(row, col).unwrap().to_lowercase();
            prop_assert_eq!(a1_to_rowcol(&label).unwrap(), (row, col));
        }
    }

    #[test]
    fn test_range_parse() {
        let range = A1Range::parse("B2:D4").unwrap();
        assert_eq!(range.start, (2, 2));
        assert_eq!(range.end, (4, 4));
        assert_eq!(range.row_count(), 3);
        assert_eq!(range.col_count(), 3);
        assert!(range.contains(3, 3));
        assert!(!range.contains(1, 1));

        // Corners are normalized
        let range: A1Range = "D4:B2".parse().unwrap();
        assert_eq!(range.to_string(), "B2:D4");

        let single = A1Range::parse("C3").unwrap();
        assert_eq!(single.start, single.end);
        assert_eq!(single.to_string(), "C3:C3");

        assert!(A1Range::parse("A1:").is_err());
        assert!(A1Range::new((0, 1), (1, 1)).is_err());
    }

    #[test]
    fn test_quoted_range() {
        assert_eq!(quoted_range("Sheet1", "A1:B2"), "'Sheet1'!A1:B2");
        assert_eq!(quoted_range("Bob's data", "A1"), "'Bob''s data'!A1");
        assert_eq!(quoted_range("Sheet1", ""), "'Sheet1'");
    }

    #[test]
    fn test_wid_to_gid() {
        assert_eq!(wid_to_gid("od6").unwrap(), "0");
        assert_eq!(wid_to_gid("osyqnsz").unwrap(), "1751403737");
        assert_eq!(wid_to_gid("ogsrar0").unwrap(), "1015761654");
        assert!(wid_to_gid("").is_err());
        assert!(wid_to_gid("o#!").is_err());
    }

    #[test]
    fn test_extract_id_from_url() {
        let cases = [
            (
                "https://docs.google.com/spreadsheets/d/1qpyC0X3A0MwQoFDE8p-Bll4hps/edit#gid=0",
                "1qpyC0X3A0MwQoFDE8p-Bll4hps",
            ),
            (
                "https://docs.google.com/spreadsheets/d/1qpyC0X3A0MwQoFDE8p-Bll4hps/edit",
                "1qpyC0X3A0MwQoFDE8p-Bll4hps",
            ),
            (
                "https://docs.google.com/spreadsheets/d/1qpyC0X3A0MwQoFDE8p-Bll4hps",
                "1qpyC0X3A0MwQoFDE8p-Bll4hps",
            ),
            (
                "https://docs.google.com/spreadsheet/ccc?key=1qpyC0X3A0MwQoFDE8p-Bll4hps&usp=drive_web#gid=0",
                "1qpyC0X3A0MwQoFDE8p-Bll4hps",
            ),
        ];

        for (url, id) in cases {
            assert_eq!(extract_id_from_url(url).unwrap(), id);
        }
    }

    #[test]
    fn test_no_extract_id_from_url() {
        assert!(matches!(
            extract_id_from_url("http://example.org"),
            Err(Error::NoValidUrlKey(_))
        ));
    }
}
