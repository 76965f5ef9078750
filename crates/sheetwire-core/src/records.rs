//! Header-keyed records built from a worksheet grid

use crate::error::{Error, Result};
use crate::value::{numericise, CellValue, NumericiseOptions};

/// One data row keyed by the header row's values.
///
/// Field order follows the header. A repeated header keeps its first position
/// and takes the value of its last column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(String, Option<CellValue>)>,
}

impl Record {
    /// Look up a field by header name
    pub fn get(&self, key: &str) -> Option<&Option<CellValue>> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Header names in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// Fields in header order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Option<CellValue>)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn insert(&mut self, key: &str, value: Option<CellValue>) {
        match self.fields.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key.to_string(), value)),
        }
    }
}

/// Options for [`records_from_grid`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordOptions {
    /// 1-based row holding the keys
    pub head: usize,
    /// How data cells are interpreted
    pub numericise: NumericiseOptions,
}

impl Default for RecordOptions {
    fn default() -> Self {
        Self {
            head: 1,
            numericise: NumericiseOptions::default(),
        }
    }
}

/// Turn a rectangular grid into records keyed by the `head` row.
///
/// Every row below the header becomes one record, with values run through
/// [`numericise`]. A grid shorter than `head` yields no records.
pub fn records_from_grid<S: AsRef<str>>(
    grid: &[Vec<S>],
    options: &RecordOptions,
) -> Result<Vec<Record>> {
    if options.head < 1 {
        return Err(Error::InvalidInput("head row must be >= 1".into()));
    }

    let idx = options.head - 1;
    let Some(keys) = grid.get(idx) else {
        return Ok(Vec::new());
    };

    let records = grid[idx + 1..]
        .iter()
        .map(|row| {
            let mut record = Record::default();
            for (key, value) in keys.iter().zip(row) {
                record.insert(
                    key.as_ref(),
                    numericise(Some(value.as_ref()), &options.numericise),
                );
            }
            record
        })
        .collect();

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn grid() -> Vec<Vec<&'static str>> {
        vec![
            vec!["name", "age", "score"],
            vec!["ann", "31", "7.5"],
            vec!["bob", "", "x"],
        ]
    }

    #[test]
    fn test_records_from_grid() {
        let records = records_from_grid(&grid(), &RecordOptions::default()).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].get("name"), Some(&Some(CellValue::text("ann"))));
        assert_eq!(records[0].get("age"), Some(&Some(CellValue::Integer(31))));
        assert_eq!(records[0].get("score"), Some(&Some(CellValue::Float(7.5))));
        assert_eq!(records[1].get("age"), Some(&Some(CellValue::text(""))));
        assert_eq!(records[1].get("missing"), None);
        assert_eq!(records[0].keys().collect::<Vec<_>>(), ["name", "age", "score"]);
    }

    #[test]
    fn test_records_empty_to_zero() {
        let options = RecordOptions {
            numericise: NumericiseOptions::default().empty_to_zero(true),
            ..Default::default()
        };
        let records = records_from_grid(&grid(), &options).unwrap();
        assert_eq!(records[1].get("age"), Some(&Some(CellValue::Integer(0))));
    }

    #[test]
    fn test_records_head_offset() {
        let options = RecordOptions {
            head: 2,
            ..Default::default()
        };
        let records = records_from_grid(&grid(), &options).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("ann"), Some(&Some(CellValue::text("bob"))));

        let options = RecordOptions {
            head: 9,
            ..Default::default()
        };
        assert!(records_from_grid(&grid(), &options).unwrap().is_empty());

        let options = RecordOptions {
            head: 0,
            ..Default::default()
        };
        assert!(records_from_grid(&grid(), &options).is_err());
    }

    #[test]
    fn test_records_duplicate_keys() {
        let grid = vec![vec!["k", "k"], vec!["1", "2"]];
        let records = records_from_grid(&grid, &RecordOptions::default()).unwrap();
        assert_eq!(records[0].len(), 1);
        assert_eq!(records[0].get("k"), Some(&Some(CellValue::Integer(2))));
    }
}
