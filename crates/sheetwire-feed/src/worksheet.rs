//! Legacy worksheet entity

use sheetwire_core::address::{a1_to_rowcol, wid_to_gid};
use sheetwire_core::cell::Cell;
use sheetwire_core::error::Result;
use sheetwire_core::grid::cells_to_rect;

use crate::atom::WorksheetEntry;
use crate::client::FeedClient;

/// One worksheet of a [`FeedSpreadsheet`](crate::FeedSpreadsheet).
#[derive(Debug, Clone)]
pub struct FeedWorksheet<'a> {
    client: &'a FeedClient,
    spreadsheet_key: String,
    entry: WorksheetEntry,
}

impl<'a> FeedWorksheet<'a> {
    pub(crate) fn new(client: &'a FeedClient, spreadsheet_key: String, entry: WorksheetEntry) -> Self {
        Self {
            client,
            spreadsheet_key,
            entry,
        }
    }

    /// Worksheet id such as `od6`
    pub fn id(&self) -> &str {
        &self.entry.key
    }

    /// Numeric grid id used in browser URLs
    pub fn gid(&self) -> Result<String> {
        wid_to_gid(&self.entry.key)
    }

    pub fn spreadsheet_key(&self) -> &str {
        &self.spreadsheet_key
    }

    pub fn title(&self) -> &str {
        &self.entry.title
    }

    pub fn row_count(&self) -> u32 {
        self.entry.row_count
    }

    pub fn col_count(&self) -> u32 {
        self.entry.col_count
    }

    /// Every non-empty cell
    pub fn cells(&self) -> Result<Vec<Cell>> {
        Ok(self
            .client
            .cells_feed(&self.spreadsheet_key, &self.entry.key)?
            .into_iter()
            .map(Cell::from)
            .collect())
    }

    /// All values as a rectangle anchored at `A1`
    pub fn get_all_values(&self) -> Result<Vec<Vec<String>>> {
        let cells = self.cells()?;
        Ok(cells_to_rect(cells.into_iter().map(|c| (c.row, c.col, c.value))))
    }

    /// Values of one row. Cells missing from the feed are `None`.
    pub fn row_values(&self, row: u32) -> Result<Vec<Option<String>>> {
        let cells = self.cells()?;
        Ok(line(
            cells
                .into_iter()
                .filter(|c| c.row == row)
                .map(|c| (c.col, c.value)),
        ))
    }

    /// Values of one column. Cells missing from the feed are `None`.
    pub fn col_values(&self, col: u32) -> Result<Vec<Option<String>>> {
        let cells = self.cells()?;
        Ok(line(
            cells
                .into_iter()
                .filter(|c| c.col == col)
                .map(|c| (c.row, c.value)),
        ))
    }

    pub fn cell(&self, row: u32, col: u32) -> Result<Cell> {
        let entry = self
            .client
            .cell_entry(&self.spreadsheet_key, &self.entry.key, row, col)?;
        Ok(Cell::from(entry))
    }

    pub fn acell(&self, label: &str) -> Result<Cell> {
        let (row, col) = a1_to_rowcol(label)?;
        self.cell(row, col)
    }

    /// Set the input value of a cell and return the cell as stored
    pub fn update_cell(&self, row: u32, col: u32, value: &str) -> Result<Cell> {
        let entry = self
            .client
            .update_cell_value(&self.spreadsheet_key, &self.entry.key, row, col, value)?;
        tracing::debug!("Updated R{}C{} of {}", row, col, self.entry.title);
        Ok(Cell::from(entry))
    }

    pub fn update_acell(&self, label: &str, value: &str) -> Result<Cell> {
        let (row, col) = a1_to_rowcol(label)?;
        self.update_cell(row, col, value)
    }
}

/// Lay out sparse `(position, value)` pairs along one line, gaps as `None`.
fn line(values: impl Iterator<Item = (u32, String)>) -> Vec<Option<String>> {
    cells_to_rect(values.map(|(pos, value)| (1, pos, Some(value))))
        .into_iter()
        .next()
        .unwrap_or_default()
}
