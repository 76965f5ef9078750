//! Capability interface shared by the protocol adapters
//!
//! The legacy feed client and the current JSON client have nothing in common
//! on the wire. Both implement [`SheetsService`], which covers what every
//! caller needs: find spreadsheets, list their worksheets, read and write
//! cells.

use crate::cell::Cell;
use crate::error::{Error, Result};
use crate::grid::cells_to_rect;

/// Identity and title of a spreadsheet as seen in a listing
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpreadsheetSummary {
    /// Opaque spreadsheet key
    pub id: String,
    /// Spreadsheet title
    pub title: String,
}

/// Identity and shape of a worksheet
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorksheetSummary {
    /// Worksheet id (legacy `od6`-style id, or the numeric sheet id)
    pub id: String,
    /// Worksheet title
    pub title: String,
    /// Number of rows
    pub row_count: u32,
    /// Number of columns
    pub col_count: u32,
}

/// Operations both protocol adapters support.
pub trait SheetsService {
    /// List every spreadsheet visible to the authenticated user
    fn list_spreadsheets(&self) -> Result<Vec<SpreadsheetSummary>>;

    /// List the worksheets of a spreadsheet, in order
    fn list_worksheets(&self, spreadsheet_id: &str) -> Result<Vec<WorksheetSummary>>;

    /// Read every non-empty cell of a worksheet
    fn read_cells(&self, spreadsheet_id: &str, worksheet: &WorksheetSummary)
        -> Result<Vec<Cell>>;

    /// Write one value to a cell
    fn write_cell(
        &self,
        spreadsheet_id: &str,
        worksheet: &WorksheetSummary,
        row: u32,
        col: u32,
        value: &str,
    ) -> Result<()>;

    /// Whether a listed spreadsheet title matches the one asked for.
    ///
    /// The default ignores whitespace around the listed title, which is how
    /// the legacy feeds report it. Clients whose service returns exact names
    /// override this with a strict comparison.
    fn title_matches(&self, listed: &str, wanted: &str) -> bool {
        listed.trim() == wanted
    }

    /// First spreadsheet whose title matches under [`title_matches`](Self::title_matches)
    fn find_spreadsheet(&self, title: &str) -> Result<SpreadsheetSummary> {
        self.list_spreadsheets()?
            .into_iter()
            .find(|s| self.title_matches(&s.title, title))
            .ok_or_else(|| Error::SpreadsheetNotFound(title.to_string()))
    }

    /// All spreadsheets, optionally filtered by title
    fn find_spreadsheets(&self, title: Option<&str>) -> Result<Vec<SpreadsheetSummary>> {
        let all = self.list_spreadsheets()?;
        Ok(match title {
            Some(title) => all
                .into_iter()
                .filter(|s| self.title_matches(&s.title, title))
                .collect(),
            None => all,
        })
    }

    /// Worksheet by title
    fn find_worksheet(&self, spreadsheet_id: &str, title: &str) -> Result<WorksheetSummary> {
        self.list_worksheets(spreadsheet_id)?
            .into_iter()
            .find(|w| w.title == title)
            .ok_or_else(|| Error::WorksheetNotFound(title.to_string()))
    }

    /// Every cell of a worksheet as a dense grid anchored at `A1`
    fn read_grid(
        &self,
        spreadsheet_id: &str,
        worksheet: &WorksheetSummary,
    ) -> Result<Vec<Vec<String>>> {
        let cells = self.read_cells(spreadsheet_id, worksheet)?;
        Ok(cells_to_rect(cells.into_iter().map(|c| (c.row, c.col, c.value))))
    }
}
