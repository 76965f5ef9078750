//! Worksheet entity

use std::fmt;

use regex::Regex;
use serde_json::json;
use sheetwire_core::address::{a1_to_rowcol, column_letters, quoted_range, rowcol_to_a1, A1Range};
use sheetwire_core::cell::Cell;
use sheetwire_core::error::{Error, Result};
use sheetwire_core::grid::{bounded_rect, fill_gaps};
use sheetwire_core::records::{records_from_grid, Record, RecordOptions};

use crate::client::Client;
use crate::models::{
    value_text, AppendValuesResponse, BatchUpdateResponse, ClearValuesResponse, Dimension,
    SheetProperties, UpdateValuesResponse, ValueInputOption, ValueRenderOption,
};

/// What [`Worksheet::find`] and [`Worksheet::findall`] look for
#[derive(Debug, Clone)]
pub enum CellQuery {
    /// Cells whose value equals the text exactly
    Text(String),
    /// Cells whose value matches the pattern anywhere
    Pattern(Regex),
}

impl CellQuery {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            CellQuery::Text(text) => value == text,
            CellQuery::Pattern(re) => re.is_match(value),
        }
    }
}

impl fmt::Display for CellQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellQuery::Text(text) => write!(f, "{text}"),
            CellQuery::Pattern(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}

impl From<&str> for CellQuery {
    fn from(text: &str) -> Self {
        CellQuery::Text(text.to_string())
    }
}

impl From<String> for CellQuery {
    fn from(text: String) -> Self {
        CellQuery::Text(text)
    }
}

impl From<Regex> for CellQuery {
    fn from(re: Regex) -> Self {
        CellQuery::Pattern(re)
    }
}

/// One worksheet of a spreadsheet.
///
/// Holds the sheet properties as of the last fetch. Resizing and renaming
/// through this handle update them; changes made elsewhere are not seen.
#[derive(Debug, Clone)]
pub struct Worksheet<'a> {
    client: &'a Client,
    spreadsheet_id: String,
    properties: SheetProperties,
}

impl<'a> Worksheet<'a> {
    pub(crate) fn new(client: &'a Client, spreadsheet_id: String, properties: SheetProperties) -> Self {
        Self {
            client,
            spreadsheet_id,
            properties,
        }
    }

    /// Numeric sheet id
    pub fn id(&self) -> i64 {
        self.properties.sheet_id
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    pub fn title(&self) -> &str {
        &self.properties.title
    }

    /// Zero-based position in the spreadsheet
    pub fn index(&self) -> u32 {
        self.properties.index
    }

    pub fn row_count(&self) -> u32 {
        self.properties.grid_properties.row_count
    }

    pub fn col_count(&self) -> u32 {
        self.properties.grid_properties.column_count
    }

    pub fn properties(&self) -> &SheetProperties {
        &self.properties
    }

    /// `'Title'!<a1>`, or the whole sheet when `a1` is empty
    fn range_label(&self, a1: &str) -> String {
        quoted_range(&self.properties.title, a1)
    }

    fn get_values(&self, a1: &str, params: &[(&str, &str)]) -> Result<Vec<Vec<String>>> {
        let range = self.client.values_get(&self.spreadsheet_id, &self.range_label(a1), params)?;
        Ok(range.text_rows())
    }

    fn batch_update(&self, body: serde_json::Value) -> Result<BatchUpdateResponse> {
        self.client.batch_update(&self.spreadsheet_id, body)
    }

    pub fn acell(&self, label: &str) -> Result<Cell> {
        let (row, col) = a1_to_rowcol(label)?;
        self.cell(row, col)
    }

    pub fn cell(&self, row: u32, col: u32) -> Result<Cell> {
        self.cell_as(row, col, ValueRenderOption::FormattedValue)
    }

    /// Read one cell with an explicit render option
    pub fn cell_as(&self, row: u32, col: u32, render: ValueRenderOption) -> Result<Cell> {
        let label = rowcol_to_a1(row, col)?;
        let range = self.client.values_get(
            &self.spreadsheet_id,
            &self.range_label(&label),
            &[("valueRenderOption", render.as_str())],
        )?;
        let value = range
            .values
            .first()
            .and_then(|r| r.first())
            .map(value_text)
            .unwrap_or_default();
        Ok(Cell::new(row, col, value))
    }

    /// Every cell of a range such as `A1:B7`, empty ones included
    pub fn range(&self, a1: &str) -> Result<Vec<Cell>> {
        self.cells_in(A1Range::parse(a1)?)
    }

    /// Every cell between two corners, empty ones included
    pub fn range_by_rowcol(
        &self,
        first_row: u32,
        first_col: u32,
        last_row: u32,
        last_col: u32,
    ) -> Result<Vec<Cell>> {
        self.cells_in(A1Range::new((first_row, first_col), (last_row, last_col))?)
    }

    fn cells_in(&self, range: A1Range) -> Result<Vec<Cell>> {
        let values = self.get_values(&range.to_string(), &[])?;
        let grid = fill_gaps(
            values,
            Some(range.row_count() as usize),
            Some(range.col_count() as usize),
            String::new(),
        );

        let (row_offset, col_offset) = range.start;
        let mut cells = Vec::with_capacity(grid.len() * range.col_count() as usize);
        for (i, row) in grid.into_iter().enumerate() {
            for (j, value) in row.into_iter().enumerate() {
                cells.push(Cell::new(row_offset + i as u32, col_offset + j as u32, value));
            }
        }
        Ok(cells)
    }

    /// All values as a rectangle anchored at `A1`; empty when the sheet is empty
    pub fn get_all_values(&self) -> Result<Vec<Vec<String>>> {
        Ok(fill_gaps(self.get_values("", &[])?, None, None, String::new()))
    }

    /// Rows below the header row as records keyed by the header values
    pub fn get_all_records(&self, options: &RecordOptions) -> Result<Vec<Record>> {
        records_from_grid(&self.get_all_values()?, options)
    }

    /// Values of one row up to its last non-empty cell
    pub fn row_values(&self, row: u32) -> Result<Vec<String>> {
        self.row_values_as(row, ValueRenderOption::FormattedValue)
    }

    pub fn row_values_as(&self, row: u32, render: ValueRenderOption) -> Result<Vec<String>> {
        if row < 1 {
            return Err(Error::InvalidInput(format!("row {row} must be >= 1")));
        }
        let values = self.get_values(
            &format!("A{row}:{row}"),
            &[("valueRenderOption", render.as_str())],
        )?;
        Ok(values.into_iter().next().unwrap_or_default())
    }

    /// Values of one column down to its last non-empty cell
    pub fn col_values(&self, col: u32) -> Result<Vec<String>> {
        self.col_values_as(col, ValueRenderOption::FormattedValue)
    }

    pub fn col_values_as(&self, col: u32, render: ValueRenderOption) -> Result<Vec<String>> {
        let letters = column_letters(col)?;
        let values = self.get_values(
            &format!("{letters}1:{letters}"),
            &[
                ("valueRenderOption", render.as_str()),
                ("majorDimension", Dimension::Columns.as_str()),
            ],
        )?;
        Ok(values.into_iter().next().unwrap_or_default())
    }

    pub fn update_acell(&self, label: &str, value: &str) -> Result<UpdateValuesResponse> {
        let (row, col) = a1_to_rowcol(label)?;
        self.update_cell(row, col, value)
    }

    /// Set one cell as if the value were typed in
    pub fn update_cell(&self, row: u32, col: u32, value: &str) -> Result<UpdateValuesResponse> {
        let label = rowcol_to_a1(row, col)?;
        self.client.values_update(
            &self.spreadsheet_id,
            &self.range_label(&label),
            &[("valueInputOption", ValueInputOption::UserEntered.as_str())],
            json!({ "values": [[value]] }),
        )
    }

    /// Write many cells in one request.
    ///
    /// The request covers the bounding box of the cells. Positions inside the
    /// box that are not in `cells` are written as empty strings.
    pub fn update_cells(&self, cells: &[Cell], input: ValueInputOption) -> Result<UpdateValuesResponse> {
        let (range, grid) = bounded_rect(cells.iter().map(Cell::to_triple))
            .ok_or_else(|| Error::InvalidInput("no cells to update".into()))?;
        self.client.values_update(
            &self.spreadsheet_id,
            &self.range_label(&range.to_string()),
            &[("valueInputOption", input.as_str())],
            json!({ "values": grid }),
        )
    }

    /// Change the grid size. At least one dimension must be given.
    pub fn resize(&mut self, rows: Option<u32>, cols: Option<u32>) -> Result<BatchUpdateResponse> {
        let mut grid = serde_json::Map::new();
        let mut fields = Vec::new();
        if let Some(rows) = rows {
            grid.insert("rowCount".into(), json!(rows));
            fields.push("gridProperties/rowCount");
        }
        if let Some(cols) = cols {
            grid.insert("columnCount".into(), json!(cols));
            fields.push("gridProperties/columnCount");
        }
        if fields.is_empty() {
            return Err(Error::InvalidInput(
                "either rows or cols must be specified".into(),
            ));
        }

        let response = self.batch_update(json!({
            "requests": [{
                "updateSheetProperties": {
                    "properties": {"sheetId": self.id(), "gridProperties": grid},
                    "fields": fields.join(",")
                }
            }]
        }))?;

        if let Some(rows) = rows {
            self.properties.grid_properties.row_count = rows;
        }
        if let Some(cols) = cols {
            self.properties.grid_properties.column_count = cols;
        }
        Ok(response)
    }

    /// Rename the worksheet
    pub fn update_title(&mut self, title: &str) -> Result<BatchUpdateResponse> {
        let response = self.batch_update(json!({
            "requests": [{
                "updateSheetProperties": {
                    "properties": {"sheetId": self.id(), "title": title},
                    "fields": "title"
                }
            }]
        }))?;
        self.properties.title = title.to_string();
        Ok(response)
    }

    pub fn add_rows(&mut self, rows: u32) -> Result<BatchUpdateResponse> {
        let total = self.row_count().saturating_add(rows);
        self.resize(Some(total), None)
    }

    pub fn add_cols(&mut self, cols: u32) -> Result<BatchUpdateResponse> {
        let total = self.col_count().saturating_add(cols);
        self.resize(None, Some(total))
    }

    /// Append a row after the last row with data, growing the sheet if needed
    pub fn append_row<S: AsRef<str>>(
        &self,
        values: &[S],
        input: ValueInputOption,
    ) -> Result<AppendValuesResponse> {
        self.client.values_append(
            &self.spreadsheet_id,
            &self.range_label(""),
            &[("valueInputOption", input.as_str())],
            json!({ "values": [row_json(values)] }),
        )
    }

    /// Insert a row at a 1-based position and fill it.
    ///
    /// Two requests: an `insertDimension` shifting rows down, then a values
    /// update of the new row.
    pub fn insert_row<S: AsRef<str>>(
        &self,
        values: &[S],
        index: u32,
        input: ValueInputOption,
    ) -> Result<UpdateValuesResponse> {
        if index < 1 {
            return Err(Error::InvalidInput(format!("row index {index} must be >= 1")));
        }
        self.batch_update(json!({
            "requests": [{
                "insertDimension": {
                    "range": {
                        "sheetId": self.id(),
                        "dimension": Dimension::Rows.as_str(),
                        "startIndex": index - 1,
                        "endIndex": index
                    }
                }
            }]
        }))?;

        self.client.values_update(
            &self.spreadsheet_id,
            &self.range_label(&format!("A{index}")),
            &[("valueInputOption", input.as_str())],
            json!({ "values": [row_json(values)] }),
        )
    }

    /// Delete the row at a 1-based position
    pub fn delete_row(&self, index: u32) -> Result<BatchUpdateResponse> {
        if index < 1 {
            return Err(Error::InvalidInput(format!("row index {index} must be >= 1")));
        }
        self.batch_update(json!({
            "requests": [{
                "deleteDimension": {
                    "range": {
                        "sheetId": self.id(),
                        "dimension": Dimension::Rows.as_str(),
                        "startIndex": index - 1,
                        "endIndex": index
                    }
                }
            }]
        }))
    }

    /// Clear every value, keeping formatting
    pub fn clear(&self) -> Result<ClearValuesResponse> {
        self.client
            .values_clear(&self.spreadsheet_id, &self.range_label(""))
    }

    fn all_cells(&self) -> Result<Vec<Cell>> {
        let mut cells = Vec::new();
        for (i, row) in self.get_all_values()?.into_iter().enumerate() {
            for (j, value) in row.into_iter().enumerate() {
                cells.push(Cell::new(i as u32 + 1, j as u32 + 1, value));
            }
        }
        Ok(cells)
    }

    /// First cell matching, scanning row by row
    pub fn find(&self, query: impl Into<CellQuery>) -> Result<Cell> {
        let query = query.into();
        self.all_cells()?
            .into_iter()
            .find(|cell| query.matches(&cell.value))
            .ok_or_else(|| Error::CellNotFound(query.to_string()))
    }

    /// Every matching cell, row by row
    pub fn findall(&self, query: impl Into<CellQuery>) -> Result<Vec<Cell>> {
        let query = query.into();
        Ok(self
            .all_cells()?
            .into_iter()
            .filter(|cell| query.matches(&cell.value))
            .collect())
    }
}

fn row_json<S: AsRef<str>>(values: &[S]) -> Vec<&str> {
    values.iter().map(AsRef::as_ref).collect()
}
