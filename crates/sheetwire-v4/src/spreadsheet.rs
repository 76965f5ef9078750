//! Spreadsheet entity

use serde_json::json;
use sheetwire_core::error::{Error, Result};
use sheetwire_core::Resolution;

use crate::client::Client;
use crate::models::{
    AppendValuesResponse, BatchUpdateResponse, ClearValuesResponse, SheetProperties,
    SpreadsheetMetadata, UpdateValuesResponse, ValueRange,
};
use crate::urls;
use crate::worksheet::Worksheet;

/// A spreadsheet reached through the JSON API.
///
/// Only the id is required. The title is resolved when the spreadsheet was
/// found through a Drive listing, and otherwise fetched by
/// [`refresh`](Self::refresh). The worksheet list is fetched on every call.
#[derive(Debug)]
pub struct Spreadsheet<'a> {
    client: &'a Client,
    id: String,
    title: Resolution<String>,
}

impl<'a> Spreadsheet<'a> {
    pub(crate) fn new(client: &'a Client, id: String, title: Resolution<String>) -> Self {
        Self { client, id, title }
    }

    pub fn client(&self) -> &'a Client {
        self.client
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Title, if it has been resolved
    pub fn title(&self) -> Option<&str> {
        self.title.get().map(String::as_str)
    }

    /// Fetch the metadata and update the title from it
    pub fn refresh(&mut self) -> Result<&str> {
        let metadata = self.fetch_sheet_metadata()?;
        Ok(self.title.set(metadata.properties.title).as_str())
    }

    /// Browser URL
    pub fn url(&self) -> String {
        urls::spreadsheet_link(&self.id)
    }

    pub fn fetch_sheet_metadata(&self) -> Result<SpreadsheetMetadata> {
        self.client.fetch_sheet_metadata(&self.id)
    }

    pub fn batch_update(&self, body: serde_json::Value) -> Result<BatchUpdateResponse> {
        self.client.batch_update(&self.id, body)
    }

    pub fn values_get(&self, range: &str, params: &[(&str, &str)]) -> Result<ValueRange> {
        self.client.values_get(&self.id, range, params)
    }

    pub fn values_update(
        &self,
        range: &str,
        params: &[(&str, &str)],
        body: serde_json::Value,
    ) -> Result<UpdateValuesResponse> {
        self.client.values_update(&self.id, range, params, body)
    }

    pub fn values_append(
        &self,
        range: &str,
        params: &[(&str, &str)],
        body: serde_json::Value,
    ) -> Result<AppendValuesResponse> {
        self.client.values_append(&self.id, range, params, body)
    }

    pub fn values_clear(&self, range: &str) -> Result<ClearValuesResponse> {
        self.client.values_clear(&self.id, range)
    }

    fn worksheet_from(&self, properties: SheetProperties) -> Worksheet<'a> {
        Worksheet::new(self.client, self.id.clone(), properties)
    }

    /// All worksheets, in spreadsheet order
    pub fn worksheets(&self) -> Result<Vec<Worksheet<'a>>> {
        Ok(self
            .fetch_sheet_metadata()?
            .sheets
            .into_iter()
            .map(|sheet| self.worksheet_from(sheet.properties))
            .collect())
    }

    /// Worksheet at a zero-based position, `None` past the end
    pub fn get_worksheet(&self, index: usize) -> Result<Option<Worksheet<'a>>> {
        Ok(self
            .fetch_sheet_metadata()?
            .sheets
            .into_iter()
            .nth(index)
            .map(|sheet| self.worksheet_from(sheet.properties)))
    }

    /// First worksheet with this title
    pub fn worksheet(&self, title: &str) -> Result<Worksheet<'a>> {
        self.fetch_sheet_metadata()?
            .sheets
            .into_iter()
            .find(|sheet| sheet.properties.title == title)
            .map(|sheet| self.worksheet_from(sheet.properties))
            .ok_or_else(|| Error::WorksheetNotFound(title.to_string()))
    }

    /// The first worksheet
    pub fn sheet1(&self) -> Result<Worksheet<'a>> {
        self.get_worksheet(0)?
            .ok_or_else(|| Error::WorksheetNotFound(format!("no worksheets in {}", self.id)))
    }

    /// Add a grid worksheet with the given size
    pub fn add_worksheet(&self, title: &str, rows: u32, cols: u32) -> Result<Worksheet<'a>> {
        let response = self.batch_update(json!({
            "requests": [{
                "addSheet": {
                    "properties": {
                        "title": title,
                        "sheetType": "GRID",
                        "gridProperties": {"rowCount": rows, "columnCount": cols}
                    }
                }
            }]
        }))?;

        let properties = response
            .replies
            .first()
            .and_then(|reply| reply.pointer("/addSheet/properties"))
            .cloned()
            .ok_or_else(|| Error::decode("addSheet reply carries no sheet properties"))?;
        let properties: SheetProperties = serde_json::from_value(properties)
            .map_err(|e| Error::decode(format!("invalid sheet properties: {e}")))?;

        tracing::info!("Added worksheet {} ({})", properties.title, properties.sheet_id);
        Ok(self.worksheet_from(properties))
    }

    /// Delete a worksheet
    pub fn del_worksheet(&self, worksheet: &Worksheet<'_>) -> Result<BatchUpdateResponse> {
        self.batch_update(json!({
            "requests": [{"deleteSheet": {"sheetId": worksheet.id()}}]
        }))
    }
}
