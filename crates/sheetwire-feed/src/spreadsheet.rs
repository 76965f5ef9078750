//! Legacy spreadsheet entity

use sheetwire_core::error::{Error, Result};
use sheetwire_core::Resolution;

use crate::atom::WorksheetEntry;
use crate::client::FeedClient;
use crate::worksheet::FeedWorksheet;

/// A spreadsheet reached through the feed protocol.
///
/// The title is known when the spreadsheet was found through a listing and
/// unresolved when it was opened by key; [`refresh`](Self::refresh) fetches
/// it. The worksheet list is fetched once and reused until
/// [`invalidate_worksheets`](Self::invalidate_worksheets).
#[derive(Debug)]
pub struct FeedSpreadsheet<'a> {
    client: &'a FeedClient,
    key: String,
    title: Resolution<String>,
    worksheets: Resolution<Vec<WorksheetEntry>>,
}

impl<'a> FeedSpreadsheet<'a> {
    pub(crate) fn new(client: &'a FeedClient, key: String, title: Resolution<String>) -> Self {
        Self {
            client,
            key,
            title,
            worksheets: Resolution::unresolved(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Title, if it has been resolved
    pub fn title(&self) -> Option<&str> {
        self.title.get().map(String::as_str)
    }

    /// Re-read the title from the spreadsheets feed
    pub fn refresh(&mut self) -> Result<&str> {
        let entry = self
            .client
            .spreadsheets_feed()?
            .into_iter()
            .find(|e| e.key == self.key)
            .ok_or_else(|| Error::SpreadsheetNotFound(self.key.clone()))?;
        Ok(self.title.set(entry.title).as_str())
    }

    /// Forget the cached worksheet list
    pub fn invalidate_worksheets(&mut self) {
        self.worksheets.invalidate();
    }

    fn worksheet_entries(&mut self) -> Result<&[WorksheetEntry]> {
        let client = self.client;
        let key = &self.key;
        let entries = self
            .worksheets
            .get_or_try_resolve(|| client.worksheets_feed(key))?;
        Ok(entries.as_slice())
    }

    /// All worksheets, in spreadsheet order
    pub fn worksheets(&mut self) -> Result<Vec<FeedWorksheet<'a>>> {
        let client = self.client;
        let key = self.key.clone();
        Ok(self
            .worksheet_entries()?
            .iter()
            .map(|entry| FeedWorksheet::new(client, key.clone(), entry.clone()))
            .collect())
    }

    /// Worksheet at a zero-based position, `None` past the end
    pub fn get_worksheet(&mut self, index: usize) -> Result<Option<FeedWorksheet<'a>>> {
        let client = self.client;
        let key = self.key.clone();
        Ok(self
            .worksheet_entries()?
            .get(index)
            .map(|entry| FeedWorksheet::new(client, key, entry.clone())))
    }

    /// Worksheet by title
    pub fn worksheet(&mut self, title: &str) -> Result<FeedWorksheet<'a>> {
        let client = self.client;
        let key = self.key.clone();
        self.worksheet_entries()?
            .iter()
            .find(|entry| entry.title == title)
            .map(|entry| FeedWorksheet::new(client, key, entry.clone()))
            .ok_or_else(|| Error::WorksheetNotFound(title.to_string()))
    }

    /// The first worksheet
    pub fn sheet1(&mut self) -> Result<FeedWorksheet<'a>> {
        self.get_worksheet(0)?
            .ok_or_else(|| Error::WorksheetNotFound(format!("no worksheets in {}", self.key)))
    }
}
