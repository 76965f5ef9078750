//! Legacy feed client

use sheetwire_core::address::rowcol_to_a1;
use sheetwire_core::cell::Cell;
use sheetwire_core::error::{Error, Result};
use sheetwire_core::service::{SheetsService, SpreadsheetSummary, WorksheetSummary};
use sheetwire_core::Resolution;
use sheetwire_http::{join_url, ClientConfig, Request, Session, Transport};

use crate::atom::{self, CellEntry, SpreadsheetEntry, WorksheetEntry};
use crate::auth::{self, Credentials};
use crate::spreadsheet::FeedSpreadsheet;

const ATOM_CONTENT_TYPE: &str = "application/atom+xml";

/// Client for the legacy Atom feed protocol.
///
/// Holds the HTTP session; after [`login`](Self::login) the session carries
/// the `GoogleLogin` authorization header for every later request.
#[derive(Debug)]
pub struct FeedClient {
    session: Session,
    config: ClientConfig,
}

impl FeedClient {
    /// Create a client that talks HTTP through reqwest
    pub fn new(config: ClientConfig) -> Result<Self> {
        let session = Session::from_config(&config)?;
        Ok(Self { session, config })
    }

    /// Create a client over an arbitrary transport
    pub fn with_transport<T: Transport + 'static>(config: ClientConfig, transport: T) -> Self {
        Self {
            session: Session::new(transport),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Log in with an email and password and keep the resulting token.
    pub fn login(&mut self, credentials: &Credentials) -> Result<()> {
        let request = auth::login_request(&self.config, credentials);
        let response = self.session.send(request)?;
        let header = auth::authorization_header(&response)?;
        self.session.set_header("Authorization", header);
        tracing::info!("Logged in to the feed service as {}", credentials.email);
        Ok(())
    }

    fn feed_url(&self, segments: &[&str]) -> Result<String> {
        join_url(&self.config.feeds_url, segments)
    }

    fn get_xml(&self, url: String) -> Result<String> {
        Ok(self.session.send_checked(Request::get(url))?.body)
    }

    /// Every spreadsheet visible to the logged-in user
    pub fn spreadsheets_feed(&self) -> Result<Vec<SpreadsheetEntry>> {
        let url = self.feed_url(&["spreadsheets", "private", "full"])?;
        atom::parse_spreadsheet_feed(&self.get_xml(url)?)
    }

    /// Worksheets of one spreadsheet
    pub fn worksheets_feed(&self, key: &str) -> Result<Vec<WorksheetEntry>> {
        let url = self.feed_url(&["worksheets", key, "private", "full"])?;
        atom::parse_worksheet_feed(&self.get_xml(url)?)
    }

    /// Non-empty cells of one worksheet
    pub fn cells_feed(&self, key: &str, worksheet_id: &str) -> Result<Vec<CellEntry>> {
        let url = self.feed_url(&["cells", key, worksheet_id, "private", "full"])?;
        atom::parse_cell_feed(&self.get_xml(url)?)
    }

    /// A single cell entry, empty or not
    pub fn cell_entry(&self, key: &str, worksheet_id: &str, row: u32, col: u32) -> Result<CellEntry> {
        // Validates the position the same way labels do
        rowcol_to_a1(row, col)?;
        let position = format!("R{row}C{col}");
        let url = self.feed_url(&["cells", key, worksheet_id, "private", "full", &position])?;
        atom::parse_cell_entry(&self.get_xml(url)?)
    }

    /// PUT an Atom entry document to an edit URL and decode the updated entry
    pub fn put_cell(&self, edit_url: &str, entry_xml: String) -> Result<CellEntry> {
        let request = Request::put(edit_url).text(ATOM_CONTENT_TYPE, entry_xml);
        let response = self.session.send_checked(request)?;
        atom::parse_cell_entry(&response.body)
    }

    /// Set a cell's input value: fetch its entry, then PUT to its edit link.
    pub fn update_cell_value(
        &self,
        key: &str,
        worksheet_id: &str,
        row: u32,
        col: u32,
        value: &str,
    ) -> Result<CellEntry> {
        let entry = self.cell_entry(key, worksheet_id, row, col)?;
        let edit_url = entry
            .edit_url
            .clone()
            .ok_or_else(|| Error::decode(format!("cell entry '{}' has no edit link", entry.id)))?;
        let xml = atom::cell_update_entry(&entry, &edit_url, value);
        self.put_cell(&edit_url, xml)
    }

    /// Open the first spreadsheet whose title (trimmed) equals `title`
    pub fn open(&self, title: &str) -> Result<FeedSpreadsheet<'_>> {
        let entry = self
            .spreadsheets_feed()?
            .into_iter()
            .find(|e| self.title_matches(&e.title, title))
            .ok_or_else(|| Error::SpreadsheetNotFound(title.to_string()))?;
        tracing::info!("Opened spreadsheet {} ({})", entry.title, entry.key);
        Ok(FeedSpreadsheet::new(self, entry.key, Resolution::resolved(entry.title)))
    }

    /// Open every spreadsheet, optionally only those titled `title`
    pub fn open_all(&self, title: Option<&str>) -> Result<Vec<FeedSpreadsheet<'_>>> {
        Ok(self
            .spreadsheets_feed()?
            .into_iter()
            .filter(|e| title.map_or(true, |t| self.title_matches(&e.title, t)))
            .map(|e| FeedSpreadsheet::new(self, e.key, Resolution::resolved(e.title)))
            .collect())
    }

    /// Open a spreadsheet by key without contacting the service
    pub fn open_by_key(&self, key: impl Into<String>) -> FeedSpreadsheet<'_> {
        FeedSpreadsheet::new(self, key.into(), Resolution::unresolved())
    }
}

impl From<CellEntry> for Cell {
    fn from(entry: CellEntry) -> Self {
        Cell::new(entry.row, entry.col, entry.value)
    }
}

impl From<WorksheetEntry> for WorksheetSummary {
    fn from(entry: WorksheetEntry) -> Self {
        WorksheetSummary {
            id: entry.key,
            title: entry.title,
            row_count: entry.row_count,
            col_count: entry.col_count,
        }
    }
}

impl SheetsService for FeedClient {
    fn list_spreadsheets(&self) -> Result<Vec<SpreadsheetSummary>> {
        Ok(self
            .spreadsheets_feed()?
            .into_iter()
            .map(|e| SpreadsheetSummary {
                id: e.key,
                title: e.title,
            })
            .collect())
    }

    fn list_worksheets(&self, spreadsheet_id: &str) -> Result<Vec<WorksheetSummary>> {
        Ok(self
            .worksheets_feed(spreadsheet_id)?
            .into_iter()
            .map(WorksheetSummary::from)
            .collect())
    }

    fn read_cells(&self, spreadsheet_id: &str, worksheet: &WorksheetSummary) -> Result<Vec<Cell>> {
        Ok(self
            .cells_feed(spreadsheet_id, &worksheet.id)?
            .into_iter()
            .map(Cell::from)
            .collect())
    }

    fn write_cell(
        &self,
        spreadsheet_id: &str,
        worksheet: &WorksheetSummary,
        row: u32,
        col: u32,
        value: &str,
    ) -> Result<()> {
        self.update_cell_value(spreadsheet_id, &worksheet.id, row, col, value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sheetwire_http::mock::ScriptedTransport;
    use sheetwire_http::Method;

    fn client(transport: &ScriptedTransport) -> FeedClient {
        let config = ClientConfig::default()
            .with_auth_url("https://auth.test/accounts/ClientLogin")
            .with_feeds_url("https://feeds.test/feeds");
        FeedClient::with_transport(config, transport.clone())
    }

    #[test]
    fn test_login_sets_authorization() {
        let transport = ScriptedTransport::new().respond(200, "SID=a\nAuth=secret-token\n");
        let mut client = client(&transport);
        client.login(&Credentials::new("me@example.com", "pw")).unwrap();

        assert_eq!(
            client.session().header("Authorization"),
            Some("GoogleLogin auth=secret-token")
        );
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.url, "https://auth.test/accounts/ClientLogin");
    }

    #[test]
    fn test_failed_login_keeps_session_clean() {
        let transport = ScriptedTransport::new().respond(403, "Error=BadAuthentication");
        let mut client = client(&transport);
        let err = client.login(&Credentials::new("me@example.com", "bad")).unwrap_err();

        assert!(matches!(err, Error::Authentication(_)));
        assert_eq!(client.session().header("Authorization"), None);
    }

    #[test]
    fn test_feed_urls() {
        let transport = ScriptedTransport::new()
            .respond(200, "<feed/>")
            .respond(200, "<feed/>")
            .respond(200, "<feed/>");
        let client = client(&transport);

        client.spreadsheets_feed().unwrap();
        client.worksheets_feed("KEY").unwrap();
        client.cells_feed("KEY", "od6").unwrap();

        let urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            vec![
                "https://feeds.test/feeds/spreadsheets/private/full",
                "https://feeds.test/feeds/worksheets/KEY/private/full",
                "https://feeds.test/feeds/cells/KEY/od6/private/full",
            ]
        );
    }

    #[test]
    fn test_cell_entry_rejects_zero_position() {
        let transport = ScriptedTransport::new();
        let client = client(&transport);
        assert!(client.cell_entry("KEY", "od6", 0, 1).is_err());
        assert!(transport.requests().is_empty());
    }
}
