//! Client for the JSON spreadsheets API

use serde::de::DeserializeOwned;
use serde_json::json;
use sheetwire_core::address::{extract_id_from_url, quoted_range, rowcol_to_a1};
use sheetwire_core::cell::Cell;
use sheetwire_core::error::{Error, Result};
use sheetwire_core::grid::fill_gaps;
use sheetwire_core::service::{SheetsService, SpreadsheetSummary, WorksheetSummary};
use sheetwire_core::Resolution;
use sheetwire_http::{ClientConfig, Request, Response, Session, Transport};

use crate::credentials::{bearer_token, Credentials};
use crate::models::{
    AppendValuesResponse, BatchUpdateResponse, ClearValuesResponse, DriveFile, FileList,
    SpreadsheetMetadata, UpdateValuesResponse, ValueInputOption, ValueRange,
};
use crate::spreadsheet::Spreadsheet;
use crate::urls;

/// Drive files per listing page
const PAGE_SIZE: &str = "1000";

/// Client for the current JSON protocol.
///
/// Requests carry `Authorization: Bearer <token>` once [`login`](Self::login)
/// has run. Spreadsheets and worksheets borrow the client.
pub struct Client {
    session: Session,
    config: ClientConfig,
    credentials: Box<dyn Credentials>,
}

impl Client {
    /// Create a client that talks HTTP through reqwest
    pub fn new<C: Credentials + 'static>(credentials: C, config: ClientConfig) -> Result<Self> {
        let session = Session::from_config(&config)?;
        Ok(Self {
            session,
            config,
            credentials: Box::new(credentials),
        })
    }

    /// Create a client over an arbitrary transport
    pub fn with_transport<C, T>(credentials: C, config: ClientConfig, transport: T) -> Self
    where
        C: Credentials + 'static,
        T: Transport + 'static,
    {
        Self {
            session: Session::new(transport),
            config,
            credentials: Box::new(credentials),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Install the bearer token, refreshing the credentials if they need it.
    pub fn login(&mut self) -> Result<()> {
        let token = bearer_token(self.credentials.as_mut())?;
        self.session.set_header("Authorization", format!("Bearer {token}"));
        tracing::info!("Authorized JSON API client");
        Ok(())
    }

    /// Send a request; non-2xx responses become [`Error::Api`]
    pub fn request(&self, request: Request) -> Result<Response> {
        self.session.send_checked(request)
    }

    fn request_json<T: DeserializeOwned>(&self, request: Request) -> Result<T> {
        self.request(request)?.json()
    }

    /// Every native spreadsheet in Drive, following pagination
    pub fn list_spreadsheet_files(&self) -> Result<Vec<DriveFile>> {
        let url = urls::drive_files(&self.config)?;
        let query = format!("mimeType='{}'", urls::SPREADSHEET_MIME_TYPE);

        let mut files = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut request = Request::get(&url)
                .query("q", &query)
                .query("pageSize", PAGE_SIZE)
                .query("fields", "nextPageToken,files(id,name,mimeType,modifiedTime)");
            if let Some(token) = &page_token {
                request = request.query("pageToken", token);
            }

            let page: FileList = self.request_json(request)?;
            files.extend(page.files);
            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        tracing::debug!("Listed {} spreadsheet files", files.len());
        Ok(files)
    }

    /// Open the first spreadsheet with exactly this title
    pub fn open(&self, title: &str) -> Result<Spreadsheet<'_>> {
        let file = self
            .list_spreadsheet_files()?
            .into_iter()
            .find(|f| self.title_matches(&f.name, title))
            .ok_or_else(|| Error::SpreadsheetNotFound(title.to_string()))?;
        tracing::info!("Opened spreadsheet {} ({})", file.name, file.id);
        Ok(Spreadsheet::new(self, file.id, Resolution::resolved(file.name)))
    }

    /// Open every spreadsheet, optionally only those titled `title`
    pub fn open_all(&self, title: Option<&str>) -> Result<Vec<Spreadsheet<'_>>> {
        Ok(self
            .list_spreadsheet_files()?
            .into_iter()
            .filter(|f| title.map_or(true, |t| self.title_matches(&f.name, t)))
            .map(|f| Spreadsheet::new(self, f.id, Resolution::resolved(f.name)))
            .collect())
    }

    /// Open a spreadsheet by id without contacting the service
    pub fn open_by_key(&self, key: impl Into<String>) -> Spreadsheet<'_> {
        Spreadsheet::new(self, key.into(), Resolution::unresolved())
    }

    /// Open a spreadsheet by its browser URL
    pub fn open_by_url(&self, url: &str) -> Result<Spreadsheet<'_>> {
        Ok(self.open_by_key(extract_id_from_url(url)?))
    }

    /// Create an empty spreadsheet
    pub fn create(&self, title: &str) -> Result<Spreadsheet<'_>> {
        let request = Request::post(urls::drive_files(&self.config)?).json(json!({
            "name": title,
            "mimeType": urls::SPREADSHEET_MIME_TYPE,
        }));
        let file: DriveFile = self.request_json(request)?;
        tracing::info!("Created spreadsheet {} ({})", title, file.id);
        Ok(Spreadsheet::new(self, file.id, Resolution::resolved(title.to_string())))
    }

    /// Copy a spreadsheet, optionally giving the copy a new title
    pub fn copy(&self, file_id: &str, title: Option<&str>) -> Result<Spreadsheet<'_>> {
        let mut body = json!({ "mimeType": urls::SPREADSHEET_MIME_TYPE });
        if let Some(title) = title {
            body["name"] = json!(title);
        }
        let request = Request::post(urls::drive_copy(&self.config, file_id)?).json(body);
        let file: DriveFile = self.request_json(request)?;
        let name = Some(file.name).filter(|n| !n.is_empty());
        Ok(Spreadsheet::new(self, file.id, Resolution::from(name)))
    }

    /// Delete a spreadsheet file
    pub fn del_spreadsheet(&self, file_id: &str) -> Result<()> {
        self.request(Request::delete(urls::drive_file(&self.config, file_id)?))?;
        tracing::info!("Deleted spreadsheet {}", file_id);
        Ok(())
    }

    /// Replace the contents of a spreadsheet's first sheet with CSV text.
    pub fn import_csv(&self, file_id: &str, data: impl Into<String>) -> Result<()> {
        let request = Request::put(urls::upload(&self.config, file_id)?)
            .query("uploadType", "media")
            .query("convert", "true")
            .text("text/csv", data);
        self.request(request)?;
        Ok(())
    }

    /// Serialize rows as CSV and import them with [`import_csv`](Self::import_csv)
    pub fn import_rows<R, S>(&self, file_id: &str, rows: impl IntoIterator<Item = R>) -> Result<()>
    where
        R: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        self.import_csv(file_id, to_csv(rows)?)
    }

    /// Spreadsheet properties and sheet list, without cell data
    pub fn fetch_sheet_metadata(&self, id: &str) -> Result<SpreadsheetMetadata> {
        let request = Request::get(urls::spreadsheet(&self.config, id)?).query("includeGridData", "false");
        self.request_json(request)
    }

    /// Apply structural requests (`{"requests": [...]}`)
    pub fn batch_update(&self, id: &str, body: serde_json::Value) -> Result<BatchUpdateResponse> {
        let request = Request::post(urls::batch_update(&self.config, id)?).json(body);
        self.request_json(request)
    }

    pub fn values_get(&self, id: &str, range: &str, params: &[(&str, &str)]) -> Result<ValueRange> {
        let request = with_params(Request::get(urls::values(&self.config, id, range, None)?), params);
        self.request_json(request)
    }

    pub fn values_update(
        &self,
        id: &str,
        range: &str,
        params: &[(&str, &str)],
        body: serde_json::Value,
    ) -> Result<UpdateValuesResponse> {
        let request = with_params(Request::put(urls::values(&self.config, id, range, None)?), params).json(body);
        self.request_json(request)
    }

    pub fn values_append(
        &self,
        id: &str,
        range: &str,
        params: &[(&str, &str)],
        body: serde_json::Value,
    ) -> Result<AppendValuesResponse> {
        let url = urls::values(&self.config, id, range, Some("append"))?;
        self.request_json(with_params(Request::post(url), params).json(body))
    }

    pub fn values_clear(&self, id: &str, range: &str) -> Result<ClearValuesResponse> {
        let url = urls::values(&self.config, id, range, Some("clear"))?;
        self.request_json(Request::post(url).json(json!({})))
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("session", &self.session)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn with_params(mut request: Request, params: &[(&str, &str)]) -> Request {
    for (name, value) in params {
        request = request.query(*name, *value);
    }
    request
}

fn to_csv<R, S>(rows: impl IntoIterator<Item = R>) -> Result<String>
where
    R: IntoIterator<Item = S>,
    S: AsRef<[u8]>,
{
    let csv_error = |e: csv::Error| Error::InvalidInput(format!("cannot encode CSV: {e}"));

    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(Vec::new());
    for row in rows {
        writer.write_record(row).map_err(csv_error)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| Error::InvalidInput(format!("cannot encode CSV: {}", e.error())))?;
    String::from_utf8(bytes).map_err(|e| Error::InvalidInput(format!("CSV is not UTF-8: {e}")))
}

impl SheetsService for Client {
    // Drive returns file names exactly as stored
    fn title_matches(&self, listed: &str, wanted: &str) -> bool {
        listed == wanted
    }

    fn list_spreadsheets(&self) -> Result<Vec<SpreadsheetSummary>> {
        Ok(self
            .list_spreadsheet_files()?
            .into_iter()
            .map(|f| SpreadsheetSummary {
                id: f.id,
                title: f.name,
            })
            .collect())
    }

    fn list_worksheets(&self, spreadsheet_id: &str) -> Result<Vec<WorksheetSummary>> {
        Ok(self
            .fetch_sheet_metadata(spreadsheet_id)?
            .sheets
            .into_iter()
            .map(|s| WorksheetSummary {
                id: s.properties.sheet_id.to_string(),
                title: s.properties.title,
                row_count: s.properties.grid_properties.row_count,
                col_count: s.properties.grid_properties.column_count,
            })
            .collect())
    }

    fn read_cells(&self, spreadsheet_id: &str, worksheet: &WorksheetSummary) -> Result<Vec<Cell>> {
        let range = self.values_get(spreadsheet_id, &quoted_range(&worksheet.title, ""), &[])?;
        let grid = fill_gaps(range.text_rows(), None, None, String::new());

        let mut cells = Vec::new();
        for (r, row) in grid.into_iter().enumerate() {
            for (c, value) in row.into_iter().enumerate() {
                if !value.is_empty() {
                    cells.push(Cell::new(r as u32 + 1, c as u32 + 1, value));
                }
            }
        }
        Ok(cells)
    }

    fn write_cell(
        &self,
        spreadsheet_id: &str,
        worksheet: &WorksheetSummary,
        row: u32,
        col: u32,
        value: &str,
    ) -> Result<()> {
        let range = quoted_range(&worksheet.title, &rowcol_to_a1(row, col)?);
        self.values_update(
            spreadsheet_id,
            &range,
            &[("valueInputOption", ValueInputOption::UserEntered.as_str())],
            json!({ "values": [[value]] }),
        )?;
        Ok(())
    }
}
