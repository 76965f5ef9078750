//! Endpoint construction

use sheetwire_core::error::Result;
use sheetwire_http::{join_url, ClientConfig};

/// MIME type Drive uses for native spreadsheets
pub const SPREADSHEET_MIME_TYPE: &str = "application/vnd.google-apps.spreadsheet";

/// Browser URL of a spreadsheet
pub fn spreadsheet_link(id: &str) -> String {
    format!("https://docs.google.com/spreadsheets/d/{id}")
}

pub fn spreadsheet(config: &ClientConfig, id: &str) -> Result<String> {
    join_url(&config.sheets_url, &[id])
}

pub fn batch_update(config: &ClientConfig, id: &str) -> Result<String> {
    join_url(&config.sheets_url, &[&format!("{id}:batchUpdate")])
}

/// `values/{range}`, optionally followed by `:append` or `:clear`
pub fn values(config: &ClientConfig, id: &str, range: &str, action: Option<&str>) -> Result<String> {
    let last = match action {
        Some(action) => format!("{range}:{action}"),
        None => range.to_string(),
    };
    join_url(&config.sheets_url, &[id, "values", &last])
}

pub fn drive_files(config: &ClientConfig) -> Result<String> {
    join_url(&config.drive_url, &["files"])
}

pub fn drive_file(config: &ClientConfig, id: &str) -> Result<String> {
    join_url(&config.drive_url, &["files", id])
}

pub fn drive_copy(config: &ClientConfig, id: &str) -> Result<String> {
    join_url(&config.drive_url, &["files", id, "copy"])
}

pub fn upload(config: &ClientConfig, id: &str) -> Result<String> {
    join_url(&config.upload_url, &["files", id])
}
