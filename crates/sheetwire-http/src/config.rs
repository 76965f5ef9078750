//! Client configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};
use sheetwire_core::error::{Error, Result};

/// Default ClientLogin endpoint for the legacy protocol.
pub const DEFAULT_AUTH_URL: &str = "https://www.google.com/accounts/ClientLogin";
/// Default base of the legacy Atom feeds.
pub const DEFAULT_FEEDS_URL: &str = "https://spreadsheets.google.com/feeds";
/// Default base of the JSON spreadsheets API.
pub const DEFAULT_SHEETS_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";
/// Default base of the Drive files API.
pub const DEFAULT_DRIVE_URL: &str = "https://www.googleapis.com/drive/v3";
/// Default base of the Drive media upload API.
pub const DEFAULT_UPLOAD_URL: &str = "https://www.googleapis.com/upload/drive/v2";

/// Endpoints and transport settings shared by both protocol clients.
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```
/// use sheetwire_http::ClientConfig;
///
/// let config = ClientConfig::from_json(r#"{"timeout_ms": 5000}"#).unwrap();
/// assert_eq!(config.timeout(), std::time::Duration::from_secs(5));
/// assert!(config.sheets_url.starts_with("https://"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Legacy login endpoint
    pub auth_url: String,
    /// Legacy feeds base URL
    pub feeds_url: String,
    /// JSON spreadsheets API base URL
    pub sheets_url: String,
    /// Drive files API base URL
    pub drive_url: String,
    /// Drive upload API base URL
    pub upload_url: String,
    /// Per-request timeout in milliseconds. Default: 30000.
    pub timeout_ms: u64,
    /// Application identifier sent with the legacy login
    pub source: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            auth_url: DEFAULT_AUTH_URL.to_string(),
            feeds_url: DEFAULT_FEEDS_URL.to_string(),
            sheets_url: DEFAULT_SHEETS_URL.to_string(),
            drive_url: DEFAULT_DRIVE_URL.to_string(),
            upload_url: DEFAULT_UPLOAD_URL.to_string(),
            timeout_ms: 30_000,
            source: concat!("sheetwire-", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::InvalidInput(format!("invalid client configuration: {e}")))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        // Sub-millisecond durations round up so the timeout never becomes zero
        let millis = (timeout.as_nanos() + 999_999) / 1_000_000;
        self.timeout_ms = u64::try_from(millis).unwrap_or(u64::MAX);
        self
    }

    pub fn with_auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = trim_base(url);
        self
    }

    pub fn with_feeds_url(mut self, url: impl Into<String>) -> Self {
        self.feeds_url = trim_base(url);
        self
    }

    pub fn with_sheets_url(mut self, url: impl Into<String>) -> Self {
        self.sheets_url = trim_base(url);
        self
    }

    pub fn with_drive_url(mut self, url: impl Into<String>) -> Self {
        self.drive_url = trim_base(url);
        self
    }

    pub fn with_upload_url(mut self, url: impl Into<String>) -> Self {
        self.upload_url = trim_base(url);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }
}

fn trim_base(url: impl Into<String>) -> String {
    url.into().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.feeds_url, DEFAULT_FEEDS_URL);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.source.starts_with("sheetwire-"));
    }

    #[test]
    fn test_builders_trim_trailing_slash() {
        let config = ClientConfig::default()
            .with_sheets_url("http://localhost:8080/v4/spreadsheets/")
            .with_timeout(Duration::from_secs(3));
        assert_eq!(config.sheets_url, "http://localhost:8080/v4/spreadsheets");
        assert_eq!(config.timeout_ms, 3000);
    }

    #[test]
    fn test_from_json() {
        let config = ClientConfig::from_json(r#"{"source": "my-app"}"#).unwrap();
        assert_eq!(config.source, "my-app");
        assert_eq!(config.drive_url, DEFAULT_DRIVE_URL);

        assert!(ClientConfig::from_json("{").is_err());
    }

    #[test]
    fn test_sub_second_timeout_is_kept() {
        let config = ClientConfig::default().with_timeout(Duration::from_millis(500));
        assert_eq!(config.timeout(), Duration::from_millis(500));

        let config = ClientConfig::default().with_timeout(Duration::from_nanos(10));
        assert_eq!(config.timeout(), Duration::from_millis(1));
    }
}
