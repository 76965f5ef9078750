//! Error types shared by every sheetwire crate

use std::fmt;

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the address codec, the protocol adapters and the
/// transport underneath them.
#[derive(Debug, Error)]
pub enum Error {
    /// Label does not match `[A-Za-z]+[0-9]+`
    #[error("Invalid cell label: {0}")]
    InvalidLabel(String),

    /// Malformed argument (zero row/column, empty cell list, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// URL carries no recognizable spreadsheet key
    #[error("No valid spreadsheet key found in URL: {0}")]
    NoValidUrlKey(String),

    /// Login rejected or answered with an unexpected status
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Non-2xx response from the resource API
    #[error("API error: {0}")]
    Api(ApiError),

    /// No spreadsheet in the listing matched
    #[error("Spreadsheet not found: {0}")]
    SpreadsheetNotFound(String),

    /// No worksheet matched the title or index
    #[error("Worksheet not found: {0}")]
    WorksheetNotFound(String),

    /// No cell matched the query
    #[error("Cell not found: {0}")]
    CellNotFound(String),

    /// The request never produced a response
    #[error("HTTP transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Response body could not be decoded into the expected shape
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl Error {
    /// Create a decode error with a message
    pub fn decode<S: Into<String>>(msg: S) -> Self {
        Error::Decode(msg.into())
    }

    /// Wrap a transport-level failure
    pub fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Transport(Box::new(err))
    }

    /// The HTTP status carried by an API error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api(e) => Some(e.code),
            _ => None,
        }
    }
}

/// Error payload returned by the service for a non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code
    pub code: u16,
    /// Human readable message from the service (or the raw body)
    pub message: String,
    /// Symbolic status such as `NOT_FOUND`, when the service sends one
    pub status: Option<String>,
}

impl ApiError {
    pub fn new<S: Into<String>>(code: u16, message: S) -> Self {
        Self {
            code,
            message: message.into(),
            status: None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            Some(status) => write!(f, "{} {}: {}", self.code, status, self.message),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

impl From<ApiError> for Error {
    fn from(e: ApiError) -> Self {
        Error::Api(e)
    }
}
