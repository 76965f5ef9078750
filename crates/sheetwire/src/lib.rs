//! # sheetwire
//!
//! A client library for remote spreadsheets. It maps the service's resources
//! onto local spreadsheets, worksheets and cells over two protocols:
//!
//! - the legacy Atom feed protocol with password login (feature `feed`)
//! - the current JSON API with caller-supplied OAuth tokens (feature `v4`)
//!
//! Both clients implement [`SheetsService`], so code that only lists,
//! reads and writes cells can be written once for either.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sheetwire::prelude::*;
//!
//! # fn example() -> sheetwire::Result<()> {
//! let client = sheetwire::authorize(AccessToken::new("ya29.token"))?;
//!
//! let spreadsheet = client.open("Where is the money Lebowski?")?;
//! let sheet = spreadsheet.sheet1()?;
//!
//! let label = rowcol_to_a1(1, 2)?;
//! println!("{label} = {}", sheet.acell(&label)?.value);
//! sheet.update_acell("B1", "42")?;
//!
//! for row in sheet.get_all_values()? {
//!     println!("{}", row.join(", "));
//! }
//! # Ok(())
//! # }
//! ```

pub mod prelude;

// Re-export core types
pub use sheetwire_core::{
    a1_to_rowcol,
    address,
    grid,
    records,
    rowcol_to_a1,
    value,
    A1Range,
    ApiError,
    Cell,
    CellValue,
    Error,
    NumericiseOptions,
    Record,
    RecordOptions,
    Resolution,
    Result,
    SheetsService,
    SpreadsheetSummary,
    WorksheetSummary,
};

// Re-export transport types
pub use sheetwire_http::{ClientConfig, Request, Response, Session, Transport};

/// Legacy feed protocol
#[cfg(feature = "feed")]
pub mod feed {
    pub use sheetwire_feed::*;
}

/// Current JSON protocol
#[cfg(feature = "v4")]
pub mod v4 {
    pub use sheetwire_v4::*;
}

/// Create a JSON API client with default endpoints and log it in.
#[cfg(feature = "v4")]
pub fn authorize<C>(credentials: C) -> Result<sheetwire_v4::Client>
where
    C: sheetwire_v4::Credentials + 'static,
{
    authorize_with(credentials, ClientConfig::default())
}

/// Create a JSON API client with the given configuration and log it in.
#[cfg(feature = "v4")]
pub fn authorize_with<C>(credentials: C, config: ClientConfig) -> Result<sheetwire_v4::Client>
where
    C: sheetwire_v4::Credentials + 'static,
{
    let mut client = sheetwire_v4::Client::new(credentials, config)?;
    client.login()?;
    Ok(client)
}

/// Create a legacy feed client with default endpoints and log in with a
/// password.
#[cfg(feature = "feed")]
pub fn login(email: &str, password: &str) -> Result<sheetwire_feed::FeedClient> {
    login_with(email, password, ClientConfig::default())
}

/// Create a legacy feed client with the given configuration and log in.
#[cfg(feature = "feed")]
pub fn login_with(
    email: &str,
    password: &str,
    config: ClientConfig,
) -> Result<sheetwire_feed::FeedClient> {
    let mut client = sheetwire_feed::FeedClient::new(config)?;
    client.login(&sheetwire_feed::Credentials::new(email, password))?;
    Ok(client)
}
