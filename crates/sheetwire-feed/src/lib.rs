//! # sheetwire-feed
//!
//! Client for the legacy spreadsheet protocol: ClientLogin password
//! authentication and Atom/XML feeds of spreadsheets, worksheets and cells.
//!
//! - [`atom`] decodes feeds into [`SpreadsheetEntry`], [`WorksheetEntry`] and
//!   [`CellEntry`] records
//! - [`FeedClient`] holds the session and issues feed requests
//! - [`FeedSpreadsheet`] / [`FeedWorksheet`] are views borrowing the client
//!
//! ## Example
//!
//! ```rust,no_run
//! use sheetwire_feed::{Credentials, FeedClient};
//! use sheetwire_http::ClientConfig;
//!
//! # fn example() -> sheetwire_core::Result<()> {
//! let mut client = FeedClient::new(ClientConfig::default())?;
//! client.login(&Credentials::new("me@example.com", "password"))?;
//!
//! let mut spreadsheet = client.open("Budget")?;
//! let sheet = spreadsheet.sheet1()?;
//! for row in sheet.get_all_values()? {
//!     println!("{}", row.join("\t"));
//! }
//! sheet.update_acell("B2", "42")?;
//! # Ok(())
//! # }
//! ```

pub mod atom;
pub mod auth;
pub mod client;
pub mod spreadsheet;
pub mod worksheet;

pub use atom::{CellEntry, SpreadsheetEntry, WorksheetEntry};
pub use auth::Credentials;
pub use client::FeedClient;
pub use spreadsheet::FeedSpreadsheet;
pub use worksheet::FeedWorksheet;
