//! # sheetwire-v4
//!
//! Client for the current JSON spreadsheets API, with Drive used for listing,
//! creating, copying, deleting and importing spreadsheet files.
//!
//! Authentication is a caller-supplied [`Credentials`] object; the client
//! sends its token as `Authorization: Bearer <token>`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sheetwire_core::RecordOptions;
//! use sheetwire_http::ClientConfig;
//! use sheetwire_v4::{AccessToken, Client, ValueInputOption};
//!
//! # fn example() -> sheetwire_core::Result<()> {
//! let mut client = Client::new(AccessToken::new("ya29.token"), ClientConfig::default())?;
//! client.login()?;
//!
//! let spreadsheet = client.open("Budget")?;
//! let mut sheet = spreadsheet.sheet1()?;
//! for record in sheet.get_all_records(&RecordOptions::default())? {
//!     println!("{:?}", record.get("amount"));
//! }
//! sheet.append_row(&["2024-01-01", "42"], ValueInputOption::UserEntered)?;
//! sheet.resize(Some(500), None)?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod credentials;
pub mod models;
pub mod spreadsheet;
pub mod urls;
pub mod worksheet;

pub use client::Client;
pub use credentials::{AccessToken, Credentials};
pub use models::{Dimension, ValueInputOption, ValueRenderOption};
pub use spreadsheet::Spreadsheet;
pub use worksheet::{CellQuery, Worksheet};
