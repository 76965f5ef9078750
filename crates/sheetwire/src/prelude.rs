//! Prelude module - common imports for sheetwire users
//!
//! ```rust
//! use sheetwire::prelude::*;
//! ```

pub use crate::{
    a1_to_rowcol,
    rowcol_to_a1,
    A1Range,
    Cell,
    CellValue,
    ClientConfig,
    Error,
    NumericiseOptions,
    Record,
    RecordOptions,
    Result,
    SheetsService,
};

#[cfg(feature = "feed")]
pub use sheetwire_feed::{FeedClient, FeedSpreadsheet, FeedWorksheet};

#[cfg(feature = "v4")]
pub use sheetwire_v4::{
    AccessToken, CellQuery, Client, Credentials, Spreadsheet, ValueInputOption,
    ValueRenderOption, Worksheet,
};
