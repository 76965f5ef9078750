//! # sheetwire-core
//!
//! Protocol-independent pieces of the sheetwire spreadsheet client:
//! - [`address`] - A1 notation <-> (row, col), ranges, legacy id conversion
//! - [`grid`] - padding ragged rows and densifying sparse cells
//! - [`value`] - numeric interpretation of cell strings
//! - [`records`] - header-keyed rows
//! - [`service::SheetsService`] - the capability interface both protocol
//!   adapters implement
//! - [`Error`] - the error taxonomy shared by every crate
//!
//! ## Example
//!
//! ```rust
//! use sheetwire_core::address::{a1_to_rowcol, rowcol_to_a1};
//! use sheetwire_core::grid::fill_gaps;
//!
//! assert_eq!(rowcol_to_a1(1, 27).unwrap(), "AA1");
//! assert_eq!(a1_to_rowcol("AA1").unwrap(), (1, 27));
//!
//! let grid = fill_gaps(vec![vec!["x"], vec!["y", "z"]], None, None, "");
//! assert!(grid.iter().all(|row| row.len() == 2));
//! ```

pub mod address;
pub mod cell;
pub mod error;
pub mod grid;
pub mod records;
pub mod resolution;
pub mod service;
pub mod value;

// Re-exports for convenience
pub use address::{a1_to_rowcol, rowcol_to_a1, A1Range};
pub use cell::Cell;
pub use error::{ApiError, Error, Result};
pub use records::{Record, RecordOptions};
pub use resolution::Resolution;
pub use service::{SheetsService, SpreadsheetSummary, WorksheetSummary};
pub use value::{CellValue, NumericiseOptions};
