//! Blocking HTTP plumbing for the sheetwire spreadsheet client.
//!
//! # Architecture
//!
//! - **Request/Response** (`request.rs`): plain values describing one exchange
//! - **Transport** (`transport.rs`): sends a request; reqwest in production
//! - **Session** (`session.rs`): a transport plus headers kept across calls
//!   (the authorization header lives here after login)
//! - **Config** (`config.rs`): endpoints and timeout
//!
//! Every call is one synchronous round trip. Nothing is retried.
//!
//! # Example
//!
//! ```rust,no_run
//! use sheetwire_http::{ClientConfig, Request, Session};
//!
//! # fn example() -> sheetwire_core::Result<()> {
//! let mut session = Session::from_config(&ClientConfig::default())?;
//! session.set_header("Authorization", "Bearer <token>");
//! let response = session.send_checked(Request::get("https://sheets.googleapis.com/v4/spreadsheets/<id>"))?;
//! println!("{}", response.body);
//! # Ok(())
//! # }
//! ```

pub mod config;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod request;
pub mod session;
pub mod transport;

pub use config::ClientConfig;
pub use request::{Body, Method, Request, Response};
pub use session::Session;
pub use transport::{join_url, ReqwestTransport, Transport};
