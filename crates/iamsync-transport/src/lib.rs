//! Transport layer for iamsync
//!
//! The reconciliation engine talks to the identity server only through the
//! [`Transport`] trait. [`HttpTransport`] is the production implementation
//! over the server's REST management APIs.

pub mod content_disposition;
pub mod error;
pub mod http;
pub mod status;
pub mod transport;

pub use content_disposition::file_name_from_content_disposition;
pub use error::{Error, Result};
pub use http::HttpTransport;
pub use status::status_reason;
pub use transport::{ExportedFile, Transport, UNBOUNDED};
