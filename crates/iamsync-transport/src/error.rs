//! Error types for iamsync-transport

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Non-success HTTP status
    #[error("Status code: {status}, Error: {reason}")]
    Status { status: u16, reason: String },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Response is missing the {header} header")]
    MissingHeader { header: String },

    #[error("Invalid Content-Disposition header '{header}': {reason}")]
    ContentDisposition { header: String, reason: String },

    #[error("Invalid transport configuration: {message}")]
    Config { message: String },
}

impl Error {
    /// Build a status error with the registered reason for `status`.
    pub fn status(status: u16) -> Self {
        Self::Status {
            status,
            reason: crate::status::status_reason(status).to_string(),
        }
    }
}
