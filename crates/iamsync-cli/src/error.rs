//! Errors surfaced by the `iamsync` binary

pub type Result<T> = std::result::Result<T, CliError>;

/// Anything that stops a command before or after its reconciliation pass.
///
/// Per-resource failures are not errors here; they end up in the run
/// summary and only turn into [`CliError::User`] once it is reported.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] iamsync_core::Error),

    #[error(transparent)]
    Meta(#[from] iamsync_meta::Error),

    #[error(transparent)]
    Transport(#[from] iamsync_transport::Error),

    #[error(transparent)]
    Fs(#[from] iamsync_fs::Error),

    /// Rendering `--json` output
    #[error("could not render summary: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{message}")]
    User { message: String },
}

impl CliError {
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
