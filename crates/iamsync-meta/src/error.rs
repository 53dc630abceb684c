//! Errors raised while loading the tool configuration

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fs(#[from] iamsync_fs::Error),

    #[error("No configuration file at {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Configuration {path} rejected: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    /// A config key or CLI value that names no known resource type
    #[error("'{name}' is not a resource type")]
    UnknownResourceType { name: String },

    #[error("'{name}' is not an export format (expected yaml, json or xml)")]
    UnknownFormat { name: String },
}
