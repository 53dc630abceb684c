//! Error types for iamsync-core

use iamsync_meta::ResourceType;

/// Result type for iamsync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reconciling a single resource
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Resource content could not be interpreted
    #[error("Invalid content: {message}")]
    InvalidContent { message: String },

    /// Resource content lacks the field that names the resource
    #[error("Missing identity field '{field}'")]
    MissingIdentity { field: String },

    /// Server list response did not have the expected shape
    #[error("Failed to parse the {resource_type} list: {message}")]
    ListParse {
        resource_type: ResourceType,
        message: String,
    },

    /// Several local files name the same resource
    #[error("Local files {files:?} all resolve to resource '{name}'")]
    DuplicateIdentity { name: String, files: Vec<String> },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from iamsync-fs
    #[error(transparent)]
    Fs(#[from] iamsync_fs::Error),

    /// Transport error from iamsync-transport
    #[error(transparent)]
    Transport(#[from] iamsync_transport::Error),
}
