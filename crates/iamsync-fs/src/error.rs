//! Filesystem errors

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid {format}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    /// Config files are read as TOML, JSON or YAML only
    #[error("Cannot read configuration with extension '{extension}'")]
    UnsupportedFormat { extension: String },

    /// A server-supplied name that cannot be used inside a resource folder
    #[error("Refusing file name '{name}': {reason}")]
    InvalidFileName { name: String, reason: String },

    #[error("Could not lock {path} for writing")]
    LockFailed { path: PathBuf },
}

impl Error {
    /// Attach the path an I/O call was made on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
