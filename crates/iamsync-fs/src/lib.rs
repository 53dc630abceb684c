//! Filesystem layer for iamsync
//!
//! Provides normalized path handling, atomic writes, format-aware config
//! loading, and discovery of the per-resource-type files that the
//! reconciliation engine works on.

pub mod config;
pub mod error;
pub mod io;
pub mod path;
pub mod resources;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::{NormalizedPath, validate_file_name};
pub use resources::{LocalResourceFile, list_resource_files};
