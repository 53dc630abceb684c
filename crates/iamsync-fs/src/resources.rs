//! Discovery of local resource files
//!
//! Each resource type owns one directory; every regular, non-hidden file in
//! it is one resource.

use std::fs;

use crate::path::strip_extension;
use crate::{Error, NormalizedPath, Result};

/// A resource file found in a resource type directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalResourceFile {
    /// Full path of the file
    pub path: NormalizedPath,
    /// File name including extension
    pub file_name: String,
    /// File name with the final extension stripped
    pub stem: String,
}

impl LocalResourceFile {
    pub fn new(dir: &NormalizedPath, file_name: &str) -> Self {
        Self {
            path: dir.join(file_name),
            file_name: file_name.to_string(),
            stem: strip_extension(file_name).to_string(),
        }
    }
}

/// List the resource files of a directory, sorted by file name.
///
/// Hidden entries (leading `.`) and subdirectories are skipped; hidden
/// entries include the temporaries left by an interrupted atomic write.
pub fn list_resource_files(dir: &NormalizedPath) -> Result<Vec<LocalResourceFile>> {
    let native_dir = dir.to_native();
    let entries = fs::read_dir(&native_dir).map_err(|e| Error::io(&native_dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(&native_dir, e))?;
        let file_type = entry.file_type().map_err(|e| Error::io(entry.path(), e))?;
        if !file_type.is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().into_owned();
        if file_name.starts_with('.') {
            tracing::debug!(file = %file_name, "Skipping hidden file");
            continue;
        }
        files.push(LocalResourceFile::new(dir, &file_name));
    }

    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(files)
}
