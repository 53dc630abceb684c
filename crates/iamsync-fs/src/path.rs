//! Export tree paths
//!
//! Paths are kept with `/` separators so that log lines and summaries read
//! the same on every platform; [`NormalizedPath::to_native`] is called only
//! where the filesystem is touched.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// A location inside (or the root of) an export tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath(String);

impl NormalizedPath {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self(slashed(&path.as_ref().to_string_lossy()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.0)
    }

    /// Append a resource type folder or a resource file name.
    pub fn join(&self, segment: &str) -> Self {
        let base = self.0.trim_end_matches('/');
        Self(format!("{base}/{}", slashed(segment)))
    }

    /// Last component, ignoring a trailing separator.
    pub fn file_name(&self) -> Option<&str> {
        self.0
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
    }

    /// Extension of the last component. Dotfiles have none.
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name()?;
        let stem = strip_extension(name);
        (stem.len() < name.len()).then(|| &name[stem.len() + 1..])
    }

    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }
}

fn slashed(raw: &str) -> String {
    raw.replace('\\', "/")
}

/// Drop the last `.ext` from a file name; `a.b.yaml` becomes `a.b`.
///
/// A leading dot does not start an extension.
pub fn strip_extension(name: &str) -> &str {
    name.rfind('.')
        .filter(|&dot| dot > 0)
        .map_or(name, |dot| &name[..dot])
}

/// Check that a name handed back by the server can be used as a file name
/// inside a resource type folder.
pub fn validate_file_name(name: &str) -> Result<()> {
    let problem = if name.trim().is_empty() {
        Some("empty")
    } else if name.contains(['/', '\\']) {
        Some("contains a path separator")
    } else if matches!(name, "." | "..") {
        Some("refers to a directory")
    } else if name.contains('\0') {
        Some("contains a NUL byte")
    } else {
        None
    };

    match problem {
        Some(reason) => Err(Error::InvalidFileName {
            name: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
