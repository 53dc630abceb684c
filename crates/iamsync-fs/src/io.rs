//! Reading and writing resource files
//!
//! Exported resources replace their previous copy in one rename, so an
//! interrupted export never leaves a half-written document behind for the
//! next import to pick up.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Hidden sibling that receives the bytes before the rename.
///
/// The leading dot keeps it out of [`crate::list_resource_files`].
fn staging_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{name}.{}.partial", std::process::id()))
}

fn fill(staging: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(staging).map_err(|e| Error::io(staging, e))?;
    file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: staging.to_path_buf(),
    })?;
    file.write_all(content).map_err(|e| Error::io(staging, e))?;
    file.sync_all().map_err(|e| Error::io(staging, e))?;
    FileExt::unlock(&file).map_err(|_| Error::LockFailed {
        path: staging.to_path_buf(),
    })
}

/// Replace `path` with `content`, creating missing parent folders.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let target = path.to_native();
    if let Some(folder) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(folder).map_err(|e| Error::io(folder, e))?;
    }

    let staging = staging_path(&target);
    let outcome = fill(&staging, content).and_then(|()| {
        fs::rename(&staging, &target).map_err(|e| Error::io(&target, e))
    });
    if outcome.is_err() && staging.exists() {
        if let Err(e) = fs::remove_file(&staging) {
            tracing::warn!(file = %staging.display(), error = %e, "Could not clean up staging file");
        }
    }
    outcome
}

/// Read a resource document; non-UTF-8 content is an error.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native = path.to_native();
    fs::read_to_string(&native).map_err(|e| Error::io(native, e))
}

/// Make sure a resource type folder exists. `Ok(true)` means it was created.
pub fn ensure_dir(path: &NormalizedPath) -> Result<bool> {
    if path.is_dir() {
        return Ok(false);
    }
    let native = path.to_native();
    fs::create_dir_all(&native).map_err(|e| Error::io(native, e))?;
    Ok(true)
}

/// Delete a local resource file that no longer has a deployed counterpart.
pub fn remove_file(path: &NormalizedPath) -> Result<()> {
    let native = path.to_native();
    fs::remove_file(&native).map_err(|e| Error::io(native, e))
}
