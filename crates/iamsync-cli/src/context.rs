//! Run configuration assembly
//!
//! Loads the configuration file and applies command-line and environment
//! overrides on top of it.

use std::path::Path;

use iamsync_fs::NormalizedPath;
use iamsync_meta::{IamsyncConfig, load_config};

use crate::cli::ServerOverrides;
use crate::error::{CliError, Result};

/// Load the configuration file at `path` and apply `overrides`.
pub fn load(path: &Path, overrides: &ServerOverrides) -> Result<IamsyncConfig> {
    let mut config = load_config(&NormalizedPath::new(path))?;
    apply_overrides(&mut config, overrides);
    Ok(config)
}

/// Overlay server settings given on the command line.
pub fn apply_overrides(config: &mut IamsyncConfig, overrides: &ServerOverrides) {
    let server = &mut config.server;
    if let Some(url) = &overrides.server_url {
        server.url = url.clone();
    }
    if let Some(token) = &overrides.token {
        server.token = Some(token.clone());
    }
    if let Some(password) = &overrides.password {
        server.password = Some(password.clone());
    }
    if let Some(version) = &overrides.server_version {
        server.version = Some(version.clone());
    }
}

/// Fail unless a server URL is configured.
pub fn require_server(config: &IamsyncConfig) -> Result<()> {
    if config.server.url.trim().is_empty() {
        return Err(CliError::user(
            "No server URL configured. Set server.url or pass --server-url.",
        ));
    }
    Ok(())
}
