//! Import command implementation

use std::path::Path;

use colored::Colorize;

use iamsync_core::{Reconciler, RunSummary};
use iamsync_fs::NormalizedPath;
use iamsync_meta::IamsyncConfig;
use iamsync_transport::HttpTransport;

use crate::commands::summary::{ensure_clean, print_report};
use crate::context::require_server;
use crate::error::{CliError, Result};

/// Run the import command
pub fn run_import(config: &IamsyncConfig, dir: &Path, json: bool) -> Result<()> {
    require_server(config)?;
    let root = NormalizedPath::new(dir);
    if !root.is_dir() {
        return Err(CliError::user(format!(
            "Import directory does not exist: {}",
            root
        )));
    }

    if !json {
        println!(
            "{} Importing {} into {}...",
            "=>".blue().bold(),
            root.as_str().cyan(),
            config.server.url.cyan()
        );
        if config.tool.allow_delete {
            println!(
                "   {} allow_delete is set: deployed resources without a local file will be deleted",
                "!".yellow()
            );
        }
    }

    let transport = HttpTransport::new(&config.server)?;
    let summary = RunSummary::new();
    Reconciler::new(config, &summary).import_all(&transport, &root);

    let report = summary.report();
    print_report(&report, json)?;
    ensure_clean(&report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_import_rejects_missing_directory() {
        let temp = TempDir::new().unwrap();
        let mut config = IamsyncConfig::default();
        config.server.url = "https://localhost:9443".into();

        let result = run_import(&config, &temp.path().join("absent"), true);

        let err = result.unwrap_err();
        assert!(err.to_string().contains("Import directory does not exist"));
    }
}
