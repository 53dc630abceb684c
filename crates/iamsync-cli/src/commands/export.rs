//! Export command implementation

use std::path::Path;

use colored::Colorize;

use iamsync_core::{Reconciler, RunSummary};
use iamsync_fs::NormalizedPath;
use iamsync_meta::{ContentFormat, IamsyncConfig};
use iamsync_transport::HttpTransport;

use crate::commands::summary::{ensure_clean, print_report};
use crate::context::require_server;
use crate::error::Result;

/// Choose the export format.
///
/// A name given on the command line is read leniently (unknown names fall
/// back to YAML); otherwise the configured format applies.
pub fn resolve_format(requested: Option<&str>, config: &IamsyncConfig) -> ContentFormat {
    match requested {
        Some(name) => {
            let format = ContentFormat::from_name(name);
            if !name.trim().eq_ignore_ascii_case(format.extension())
                && !name.trim().eq_ignore_ascii_case("yml")
            {
                tracing::warn!("Unknown format '{}', exporting as {}", name, format);
            }
            format
        }
        None => config.tool.format,
    }
}

/// Run the export command
pub fn run_export(
    config: &IamsyncConfig,
    dir: &Path,
    format: Option<&str>,
    json: bool,
) -> Result<()> {
    require_server(config)?;
    let format = resolve_format(format, config);
    let root = NormalizedPath::new(dir);

    if !json {
        println!(
            "{} Exporting from {} into {} as {}...",
            "=>".blue().bold(),
            config.server.url.cyan(),
            root.as_str().cyan(),
            format
        );
    }

    let transport = HttpTransport::new(&config.server)?;
    let summary = RunSummary::new();
    Reconciler::new(config, &summary).export_all(&transport, &root, format);

    let report = summary.report();
    print_report(&report, json)?;
    ensure_clean(&report)
}
