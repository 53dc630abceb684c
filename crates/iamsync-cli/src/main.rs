//! iamsync CLI
//!
//! Exports identity server configuration to files and imports it back,
//! so one environment's setup can be reviewed, versioned and replayed on
//! another.

mod cli;
mod commands;
mod context;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    let Err(e) = run() else { return };
    eprintln!("{} {e}", "error:".red().bold());
    std::process::exit(1);
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = context::load(&cli.config, &cli.server)?;
    tracing::debug!(config = %cli.config.display(), "Configuration loaded");

    match cli.command {
        Commands::Export { dir, format, json } => {
            commands::run_export(&config, &dir, format.as_deref(), json)
        }
        Commands::Import { dir, json } => commands::run_import(&config, &dir, json),
        Commands::CheckVersion => commands::run_check_version(&config),
    }
}
