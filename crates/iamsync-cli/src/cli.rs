//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// iamsync - Move identity server configuration between environments
#[derive(Parser, Debug)]
#[command(name = "iamsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (TOML, JSON or YAML)
    #[arg(short, long, global = true, env = "IAMSYNC_CONFIG", default_value = "iamsync.toml")]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub server: ServerOverrides,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Server settings that take precedence over the configuration file
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerOverrides {
    /// Server base URL, e.g. https://localhost:9443
    #[arg(long, global = true, env = "IAMSYNC_SERVER_URL")]
    pub server_url: Option<String>,

    /// Bearer token
    #[arg(long, global = true, env = "IAMSYNC_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Password for basic authentication
    #[arg(long, global = true, env = "IAMSYNC_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Server version used to skip unsupported resource types
    #[arg(long, global = true, env = "IAMSYNC_SERVER_VERSION")]
    pub server_version: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Export every resource type into a directory tree
    ///
    /// Each resource becomes one file under <DIR>/<ResourceType>/, with
    /// configured keyword values replaced by {{KEY}} placeholders.
    ///
    /// Examples:
    ///   iamsync export --dir ./dev
    ///   iamsync export --dir ./dev --format json
    Export {
        /// Directory to export into
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Content format (yaml, json or xml); defaults to the configured format
        #[arg(short, long)]
        format: Option<String>,

        /// Output the run summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Import a directory tree into the server
    ///
    /// Placeholders are filled with the configured keyword values. Existing
    /// resources are updated, missing ones created.
    Import {
        /// Directory to import from
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Output the run summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show which resource types the configured server version supports
    CheckVersion,
}
