//! Check-version command implementation
//!
//! Reports, per resource type, whether the configured server version is
//! new enough. Makes no network calls.

use colored::Colorize;

use iamsync_core::{is_resource_type_supported, parse_version};
use iamsync_meta::{IamsyncConfig, ResourceType};

use crate::error::Result;

/// Support status of one resource type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSupport {
    pub resource_type: ResourceType,
    pub min_version: Option<String>,
    pub supported: bool,
}

/// Evaluate every resource type against `version`.
pub fn evaluate(version: Option<&str>) -> Vec<TypeSupport> {
    ResourceType::ALL
        .iter()
        .map(|rt| TypeSupport {
            resource_type: *rt,
            min_version: rt.min_version().map(|v| v.to_string()),
            supported: is_resource_type_supported(*rt, version),
        })
        .collect()
}

/// Run the check-version command
pub fn run_check_version(config: &IamsyncConfig) -> Result<()> {
    let version = config.server.configured_version();

    match version {
        None => println!(
            "{} No server version configured; every resource type is enabled.",
            "=>".blue().bold()
        ),
        Some(v) => match parse_version(v) {
            Ok(parsed) => println!("{} Server version {}", "=>".blue().bold(), parsed.to_string().cyan()),
            Err(e) => println!(
                "{} Server version '{}' is invalid ({}); every resource type is enabled.",
                "WARN".yellow().bold(),
                v,
                e
            ),
        },
    }

    for entry in evaluate(version) {
        let status = if entry.supported {
            "supported".green()
        } else {
            "unsupported".red()
        };
        let requirement = match &entry.min_version {
            Some(min) => format!("requires {min}"),
            None => "no minimum".to_string(),
        };
        println!(
            "   {} {:<18} {} ({})",
            "-".blue(),
            entry.resource_type.to_string(),
            status,
            requirement.dimmed()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supported(version: Option<&str>, rt: ResourceType) -> bool {
        evaluate(version)
            .into_iter()
            .find(|e| e.resource_type == rt)
            .map(|e| e.supported)
            .unwrap()
    }

    #[test]
    fn test_old_server_only_supports_unversioned_types() {
        assert!(!supported(Some("5.8.0"), ResourceType::Applications));
        assert!(!supported(Some("5.8.0"), ResourceType::UserStores));
        assert!(supported(Some("5.8.0"), ResourceType::OidcScopes));
    }

    #[test]
    fn test_no_version_supports_everything() {
        assert!(evaluate(None).iter().all(|e| e.supported));
    }

    #[test]
    fn test_min_versions_are_reported() {
        let entries = evaluate(Some("7.0.0"));
        assert_eq!(entries[0].min_version.as_deref(), Some("5.9.0"));
        assert_eq!(entries[4].min_version, None);
    }
}
