//! Exclusion and version gates
//!
//! Gates run before any transport call for a resource type or a single
//! resource. A closed gate means no requests, no file writes and no summary
//! entries.

use iamsync_meta::{ResourceSettings, ResourceType};
use tracing::{info, warn};

use crate::version::compare_versions;

/// Whether the configured server version exposes `resource_type`.
///
/// Version gating is disabled when no version is configured, and types
/// without a registered minimum are always supported. A malformed
/// configured version fails open with a warning.
pub fn is_resource_type_supported(
    resource_type: ResourceType,
    configured_version: Option<&str>,
) -> bool {
    let Some(configured) = configured_version.map(str::trim).filter(|v| !v.is_empty()) else {
        return true;
    };
    let Some(min_version) = resource_type.min_version() else {
        return true;
    };

    match compare_versions(configured, &min_version.to_string()) {
        Ok(ordering) => {
            let supported = ordering.is_ge();
            if !supported {
                info!(
                    "Skipping {}: supported from server version {} or higher",
                    resource_type.label(),
                    min_version
                );
            }
            supported
        }
        Err(e) => {
            warn!(
                "Invalid version format. Configured: {}, Required: {} ({})",
                configured, min_version, e
            );
            true
        }
    }
}

/// Whether the whole resource type is excluded by configuration.
pub fn is_resource_type_excluded(settings: &ResourceSettings<'_>) -> bool {
    settings.type_excluded
}

/// Whether a named resource is on its type's exclusion list.
pub fn is_resource_excluded(name: &str, exclude: &[String]) -> bool {
    exclude.iter().any(|excluded| excluded == name)
}
