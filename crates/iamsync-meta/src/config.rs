//! Configuration types and loading for iamsync
//!
//! One file (TOML, JSON or YAML) carries three sections: the server to talk
//! to, tool behaviour (deletion, exclusions), and keyword mappings used to
//! make exported content portable across environments.

use std::collections::BTreeMap;

use iamsync_fs::{ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::format::ContentFormat;
use crate::resource_type::ResourceType;

/// Placeholder key to environment-specific value.
pub type KeywordMap = BTreeMap<String, String>;

/// Connection settings for the identity server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL, e.g. `https://localhost:9443`
    #[serde(default)]
    pub url: String,
    /// Tenant domain
    #[serde(default = "default_tenant")]
    pub tenant: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Bearer token; takes precedence over basic credentials
    #[serde(default)]
    pub token: Option<String>,
    /// Server version used for gating; empty or absent disables gating
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Skip TLS certificate verification
    #[serde(default)]
    pub insecure: bool,
}

fn default_tenant() -> String {
    "carbon.super".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            tenant: default_tenant(),
            username: None,
            password: None,
            token: None,
            version: None,
            timeout_secs: default_timeout_secs(),
            insecure: false,
        }
    }
}

impl ServerConfig {
    /// The configured version, treating blank strings as unset.
    pub fn configured_version(&self) -> Option<&str> {
        self.version
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}

/// Per-resource-type tool settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResourceTypeConfig {
    /// Resource names never exported, imported or deleted
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Tool behaviour.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Delete the side lacking a counterpart (local on export, remote on import)
    #[serde(default)]
    pub allow_delete: bool,
    /// Resource types skipped entirely
    #[serde(default)]
    pub exclude: Vec<ResourceType>,
    /// Default export format
    #[serde(default)]
    pub format: ContentFormat,
    #[serde(default)]
    pub resources: BTreeMap<ResourceType, ResourceTypeConfig>,
}

/// Keyword overrides for one resource type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AdvancedKeywordConfig {
    /// Applies to every resource of the type without its own entry
    #[serde(default)]
    pub default: Option<KeywordMap>,
    /// Keyed by resource name
    #[serde(default)]
    pub overrides: BTreeMap<String, KeywordMap>,
}

/// Keyword mappings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KeywordConfig {
    /// Global mapping applied to all resource types
    #[serde(default)]
    pub mappings: KeywordMap,
    #[serde(default)]
    pub resources: BTreeMap<ResourceType, AdvancedKeywordConfig>,
}

/// Complete iamsync configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IamsyncConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub tool: ToolConfig,
    #[serde(default)]
    pub keywords: KeywordConfig,
}

/// Where a resource type's keyword mappings come from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeywordOverrides<'a> {
    /// No advanced configuration; the global mapping applies as-is
    Global,
    Advanced(&'a AdvancedKeywordConfig),
}

/// Everything the engine needs to know about one resource type.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSettings<'a> {
    pub resource_type: ResourceType,
    /// Whole type skipped
    pub type_excluded: bool,
    pub exclude: &'a [String],
    pub keywords: KeywordOverrides<'a>,
}

impl IamsyncConfig {
    /// Assemble the per-type view of this configuration.
    pub fn settings_for(&self, resource_type: ResourceType) -> ResourceSettings<'_> {
        let exclude = self
            .tool
            .resources
            .get(&resource_type)
            .map(|c| c.exclude.as_slice())
            .unwrap_or(&[]);
        let keywords = match self.keywords.resources.get(&resource_type) {
            Some(advanced) => KeywordOverrides::Advanced(advanced),
            None => KeywordOverrides::Global,
        };

        ResourceSettings {
            resource_type,
            type_excluded: self.tool.exclude.contains(&resource_type),
            exclude,
            keywords,
        }
    }
}

/// Load configuration from a TOML, JSON or YAML file.
pub fn load_config(path: &NormalizedPath) -> Result<IamsyncConfig> {
    if !path.is_file() {
        return Err(Error::ConfigNotFound {
            path: path.to_native(),
        });
    }

    let config: IamsyncConfig = ConfigStore::new().load(path)?;

    let url = config.server.url.trim();
    if !url.is_empty() && !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(Error::InvalidConfig {
            path: path.to_native(),
            message: format!("server.url must start with http:// or https://, got '{url}'"),
        });
    }

    tracing::debug!(path = %path, "Loaded configuration");
    Ok(config)
}
