//! Content formats resources are exported and imported in

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Serialization format of a resource body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    #[default]
    Yaml,
    Json,
    Xml,
}

impl ContentFormat {
    /// Lenient selection: `json` and `xml` pick those formats, anything
    /// else falls back to YAML.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    /// Media type sent in the `Accept` header of an export request.
    pub fn media_type(&self) -> &'static str {
        match self {
            ContentFormat::Yaml => "application/yaml",
            ContentFormat::Json => "application/json",
            ContentFormat::Xml => "application/xml",
        }
    }

    /// Canonical file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            ContentFormat::Yaml => "yaml",
            ContentFormat::Json => "json",
            ContentFormat::Xml => "xml",
        }
    }

    /// Detect the format of a local file from its extension.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "yaml" | "yml" => Some(ContentFormat::Yaml),
            "json" => Some(ContentFormat::Json),
            "xml" => Some(ContentFormat::Xml),
            _ => None,
        }
    }
}

impl FromStr for ContentFormat {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yaml" | "yml" => Ok(ContentFormat::Yaml),
            "json" => Ok(ContentFormat::Json),
            "xml" => Ok(ContentFormat::Xml),
            _ => Err(Error::UnknownFormat {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ContentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
