//! Configuration files in TOML, JSON or YAML

use serde::de::DeserializeOwned;

use crate::{Error, NormalizedPath, Result, io};

#[derive(Debug, Clone, Copy)]
enum Syntax {
    Toml,
    Json,
    Yaml,
}

impl Syntax {
    fn detect(path: &NormalizedPath) -> Result<Self> {
        let extension = path.extension().unwrap_or_default().to_ascii_lowercase();
        match extension.as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(Error::UnsupportedFormat { extension }),
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }
}

/// Loads a config file, picking the parser from its extension.
#[derive(Debug, Default)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        let syntax = Syntax::detect(path)?;
        let text = io::read_text(path)?;

        let parsed = match syntax {
            Syntax::Toml => toml::from_str(&text).map_err(|e| e.to_string()),
            Syntax::Json => serde_json::from_str(&text).map_err(|e| e.to_string()),
            Syntax::Yaml => serde_yaml::from_str(&text).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| Error::ConfigParse {
            path: path.to_native(),
            format: syntax.label().to_string(),
            message,
        })
    }
}
