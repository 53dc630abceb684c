//! Metadata and configuration for iamsync.
//!
//! This crate defines the closed set of resource types the tool reconciles,
//! the content formats resources are exchanged in, and the configuration
//! schema (server, tool behaviour, keyword mappings).

pub mod config;
pub mod error;
pub mod format;
pub mod resource_type;

pub use config::{
    AdvancedKeywordConfig, IamsyncConfig, KeywordConfig, KeywordMap, KeywordOverrides,
    ResourceSettings, ResourceTypeConfig, ServerConfig, ToolConfig, load_config,
};
pub use error::{Error, Result};
pub use format::ContentFormat;
pub use resource_type::ResourceType;
