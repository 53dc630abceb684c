//! Claim dialects
//!
//! A dialect is named by its URI. The list endpoint returns a bare array.

use iamsync_meta::ResourceType;
use iamsync_transport::Transport;
use serde::Deserialize;

use crate::error::Result;
use crate::handler::{RemoteResource, ResourceHandler, parse_json};

#[derive(Debug, Deserialize)]
struct ClaimDialectEntry {
    id: String,
    #[serde(rename = "dialectURI")]
    dialect_uri: String,
}

pub struct ClaimDialectHandler<'t> {
    transport: &'t dyn Transport,
}

impl<'t> ClaimDialectHandler<'t> {
    pub fn new(transport: &'t dyn Transport) -> Self {
        Self { transport }
    }
}

impl ResourceHandler for ClaimDialectHandler<'_> {
    fn resource_type(&self) -> ResourceType {
        ResourceType::Claims
    }

    fn transport(&self) -> &dyn Transport {
        self.transport
    }

    fn identity_field(&self) -> &'static str {
        "dialectURI"
    }

    fn parse_list(&self, body: &[u8]) -> Result<Vec<RemoteResource>> {
        let list: Vec<ClaimDialectEntry> = parse_json(self.resource_type(), body)?;
        Ok(list
            .into_iter()
            .map(|dialect| RemoteResource::new(dialect.dialect_uri, dialect.id))
            .collect())
    }
}
