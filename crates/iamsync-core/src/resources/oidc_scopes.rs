//! OIDC scopes
//!
//! Scopes have no separate identifier: the name addresses the scope in
//! every URL.

use iamsync_meta::ResourceType;
use iamsync_transport::Transport;
use serde::Deserialize;

use crate::error::Result;
use crate::handler::{RemoteResource, ResourceHandler, parse_json};

#[derive(Debug, Deserialize)]
struct OidcScopeEntry {
    name: String,
}

pub struct OidcScopeHandler<'t> {
    transport: &'t dyn Transport,
}

impl<'t> OidcScopeHandler<'t> {
    pub fn new(transport: &'t dyn Transport) -> Self {
        Self { transport }
    }
}

impl ResourceHandler for OidcScopeHandler<'_> {
    fn resource_type(&self) -> ResourceType {
        ResourceType::OidcScopes
    }

    fn transport(&self) -> &dyn Transport {
        self.transport
    }

    fn identity_field(&self) -> &'static str {
        "name"
    }

    fn parse_list(&self, body: &[u8]) -> Result<Vec<RemoteResource>> {
        let list: Vec<OidcScopeEntry> = parse_json(self.resource_type(), body)?;
        Ok(list
            .into_iter()
            .map(|scope| RemoteResource::named(scope.name))
            .collect())
    }

    fn update_target<'r>(&self, remote: &'r RemoteResource) -> &'r str {
        &remote.name
    }
}
