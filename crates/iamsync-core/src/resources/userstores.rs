//! Secondary user stores

use iamsync_meta::ResourceType;
use iamsync_transport::Transport;
use serde::Deserialize;

use crate::error::Result;
use crate::handler::{RemoteResource, ResourceHandler, parse_json};

#[derive(Debug, Deserialize)]
struct UserStoreEntry {
    id: String,
    name: String,
}

pub struct UserStoreHandler<'t> {
    transport: &'t dyn Transport,
}

impl<'t> UserStoreHandler<'t> {
    pub fn new(transport: &'t dyn Transport) -> Self {
        Self { transport }
    }
}

impl ResourceHandler for UserStoreHandler<'_> {
    fn resource_type(&self) -> ResourceType {
        ResourceType::UserStores
    }

    fn transport(&self) -> &dyn Transport {
        self.transport
    }

    fn identity_field(&self) -> &'static str {
        "name"
    }

    fn parse_list(&self, body: &[u8]) -> Result<Vec<RemoteResource>> {
        let list: Vec<UserStoreEntry> = parse_json(self.resource_type(), body)?;
        Ok(list
            .into_iter()
            .map(|store| RemoteResource::new(store.name, store.id))
            .collect())
    }
}
