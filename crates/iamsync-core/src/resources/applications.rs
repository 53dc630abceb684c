//! Service provider applications

use iamsync_meta::ResourceType;
use iamsync_transport::Transport;
use serde::Deserialize;

use crate::error::Result;
use crate::handler::{RemoteResource, ResourceHandler, parse_json};

#[derive(Debug, Deserialize)]
struct ApplicationList {
    #[serde(default)]
    applications: Vec<ApplicationEntry>,
}

#[derive(Debug, Deserialize)]
struct ApplicationEntry {
    id: String,
    name: String,
}

pub struct ApplicationHandler<'t> {
    transport: &'t dyn Transport,
}

impl<'t> ApplicationHandler<'t> {
    pub fn new(transport: &'t dyn Transport) -> Self {
        Self { transport }
    }
}

impl ResourceHandler for ApplicationHandler<'_> {
    fn resource_type(&self) -> ResourceType {
        ResourceType::Applications
    }

    fn transport(&self) -> &dyn Transport {
        self.transport
    }

    fn identity_field(&self) -> &'static str {
        "applicationName"
    }

    fn parse_list(&self, body: &[u8]) -> Result<Vec<RemoteResource>> {
        let list: ApplicationList = parse_json(self.resource_type(), body)?;
        Ok(list
            .applications
            .into_iter()
            .map(|app| RemoteResource::new(app.name, app.id))
            .collect())
    }
}
