//! Federated identity providers

use iamsync_meta::ResourceType;
use iamsync_transport::Transport;
use serde::Deserialize;

use crate::error::Result;
use crate::handler::{RemoteResource, ResourceHandler, parse_json};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IdentityProviderList {
    #[serde(default)]
    identity_providers: Vec<IdentityProviderEntry>,
}

#[derive(Debug, Deserialize)]
struct IdentityProviderEntry {
    id: String,
    name: String,
}

pub struct IdentityProviderHandler<'t> {
    transport: &'t dyn Transport,
}

impl<'t> IdentityProviderHandler<'t> {
    pub fn new(transport: &'t dyn Transport) -> Self {
        Self { transport }
    }
}

impl ResourceHandler for IdentityProviderHandler<'_> {
    fn resource_type(&self) -> ResourceType {
        ResourceType::IdentityProviders
    }

    fn transport(&self) -> &dyn Transport {
        self.transport
    }

    fn identity_field(&self) -> &'static str {
        "identityProviderName"
    }

    fn parse_list(&self, body: &[u8]) -> Result<Vec<RemoteResource>> {
        let list: IdentityProviderList = parse_json(self.resource_type(), body)?;
        Ok(list
            .identity_providers
            .into_iter()
            .map(|idp| RemoteResource::new(idp.name, idp.id))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::resources::testing::CannedList;
    use iamsync_fs::{LocalResourceFile, NormalizedPath};

    #[test]
    fn test_list_reads_envelope() {
        let transport = CannedList(
            r#"{"totalResults":1,"identityProviders":[{"id":"7f1e","name":"Google","isEnabled":true}]}"#,
        );
        let remotes = IdentityProviderHandler::new(&transport).list().unwrap();
        assert_eq!(remotes, vec![RemoteResource::new("Google", "7f1e")]);
    }

    #[test]
    fn test_list_rejects_bare_array() {
        let transport = CannedList(r#"[{"id":"7f1e","name":"Google"}]"#);
        let result = IdentityProviderHandler::new(&transport).list();
        assert!(matches!(
            result,
            Err(Error::ListParse {
                resource_type: ResourceType::IdentityProviders,
                ..
            })
        ));
    }

    #[test]
    fn test_identity_from_xml_file() {
        let transport = CannedList("{}");
        let handler = IdentityProviderHandler::new(&transport);
        let file = LocalResourceFile::new(&NormalizedPath::new("/idps"), "google.xml");
        let content = "<IdentityProvider><IdentityProviderName>Google</IdentityProviderName></IdentityProvider>";

        assert_eq!(handler.resolve_identity(&file, content).unwrap(), "Google");
    }
}
