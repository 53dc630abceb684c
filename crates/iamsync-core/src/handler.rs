//! Per-resource-type capabilities
//!
//! The engine never branches on [`ResourceType`]. Everything that differs
//! between types (list response shape, identity field, how a listed
//! resource is addressed) lives behind [`ResourceHandler`].

use iamsync_fs::LocalResourceFile;
use iamsync_meta::{ContentFormat, ResourceType};
use iamsync_transport::{ExportedFile, Transport, UNBOUNDED};
use serde::de::DeserializeOwned;

use crate::content::decode_identity;
use crate::error::{Error, Result};

/// A resource as reported by the server's list endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteResource {
    /// Human-facing name, matched against local files
    pub name: String,
    /// Identifier used in resource URLs
    pub id: String,
}

impl RemoteResource {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }

    /// A resource whose URL identifier is its name.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
        }
    }
}

/// Capabilities of one resource type.
///
/// Implementors supply the type, its transport, the identity field of its
/// exported documents and a list parser. The remaining operations have
/// defaults built on [`Transport`].
pub trait ResourceHandler {
    fn resource_type(&self) -> ResourceType;

    fn transport(&self) -> &dyn Transport;

    /// Field of an exported document that holds the resource name.
    fn identity_field(&self) -> &'static str;

    /// Decode a list response body.
    fn parse_list(&self, body: &[u8]) -> Result<Vec<RemoteResource>>;

    /// Every resource currently deployed.
    fn list(&self) -> Result<Vec<RemoteResource>> {
        let body = self.transport().list(self.resource_type(), UNBOUNDED)?;
        self.parse_list(&body)
    }

    fn fetch_export(&self, remote: &RemoteResource, format: ContentFormat) -> Result<ExportedFile> {
        Ok(self
            .transport()
            .export(&remote.id, format, self.resource_type())?)
    }

    fn create(&self, file_name: &str, content: &str) -> Result<()> {
        Ok(self
            .transport()
            .import(file_name, content, self.resource_type())?)
    }

    fn update(&self, remote: &RemoteResource, file_name: &str, content: &str) -> Result<()> {
        Ok(self.transport().update(
            self.update_target(remote),
            file_name,
            content,
            self.resource_type(),
        )?)
    }

    fn delete(&self, remote: &RemoteResource) -> Result<()> {
        Ok(self.transport().delete(&remote.id, self.resource_type())?)
    }

    /// Authoritative name of a local file.
    ///
    /// The format follows the file extension; unknown extensions are read
    /// as YAML.
    fn resolve_identity(&self, file: &LocalResourceFile, content: &str) -> Result<String> {
        let format = file
            .path
            .extension()
            .and_then(ContentFormat::from_extension)
            .unwrap_or_default();
        decode_identity(content, format, self.identity_field())
    }

    /// Identifier an update request is addressed to.
    fn update_target<'r>(&self, remote: &'r RemoteResource) -> &'r str {
        &remote.id
    }
}

/// Deserialize a JSON list body, attributing failures to `resource_type`.
pub(crate) fn parse_json<T: DeserializeOwned>(
    resource_type: ResourceType,
    body: &[u8],
) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| Error::ListParse {
        resource_type,
        message: e.to_string(),
    })
}
