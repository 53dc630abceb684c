//! The transport seam between the engine and the identity server

use iamsync_meta::{ContentFormat, ResourceType};

use crate::Result;

/// Page size meaning "no limit".
pub const UNBOUNDED: i64 = -1;

/// An exported resource as delivered by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub body: Vec<u8>,
    /// Server-assigned file name from the Content-Disposition header
    pub file_name: String,
}

/// Raw operations against a resource type's management API.
///
/// Resources are addressed by their server identifier; for OIDC scopes the
/// identifier is the scope name.
pub trait Transport {
    /// Fetch the raw list body of a resource type.
    fn list(&self, resource_type: ResourceType, page_size: i64) -> Result<Vec<u8>>;

    fn export(
        &self,
        id: &str,
        format: ContentFormat,
        resource_type: ResourceType,
    ) -> Result<ExportedFile>;

    /// Create a resource from file content.
    fn import(&self, file_name: &str, content: &str, resource_type: ResourceType) -> Result<()>;

    /// Replace an existing resource with file content.
    fn update(
        &self,
        id: &str,
        file_name: &str,
        content: &str,
        resource_type: ResourceType,
    ) -> Result<()>;

    fn delete(&self, id: &str, resource_type: ResourceType) -> Result<()>;
}
