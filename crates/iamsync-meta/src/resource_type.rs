//! The closed set of resource types reconciled against the server

use std::fmt;
use std::str::FromStr;

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Minimum server version for the management APIs introduced in 5.9.0.
const MIN_VERSION_5_9: Version = Version::new(5, 9, 0);

/// A kind of server-side resource with its own local directory.
///
/// Serialized by its folder name, so configuration tables read
/// `[tool.resources.OidcScopes]`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ResourceType {
    Applications,
    IdentityProviders,
    Claims,
    UserStores,
    OidcScopes,
}

impl ResourceType {
    /// All resource types in processing order.
    pub const ALL: [ResourceType; 5] = [
        ResourceType::Applications,
        ResourceType::IdentityProviders,
        ResourceType::Claims,
        ResourceType::UserStores,
        ResourceType::OidcScopes,
    ];

    /// Directory name under the export root.
    pub fn folder_name(&self) -> &'static str {
        match self {
            ResourceType::Applications => "Applications",
            ResourceType::IdentityProviders => "IdentityProviders",
            ResourceType::Claims => "Claims",
            ResourceType::UserStores => "UserStores",
            ResourceType::OidcScopes => "OidcScopes",
        }
    }

    /// Collection path of the type's management API, relative to the
    /// tenant-qualified API root.
    pub fn api_path(&self) -> &'static str {
        match self {
            ResourceType::Applications => "applications",
            ResourceType::IdentityProviders => "identity-providers",
            ResourceType::Claims => "claim-dialects",
            ResourceType::UserStores => "userstores",
            ResourceType::OidcScopes => "oidc/scopes",
        }
    }

    /// Minimum server version that exposes this type, if one is registered.
    pub fn min_version(&self) -> Option<Version> {
        match self {
            ResourceType::Applications
            | ResourceType::IdentityProviders
            | ResourceType::Claims
            | ResourceType::UserStores => Some(MIN_VERSION_5_9),
            ResourceType::OidcScopes => None,
        }
    }

    /// Human-readable plural label used in log lines.
    pub fn label(&self) -> &'static str {
        match self {
            ResourceType::Applications => "applications",
            ResourceType::IdentityProviders => "identity providers",
            ResourceType::Claims => "claim dialects",
            ResourceType::UserStores => "user stores",
            ResourceType::OidcScopes => "OIDC scopes",
        }
    }
}

impl FromStr for ResourceType {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "applications" | "apps" => Ok(ResourceType::Applications),
            "identityproviders" | "idps" => Ok(ResourceType::IdentityProviders),
            "claims" | "claimdialects" => Ok(ResourceType::Claims),
            "userstores" => Ok(ResourceType::UserStores),
            "oidcscopes" => Ok(ResourceType::OidcScopes),
            _ => Err(Error::UnknownResourceType {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.folder_name())
    }
}
