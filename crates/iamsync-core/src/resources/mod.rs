//! Resource type plug-ins

mod applications;
mod claims;
mod identity_providers;
mod oidc_scopes;
mod userstores;

pub use applications::ApplicationHandler;
pub use claims::ClaimDialectHandler;
pub use identity_providers::IdentityProviderHandler;
pub use oidc_scopes::OidcScopeHandler;
pub use userstores::UserStoreHandler;

use iamsync_meta::ResourceType;
use iamsync_transport::Transport;

use crate::handler::ResourceHandler;

/// The handler for one resource type.
pub fn handler_for(
    resource_type: ResourceType,
    transport: &dyn Transport,
) -> Box<dyn ResourceHandler + '_> {
    match resource_type {
        ResourceType::Applications => Box::new(ApplicationHandler::new(transport)),
        ResourceType::IdentityProviders => Box::new(IdentityProviderHandler::new(transport)),
        ResourceType::Claims => Box::new(ClaimDialectHandler::new(transport)),
        ResourceType::UserStores => Box::new(UserStoreHandler::new(transport)),
        ResourceType::OidcScopes => Box::new(OidcScopeHandler::new(transport)),
    }
}

/// Handlers for every resource type, in processing order.
pub fn all_handlers(transport: &dyn Transport) -> Vec<Box<dyn ResourceHandler + '_>> {
    ResourceType::ALL
        .iter()
        .map(|rt| handler_for(*rt, transport))
        .collect()
}
