//! Resource reconciliation engine for iamsync
//!
//! Export pulls every resource of every type from the identity server into
//! a directory tree, one file per resource, with environment-specific
//! values replaced by `{{KEY}}` placeholders. Import pushes that tree back,
//! creating or updating resources and, when enabled, deleting those with
//! no local file.
//!
//! # Layers
//!
//! - [`version`] and [`gate`] decide whether a type or resource is touched
//! - [`keywords`] and [`content`] rewrite and decode resource bodies
//! - [`handler`] and [`resources`] describe each resource type
//! - [`engine`] runs the passes and writes outcomes to a [`RunSummary`]

pub mod content;
pub mod engine;
pub mod error;
pub mod gate;
pub mod handler;
pub mod keywords;
pub mod resources;
pub mod summary;
pub mod version;

pub use content::{decode_identity, process_exported_content};
pub use engine::{PassOutcome, Reconciler};
pub use error::{Error, Result};
pub use gate::{is_resource_excluded, is_resource_type_excluded, is_resource_type_supported};
pub use handler::{RemoteResource, ResourceHandler};
pub use keywords::{
    KeywordMapping, apply_keyword_substitution, placeholder, resolve_keyword_mapping,
    resolve_type_keyword_mapping, to_placeholders,
};
pub use resources::{all_handlers, handler_for};
pub use summary::{Failure, Operation, RunSummary, SummaryReport, TypeError, TypeSummary};
pub use version::{VersionError, compare_versions, parse_version};
