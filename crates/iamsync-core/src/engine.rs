//! Reconciliation engine
//!
//! Drives the export and import passes of one resource type at a time
//! through a [`ResourceHandler`]. Every outcome is written to the injected
//! [`RunSummary`]; no error escapes a pass. A resource that fails is
//! recorded and the pass moves on to the next one.
//!
//! Export makes the local directory mirror the server: each listed resource
//! is fetched, live values are turned into placeholders and the file is
//! written under the server-chosen name. Import makes the server mirror the
//! directory: each local file is created or updated depending on whether a
//! resource of the same name is deployed.
//!
//! With `allow_delete`, each pass also removes the side that lacks a
//! counterpart: local files on export, deployed resources on import. Names
//! on a type's exclusion list are never touched in either direction.

use std::collections::{BTreeMap, HashMap, HashSet};

use iamsync_fs::path::strip_extension;
use iamsync_fs::{LocalResourceFile, NormalizedPath, io, list_resource_files, validate_file_name};
use iamsync_meta::{ContentFormat, IamsyncConfig, ResourceSettings, ResourceType};
use iamsync_transport::Transport;
use tracing::{debug, error, info, warn};

use crate::content::process_exported_content;
use crate::error::{Error, Result};
use crate::gate::{is_resource_excluded, is_resource_type_excluded, is_resource_type_supported};
use crate::handler::{RemoteResource, ResourceHandler};
use crate::keywords::{
    KeywordMapping, apply_keyword_substitution, resolve_keyword_mapping,
    resolve_type_keyword_mapping,
};
use crate::resources::all_handlers;
use crate::summary::{Operation, RunSummary};

/// How a pass over one resource type ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    /// The type is on the configured exclusion list
    Excluded,
    /// The configured server version predates the type
    Unsupported,
    /// Import found no directory for the type
    NothingToImport,
    /// The pass stopped before any resource was attempted
    Aborted,
    /// Every candidate resource was attempted
    Completed,
}

/// A local file whose authoritative name has been decoded.
#[derive(Debug)]
struct LocalResource {
    file: LocalResourceFile,
    name: String,
    /// Body with placeholders replaced by live values
    content: String,
}

/// A file already in an export folder, with its decoded name if readable.
#[derive(Debug)]
struct ExistingFile {
    file: LocalResourceFile,
    name: Option<String>,
}

/// Runs export and import passes against shared configuration and summary.
pub struct Reconciler<'a> {
    config: &'a IamsyncConfig,
    summary: &'a RunSummary,
}

impl<'a> Reconciler<'a> {
    pub fn new(config: &'a IamsyncConfig, summary: &'a RunSummary) -> Self {
        Self { config, summary }
    }

    /// Export every resource type into `<root>/<folder>`.
    pub fn export_all(
        &self,
        transport: &dyn Transport,
        root: &NormalizedPath,
        format: ContentFormat,
    ) -> Vec<(ResourceType, PassOutcome)> {
        all_handlers(transport)
            .iter()
            .map(|handler| {
                (
                    handler.resource_type(),
                    self.export(handler.as_ref(), root, format),
                )
            })
            .collect()
    }

    /// Import every resource type from `<root>/<folder>`.
    pub fn import_all(
        &self,
        transport: &dyn Transport,
        root: &NormalizedPath,
    ) -> Vec<(ResourceType, PassOutcome)> {
        all_handlers(transport)
            .iter()
            .map(|handler| (handler.resource_type(), self.import(handler.as_ref(), root)))
            .collect()
    }

    fn gate(&self, settings: &ResourceSettings<'_>) -> Option<PassOutcome> {
        if is_resource_type_excluded(settings) {
            info!("{} are excluded by configuration", settings.resource_type.label());
            return Some(PassOutcome::Excluded);
        }
        if !is_resource_type_supported(
            settings.resource_type,
            self.config.server.configured_version(),
        ) {
            return Some(PassOutcome::Unsupported);
        }
        None
    }

    fn keyword_mapping(&self, name: &str, settings: &ResourceSettings<'_>) -> KeywordMapping {
        resolve_keyword_mapping(name, settings.keywords, &self.config.keywords.mappings)
    }

    /// Read a local file and decode the resource it names.
    ///
    /// Placeholders are substituted before decoding, since a file holding
    /// `{{KEY}}` is not necessarily valid in its own format. The type-wide
    /// mapping yields a provisional name; that name selects the resource's
    /// own mapping, which produces the returned content.
    fn decode_local<H>(
        &self,
        handler: &H,
        file: &LocalResourceFile,
        settings: &ResourceSettings<'_>,
    ) -> Result<(String, String)>
    where
        H: ResourceHandler + ?Sized,
    {
        let raw = io::read_text(&file.path)?;
        let type_mapping =
            resolve_type_keyword_mapping(settings.keywords, &self.config.keywords.mappings);
        let provisional =
            handler.resolve_identity(file, &apply_keyword_substitution(&raw, &type_mapping))?;

        let mapping = self.keyword_mapping(&provisional, settings);
        let content = apply_keyword_substitution(&raw, &mapping);
        let name = if mapping == type_mapping {
            provisional
        } else {
            handler.resolve_identity(file, &content)?
        };
        Ok((name, content))
    }

    /// Export one resource type.
    pub fn export<H>(&self, handler: &H, root: &NormalizedPath, format: ContentFormat) -> PassOutcome
    where
        H: ResourceHandler + ?Sized,
    {
        let resource_type = handler.resource_type();
        let settings = self.config.settings_for(resource_type);
        if let Some(outcome) = self.gate(&settings) {
            return outcome;
        }

        info!("Exporting {}...", resource_type.label());
        let dir = root.join(resource_type.folder_name());

        let created = match io::ensure_dir(&dir) {
            Ok(created) => created,
            Err(e) => {
                error!("Error creating export directory for {}: {}", resource_type.label(), e);
                self.summary.record_type_error(resource_type, e.to_string());
                return PassOutcome::Aborted;
            }
        };
        if !created && self.config.tool.allow_delete {
            self.prune_local_files(handler, &dir, &settings);
        }

        let remotes = match handler.list() {
            Ok(remotes) => remotes,
            Err(e) => {
                error!("Error when exporting {}: {}", resource_type.label(), e);
                self.summary.record_type_error(resource_type, e.to_string());
                return PassOutcome::Aborted;
            }
        };

        let mut existing = self.existing_files(handler, &dir, &settings);

        for remote in &remotes {
            if is_resource_excluded(&remote.name, settings.exclude) {
                debug!(resource = %remote.name, "Excluded from export");
                continue;
            }

            info!(resource_type = %resource_type, "Exporting resource: {}", remote.name);
            match self.export_resource(handler, remote, &dir, format, &settings) {
                Ok(path) => {
                    self.summary.record_success(resource_type, Operation::Export);
                    info!(path = %path, "Resource exported successfully: {}", remote.name);
                    if let Some(written) = path.file_name() {
                        remove_superseded(&mut existing, written, remote);
                    }
                }
                Err(e) => {
                    self.summary
                        .record_failure(resource_type, &remote.name, Operation::Export);
                    error!(resource_type = %resource_type, "Error while exporting {}: {}", remote.name, e);
                }
            }
        }

        PassOutcome::Completed
    }

    fn export_resource<H>(
        &self,
        handler: &H,
        remote: &RemoteResource,
        dir: &NormalizedPath,
        format: ContentFormat,
        settings: &ResourceSettings<'_>,
    ) -> Result<NormalizedPath>
    where
        H: ResourceHandler + ?Sized,
    {
        let exported = handler.fetch_export(remote, format)?;
        validate_file_name(&exported.file_name)?;

        let mapping = self.keyword_mapping(&remote.name, settings);
        let content = process_exported_content(&exported.body, &mapping)?;

        let path = dir.join(&exported.file_name);
        io::write_atomic(&path, content.as_bytes())?;
        Ok(path)
    }

    /// Files present in `dir` before this pass writes anything.
    fn existing_files<H>(
        &self,
        handler: &H,
        dir: &NormalizedPath,
        settings: &ResourceSettings<'_>,
    ) -> Vec<ExistingFile>
    where
        H: ResourceHandler + ?Sized,
    {
        match list_resource_files(dir) {
            Ok(files) => files
                .into_iter()
                .map(|file| {
                    let name = self
                        .decode_local(handler, &file, settings)
                        .ok()
                        .map(|(name, _)| name);
                    ExistingFile { file, name }
                })
                .collect(),
            Err(e) => {
                warn!("Could not list existing {} files: {}", settings.resource_type.label(), e);
                Vec::new()
            }
        }
    }

    /// Delete local files with no deployed counterpart.
    ///
    /// A file is kept if its stem or its decoded name is deployed.
    fn prune_local_files<H>(&self, handler: &H, dir: &NormalizedPath, settings: &ResourceSettings<'_>)
    where
        H: ResourceHandler + ?Sized,
    {
        let label = settings.resource_type.label();
        let deployed: HashSet<String> = match handler.list() {
            Ok(remotes) => remotes.into_iter().map(|r| r.name).collect(),
            Err(e) => {
                warn!("Skipping removal of local {}: deployed list unavailable: {}", label, e);
                return;
            }
        };
        let files = match list_resource_files(dir) {
            Ok(files) => files,
            Err(e) => {
                warn!("Skipping removal of local {}: {}", label, e);
                return;
            }
        };

        for file in files {
            if deployed.contains(&file.stem) || is_resource_excluded(&file.stem, settings.exclude) {
                continue;
            }
            let decoded = self
                .decode_local(handler, &file, settings)
                .ok()
                .map(|(name, _)| name);
            if let Some(name) = decoded
                && (deployed.contains(&name) || is_resource_excluded(&name, settings.exclude))
            {
                continue;
            }

            info!("Removing local {} file not deployed on the server: {}", label, file.file_name);
            if let Err(e) = io::remove_file(&file.path) {
                error!("Error removing {}: {}", file.path, e);
            }
        }
    }

    /// Import one resource type.
    pub fn import<H>(&self, handler: &H, root: &NormalizedPath) -> PassOutcome
    where
        H: ResourceHandler + ?Sized,
    {
        let resource_type = handler.resource_type();
        let settings = self.config.settings_for(resource_type);
        if let Some(outcome) = self.gate(&settings) {
            return outcome;
        }

        info!("Importing {}...", resource_type.label());
        let dir = root.join(resource_type.folder_name());
        if !dir.is_dir() {
            info!("No {} to import.", resource_type.label());
            return PassOutcome::NothingToImport;
        }

        let files = match list_resource_files(&dir) {
            Ok(files) => files,
            Err(e) => {
                error!("Error importing {}: {}", resource_type.label(), e);
                self.summary.record_type_error(resource_type, e.to_string());
                return PassOutcome::Aborted;
            }
        };

        let locals = self.read_local_resources(handler, &files, &settings);

        if self.config.tool.allow_delete {
            self.remove_undeclared_remotes(handler, &files, &locals, &settings);
        }

        let pending = self.reject_duplicates(resource_type, locals);
        if pending.is_empty() {
            return PassOutcome::Completed;
        }

        let deployed = match handler.list() {
            Ok(remotes) => remotes,
            Err(e) => {
                error!("Error retrieving deployed {}: {}", resource_type.label(), e);
                for local in &pending {
                    self.summary
                        .record_failure(resource_type, &local.name, Operation::Import);
                }
                return PassOutcome::Aborted;
            }
        };
        let deployed: HashMap<&str, &RemoteResource> =
            deployed.iter().map(|r| (r.name.as_str(), r)).collect();

        for local in &pending {
            let (operation, result) = match deployed.get(local.name.as_str()) {
                None => {
                    info!(resource_type = %resource_type, "Creating new resource: {}", local.name);
                    (Operation::Import, handler.create(&local.file.file_name, &local.content))
                }
                Some(remote) => {
                    info!(resource_type = %resource_type, "Updating resource: {}", local.name);
                    (
                        Operation::Update,
                        handler.update(remote, &local.file.file_name, &local.content),
                    )
                }
            };

            match result {
                Ok(()) => {
                    self.summary.record_success(resource_type, operation);
                    info!(resource_type = %resource_type, "Resource {} successfully: {}", operation.past_tense(), local.name);
                }
                Err(e) => {
                    self.summary.record_failure(resource_type, &local.name, operation);
                    error!(resource_type = %resource_type, "Error when {} {}: {}", operation.progressive(), local.name, e);
                }
            }
        }

        PassOutcome::Completed
    }

    /// Read and decode local files that are not excluded.
    ///
    /// Files that cannot be read or decoded are recorded as import failures
    /// under their stem.
    fn read_local_resources<H>(
        &self,
        handler: &H,
        files: &[LocalResourceFile],
        settings: &ResourceSettings<'_>,
    ) -> Vec<LocalResource>
    where
        H: ResourceHandler + ?Sized,
    {
        let resource_type = settings.resource_type;
        let mut locals = Vec::with_capacity(files.len());

        for file in files {
            if is_resource_excluded(&file.stem, settings.exclude) {
                debug!(file = %file.file_name, "Excluded from import");
                continue;
            }

            let (name, content) = match self.decode_local(handler, file, settings) {
                Ok(decoded) => decoded,
                Err(e) => {
                    warn!("Invalid file configurations for {}: {}. {}", resource_type.label(), file.stem, e);
                    self.summary
                        .record_failure(resource_type, &file.stem, Operation::Import);
                    continue;
                }
            };

            if is_resource_excluded(&name, settings.exclude) {
                debug!(file = %file.file_name, resource = %name, "Excluded from import");
                continue;
            }
            locals.push(LocalResource {
                file: file.clone(),
                name,
                content,
            });
        }

        locals
    }

    /// Drop every local resource whose name is claimed by more than one file.
    fn reject_duplicates(
        &self,
        resource_type: ResourceType,
        locals: Vec<LocalResource>,
    ) -> Vec<LocalResource> {
        let mut by_name: BTreeMap<String, Vec<LocalResource>> = BTreeMap::new();
        for local in locals {
            by_name.entry(local.name.clone()).or_default().push(local);
        }

        let mut unique = Vec::with_capacity(by_name.len());
        for (name, mut group) in by_name {
            if group.len() == 1 {
                unique.append(&mut group);
                continue;
            }
            let err = Error::DuplicateIdentity {
                files: group.iter().map(|l| l.file.file_name.clone()).collect(),
                name: name.clone(),
            };
            error!(resource_type = %resource_type, "{}", err);
            self.summary
                .record_failure(resource_type, name, Operation::Import);
        }
        unique.sort_by(|a, b| a.file.file_name.cmp(&b.file.file_name));
        unique
    }

    /// Delete deployed resources with no local counterpart.
    ///
    /// A deployed resource is kept if any local file's stem or decoded name
    /// matches it, including files skipped for exclusion or duplication.
    fn remove_undeclared_remotes<H>(
        &self,
        handler: &H,
        files: &[LocalResourceFile],
        locals: &[LocalResource],
        settings: &ResourceSettings<'_>,
    ) where
        H: ResourceHandler + ?Sized,
    {
        let resource_type = settings.resource_type;
        let remotes = match handler.list() {
            Ok(remotes) => remotes,
            Err(e) => {
                warn!("Skipping removal of deployed {}: {}", resource_type.label(), e);
                return;
            }
        };

        let present: HashSet<&str> = files
            .iter()
            .map(|f| f.stem.as_str())
            .chain(locals.iter().map(|l| l.name.as_str()))
            .collect();

        for remote in &remotes {
            if present.contains(remote.name.as_str()) {
                continue;
            }
            if is_resource_excluded(&remote.name, settings.exclude) {
                info!(resource_type = %resource_type, "Resource is excluded from deletion: {}", remote.name);
                continue;
            }

            info!(resource_type = %resource_type, "Resource not found locally. Deleting: {}", remote.name);
            match handler.delete(remote) {
                Ok(()) => {
                    self.summary.record_success(resource_type, Operation::Delete);
                    info!(resource_type = %resource_type, "Resource deleted successfully: {}", remote.name);
                }
                Err(e) => {
                    self.summary
                        .record_failure(resource_type, &remote.name, Operation::Delete);
                    error!(resource_type = %resource_type, "Error deleting {}: {}", remote.name, e);
                }
            }
        }
    }
}

/// Delete files that held the resource just written under another name,
/// such as `openid.yaml` after a re-export to `openid.json`.
fn remove_superseded(existing: &mut Vec<ExistingFile>, written: &str, remote: &RemoteResource) {
    let written_stem = strip_extension(written);
    existing.retain(|entry| {
        let superseded = entry.file.file_name != written
            && (entry.file.stem == written_stem
                || entry.name.as_deref() == Some(remote.name.as_str()));
        if !superseded {
            return true;
        }

        info!("Removing {}: superseded by {}", entry.file.file_name, written);
        match io::remove_file(&entry.file.path) {
            Ok(()) => false,
            Err(e) => {
                warn!("Error removing {}: {}", entry.file.path, e);
                true
            }
        }
    });
}
