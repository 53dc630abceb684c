//! In-memory identity server for engine tests

#![allow(dead_code)]

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::Mutex;

use iamsync_meta::{ContentFormat, ResourceType};
use iamsync_transport::{Error, ExportedFile, Result, Transport};
use serde_json::json;

#[derive(Debug, Clone)]
pub struct Stored {
    pub id: String,
    pub name: String,
    pub body: String,
}

#[derive(Default)]
struct State {
    resources: BTreeMap<ResourceType, Vec<Stored>>,
    next_id: usize,
    failing_resources: HashSet<String>,
    failing_lists: HashSet<ResourceType>,
    calls: Vec<String>,
}

/// A [`Transport`] backed by a map, with per-resource failure injection.
#[derive(Default)]
pub struct FakeServer {
    state: Mutex<State>,
}

fn identity_field(resource_type: ResourceType) -> &'static str {
    match resource_type {
        ResourceType::Applications => "applicationName",
        ResourceType::IdentityProviders => "identityProviderName",
        ResourceType::Claims => "dialectURI",
        ResourceType::UserStores | ResourceType::OidcScopes => "name",
    }
}

fn decode_name(resource_type: ResourceType, content: &str) -> Option<String> {
    let value: serde_yaml::Value = serde_yaml::from_str(content).ok()?;
    value
        .get(identity_field(resource_type))?
        .as_str()
        .map(str::to_string)
}

fn file_name_for(name: &str, format: ContentFormat) -> String {
    let safe: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("{safe}.{}", format.extension())
}

impl FakeServer {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// Deploy a resource directly, returning its id.
    pub fn seed(&self, resource_type: ResourceType, name: &str, body: &str) -> String {
        let mut state = self.state();
        let id = if resource_type == ResourceType::OidcScopes {
            name.to_string()
        } else {
            state.next_id += 1;
            format!("id-{}", state.next_id)
        };
        state.resources.entry(resource_type).or_default().push(Stored {
            id: id.clone(),
            name: name.to_string(),
            body: body.to_string(),
        });
        id
    }

    /// Deploy an OIDC scope with a minimal body.
    pub fn seed_scope(&self, name: &str) -> String {
        self.seed(
            ResourceType::OidcScopes,
            name,
            &format!("name: {name}\ndisplayName: {name}\nclaims: []\n"),
        )
    }

    pub fn names(&self, resource_type: ResourceType) -> Vec<String> {
        let mut names: Vec<String> = self
            .state()
            .resources
            .get(&resource_type)
            .map(|r| r.iter().map(|s| s.name.clone()).collect())
            .unwrap_or_default();
        names.sort();
        names
    }

    pub fn get(&self, resource_type: ResourceType, name: &str) -> Option<Stored> {
        self.state()
            .resources
            .get(&resource_type)?
            .iter()
            .find(|s| s.name == name)
            .cloned()
    }

    /// Make every call addressing `name` fail with a server error.
    pub fn fail_resource(&self, name: &str) {
        self.state().failing_resources.insert(name.to_string());
    }

    pub fn fail_list(&self, resource_type: ResourceType) {
        self.state().failing_lists.insert(resource_type);
    }

    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    /// Calls other than listing.
    pub fn mutating_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| !c.starts_with("list ") && !c.starts_with("export "))
            .collect()
    }
}

impl Transport for FakeServer {
    fn list(&self, resource_type: ResourceType, _page_size: i64) -> Result<Vec<u8>> {
        let mut state = self.state();
        state.calls.push(format!("list {resource_type}"));
        if state.failing_lists.contains(&resource_type) {
            return Err(Error::status(500));
        }

        let stored = state.resources.get(&resource_type).cloned().unwrap_or_default();
        let entries: Vec<serde_json::Value> = stored
            .iter()
            .map(|s| match resource_type {
                ResourceType::Claims => json!({"id": s.id, "dialectURI": s.name}),
                ResourceType::OidcScopes => json!({"name": s.name, "displayName": s.name}),
                _ => json!({"id": s.id, "name": s.name}),
            })
            .collect();
        let body = match resource_type {
            ResourceType::Applications => {
                json!({"totalResults": entries.len(), "applications": entries})
            }
            ResourceType::IdentityProviders => {
                json!({"totalResults": entries.len(), "identityProviders": entries})
            }
            _ => json!(entries),
        };
        Ok(serde_json::to_vec(&body).unwrap())
    }

    fn export(
        &self,
        id: &str,
        format: ContentFormat,
        resource_type: ResourceType,
    ) -> Result<ExportedFile> {
        let mut state = self.state();
        state.calls.push(format!("export {id}"));
        let stored = state
            .resources
            .get(&resource_type)
            .and_then(|r| r.iter().find(|s| s.id == id))
            .cloned()
            .ok_or_else(|| Error::status(404))?;
        if state.failing_resources.contains(&stored.name) {
            return Err(Error::status(500));
        }
        Ok(ExportedFile {
            body: stored.body.into_bytes(),
            file_name: file_name_for(&stored.name, format),
        })
    }

    fn import(&self, file_name: &str, content: &str, resource_type: ResourceType) -> Result<()> {
        let name = decode_name(resource_type, content).ok_or_else(|| Error::status(400))?;
        {
            let mut state = self.state();
            state.calls.push(format!("import {name} from {file_name}"));
            if state.failing_resources.contains(&name) {
                return Err(Error::status(500));
            }
            let exists = state
                .resources
                .get(&resource_type)
                .is_some_and(|r| r.iter().any(|s| s.name == name));
            if exists {
                return Err(Error::status(409));
            }
        }
        self.seed(resource_type, &name, content);
        Ok(())
    }

    fn update(
        &self,
        id: &str,
        file_name: &str,
        content: &str,
        resource_type: ResourceType,
    ) -> Result<()> {
        let mut state = self.state();
        state.calls.push(format!("update {id} from {file_name}"));
        let failing = state.failing_resources.clone();
        let stored = state
            .resources
            .get_mut(&resource_type)
            .and_then(|r| r.iter_mut().find(|s| s.id == id))
            .ok_or_else(|| Error::status(404))?;
        if failing.contains(&stored.name) {
            return Err(Error::status(500));
        }
        stored.body = content.to_string();
        Ok(())
    }

    fn delete(&self, id: &str, resource_type: ResourceType) -> Result<()> {
        let mut state = self.state();
        state.calls.push(format!("delete {id}"));
        let failing = state.failing_resources.clone();
        let resources = state.resources.entry(resource_type).or_default();
        let idx = resources
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| Error::status(404))?;
        if failing.contains(&resources[idx].name) {
            return Err(Error::status(500));
        }
        resources.remove(idx);
        Ok(())
    }
}

/// Write a local resource file, creating the type directory.
pub fn write_local(root: &Path, resource_type: ResourceType, file_name: &str, content: &str) {
    let dir = root.join(resource_type.folder_name());
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(file_name), content).unwrap();
}

pub fn read_local(root: &Path, resource_type: ResourceType, file_name: &str) -> Option<String> {
    fs::read_to_string(root.join(resource_type.folder_name()).join(file_name)).ok()
}

pub fn local_files(root: &Path, resource_type: ResourceType) -> Vec<String> {
    let Ok(entries) = fs::read_dir(root.join(resource_type.folder_name())) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
