//! Run summary accumulator
//!
//! One [`RunSummary`] is shared by every resource type processed in a run.
//! It counts successes per operation, remembers which resources failed, and
//! keeps type-level errors (a list call that failed before any resource
//! could be attempted).

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use iamsync_meta::ResourceType;
use serde::{Deserialize, Serialize};

/// Kind of operation performed on a resource.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Export,
    Import,
    Update,
    Delete,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Export,
        Operation::Import,
        Operation::Update,
        Operation::Delete,
    ];

    pub fn past_tense(&self) -> &'static str {
        match self {
            Operation::Export => "exported",
            Operation::Import => "imported",
            Operation::Update => "updated",
            Operation::Delete => "deleted",
        }
    }

    pub fn progressive(&self) -> &'static str {
        match self {
            Operation::Export => "exporting",
            Operation::Import => "importing",
            Operation::Update => "updating",
            Operation::Delete => "deleting",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Export => write!(f, "export"),
            Operation::Import => write!(f, "import"),
            Operation::Update => write!(f, "update"),
            Operation::Delete => write!(f, "delete"),
        }
    }
}

/// A resource whose operation failed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Failure {
    pub resource_type: ResourceType,
    pub name: String,
    pub operation: Operation,
}

/// A resource type whose pass could not run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeError {
    pub resource_type: ResourceType,
    pub message: String,
}

#[derive(Debug, Default)]
struct SummaryState {
    successes: BTreeMap<(ResourceType, Operation), usize>,
    failures: BTreeSet<Failure>,
    errors: Vec<TypeError>,
}

/// Synchronized run-wide counters.
#[derive(Debug, Default)]
pub struct RunSummary {
    state: Mutex<SummaryState>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave the counters half-updated
    fn state(&self) -> MutexGuard<'_, SummaryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn record_success(&self, resource_type: ResourceType, operation: Operation) {
        *self
            .state()
            .successes
            .entry((resource_type, operation))
            .or_default() += 1;
    }

    pub fn record_failure(
        &self,
        resource_type: ResourceType,
        name: impl Into<String>,
        operation: Operation,
    ) {
        self.state().failures.insert(Failure {
            resource_type,
            name: name.into(),
            operation,
        });
    }

    pub fn record_type_error(&self, resource_type: ResourceType, message: impl Into<String>) {
        self.state().errors.push(TypeError {
            resource_type,
            message: message.into(),
        });
    }

    pub fn success_count(&self, resource_type: ResourceType, operation: Operation) -> usize {
        self.state()
            .successes
            .get(&(resource_type, operation))
            .copied()
            .unwrap_or(0)
    }

    pub fn failures(&self) -> Vec<Failure> {
        self.state().failures.iter().cloned().collect()
    }

    pub fn has_failures(&self) -> bool {
        let state = self.state();
        !state.failures.is_empty() || !state.errors.is_empty()
    }

    /// Snapshot the counters for reporting.
    pub fn report(&self) -> SummaryReport {
        let state = self.state();

        let mut touched: BTreeSet<ResourceType> =
            state.successes.keys().map(|(rt, _)| *rt).collect();
        touched.extend(state.failures.iter().map(|f| f.resource_type));
        touched.extend(state.errors.iter().map(|e| e.resource_type));

        let types = touched
            .into_iter()
            .map(|resource_type| {
                let count = |operation| {
                    state
                        .successes
                        .get(&(resource_type, operation))
                        .copied()
                        .unwrap_or(0)
                };
                TypeSummary {
                    resource_type,
                    exported: count(Operation::Export),
                    imported: count(Operation::Import),
                    updated: count(Operation::Update),
                    deleted: count(Operation::Delete),
                    failed: state
                        .failures
                        .iter()
                        .filter(|f| f.resource_type == resource_type)
                        .cloned()
                        .collect(),
                }
            })
            .collect();

        SummaryReport {
            types,
            errors: state.errors.clone(),
        }
    }
}

/// Per-type totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSummary {
    pub resource_type: ResourceType,
    pub exported: usize,
    pub imported: usize,
    pub updated: usize,
    pub deleted: usize,
    pub failed: Vec<Failure>,
}

impl TypeSummary {
    pub fn successes(&self) -> usize {
        self.exported + self.imported + self.updated + self.deleted
    }
}

/// End-of-run report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub types: Vec<TypeSummary>,
    pub errors: Vec<TypeError>,
}

impl SummaryReport {
    pub fn total_successes(&self) -> usize {
        self.types.iter().map(TypeSummary::successes).sum()
    }

    pub fn total_failures(&self) -> usize {
        self.types.iter().map(|t| t.failed.len()).sum::<usize>() + self.errors.len()
    }

    pub fn is_clean(&self) -> bool {
        self.total_failures() == 0
    }
}
