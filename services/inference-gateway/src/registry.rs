//! Model registry: loads every task's artifact exactly once at startup and
//! holds the results immutably for the life of the process.
//!
//! A failed load is recorded with its reason instead of aborting startup, so
//! one broken artifact does not take down an unrelated task. The registry is
//! shared read-only (`Arc`) across request handlers; there is no reload path.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::artifact::{LoadError, ModelArtifact};
use crate::error::ApiError;
use crate::task::{OutputKind, Task, TaskSpec, TASK_COUNT};

/// Where to find one task's artifact, resolved from configuration.
#[derive(Debug, Clone)]
pub struct ArtifactSource {
    pub task: Task,
    pub path: PathBuf,
    pub sha256: Option<String>,
}

#[derive(Debug)]
pub struct ModelEntry {
    pub task: Task,
    pub artifact: ModelArtifact,
    pub expected_features: usize,
    pub output_kind: OutputKind,
    pub labels: &'static [&'static str],
}

#[derive(Debug)]
pub enum EntryState {
    Ready(ModelEntry),
    LoadFailed(String),
}

#[derive(Debug)]
pub struct ModelRegistry {
    entries: [EntryState; TASK_COUNT],
}

impl ModelRegistry {
    /// Loads all artifacts, emitting one diagnostic per model. No retries:
    /// artifacts are static files prepared out-of-band.
    pub fn load(sources: [ArtifactSource; TASK_COUNT]) -> Self {
        let entries = sources.map(|src| match Self::load_one(&src, src.task.spec()) {
            Ok(entry) => {
                info!(task = %src.task, path = %src.path.display(), "model loaded");
                EntryState::Ready(entry)
            }
            Err(err) => {
                warn!(
                    task = %src.task,
                    path = %src.path.display(),
                    error = %err,
                    "model load failed, task marked unavailable"
                );
                EntryState::LoadFailed(err.to_string())
            }
        });
        Self { entries }
    }

    fn load_one(src: &ArtifactSource, spec: &'static TaskSpec) -> Result<ModelEntry, LoadError> {
        let artifact = ModelArtifact::load(&src.path, src.sha256.as_deref())?;
        let artifact_dim = artifact.input_dim();
        if artifact_dim != spec.expected_features {
            // A mis-deployed artifact must never reach the request path.
            return Err(LoadError::ShapeMismatch {
                path: src.path.display().to_string(),
                artifact_dim,
                expected: spec.expected_features,
            });
        }
        Ok(ModelEntry {
            task: src.task,
            artifact,
            expected_features: spec.expected_features,
            output_kind: spec.output_kind,
            labels: spec.labels,
        })
    }

    /// O(1), side-effect free lookup.
    pub fn get(&self, task: Task) -> &EntryState {
        &self.entries[task.index()]
    }

    /// Task dispatch: resolve the entry or fail with a server-side error.
    pub fn resolve(&self, task: Task) -> Result<&ModelEntry, ApiError> {
        match self.get(task) {
            EntryState::Ready(entry) => Ok(entry),
            EntryState::LoadFailed(reason) => Err(ApiError::ModelUnavailable {
                task,
                reason: reason.clone(),
            }),
        }
    }

    /// Per-task availability for the `/status` endpoint.
    pub fn availability(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for task in Task::ALL {
            let state = match self.get(task) {
                EntryState::Ready(_) => "ready",
                EntryState::LoadFailed(_) => "load_failed",
            };
            map.insert(task.as_str().to_string(), state.into());
        }
        serde_json::Value::Object(map)
    }
}
