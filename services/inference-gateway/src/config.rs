//! Gateway configuration, loaded once at startup via `gateway_core`.
//!
//! Env overrides use the `GATEWAY` prefix, e.g. `GATEWAY_MODEL_DIR=/srv/models`
//! or `GATEWAY_HOUSING_SHA256=<hex digest>`.

use serde::Deserialize;
use std::path::PathBuf;

use crate::registry::ArtifactSource;
use crate::task::{Task, TASK_COUNT};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub http_port: u16,
    pub health_port: u16,
    pub model_dir: PathBuf,
    /// Per-task artifact filename overrides; defaults come from the task table.
    pub iris_artifact: Option<String>,
    pub housing_artifact: Option<String>,
    /// Optional SHA-256 pins verified at load.
    pub iris_sha256: Option<String>,
    pub housing_sha256: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            http_port: 8080,
            health_port: 9091,
            model_dir: PathBuf::from("models"),
            iris_artifact: None,
            housing_artifact: None,
            iris_sha256: None,
            housing_sha256: None,
        }
    }
}

impl GatewayConfig {
    pub fn artifact_sources(&self) -> [ArtifactSource; TASK_COUNT] {
        Task::ALL.map(|task| {
            let (file_override, sha256) = match task {
                Task::Iris => (self.iris_artifact.as_deref(), self.iris_sha256.clone()),
                Task::Housing => (self.housing_artifact.as_deref(), self.housing_sha256.clone()),
            };
            let file = file_override.unwrap_or(task.spec().artifact_file);
            ArtifactSource {
                task,
                path: self.model_dir.join(file),
                sha256: sha256.filter(|s| !s.is_empty()),
            }
        })
    }
}
