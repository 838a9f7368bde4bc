//! The request pipeline: validate -> dispatch -> predict -> normalize ->
//! respond, with the first failure terminating the flow. Pure over the
//! registry, so it is safe to run concurrently from any number of handlers.

use std::time::Instant;

use once_cell::sync::Lazy;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::normalize::{self, Prediction};
use crate::registry::ModelRegistry;
use crate::task::Task;
use crate::validate;

#[derive(Debug, Clone, Deserialize)]
pub struct PredictionRequest {
    pub task_type: String,
    #[serde(default)]
    pub features: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResponse {
    pub task_type: String,
    pub prediction: Prediction,
    pub label: Option<String>,
}

impl PredictionResponse {
    /// Categorical tasks duplicate the decoded label into `prediction` for
    /// clients that want a single generically-typed field; continuous tasks
    /// carry a null `label`.
    fn assemble(task: Task, prediction: Prediction, label: Option<String>) -> Self {
        Self {
            task_type: task.as_str().to_string(),
            prediction,
            label,
        }
    }
}

static REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "gateway_requests_total",
        "Prediction requests by task and outcome",
        &["task", "outcome"]
    )
    .expect("metric registration")
});

static STAGE_LATENCY_MS: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "gateway_stage_latency_ms",
        "Latency per request stage (ms)",
        &["stage"],
        vec![0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 25.0, 100.0]
    )
    .expect("metric registration")
});

fn elapsed_ms(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1000.0
}

/// Serves one request and records outcome + latency metrics.
pub fn handle(
    registry: &ModelRegistry,
    req: &PredictionRequest,
) -> Result<PredictionResponse, ApiError> {
    let start = Instant::now();
    let result = run(registry, req);
    // Unknown task strings collapse into one label to keep cardinality fixed.
    let task = req
        .task_type
        .parse::<Task>()
        .map(|t| t.as_str())
        .unwrap_or("unknown");
    let outcome = match &result {
        Ok(_) => "ok",
        Err(e) => e.kind(),
    };
    REQUESTS_TOTAL.with_label_values(&[task, outcome]).inc();
    STAGE_LATENCY_MS
        .with_label_values(&["total"])
        .observe(elapsed_ms(start));
    result
}

fn run(registry: &ModelRegistry, req: &PredictionRequest) -> Result<PredictionResponse, ApiError> {
    let task: Task = req.task_type.parse().map_err(|()| ApiError::InvalidTask {
        got: req.task_type.clone(),
    })?;

    // Fail fast: everything client-shaped is checked before any model runs.
    let s = Instant::now();
    validate::validate_features(task, &req.features)?;
    STAGE_LATENCY_MS
        .with_label_values(&["validate"])
        .observe(elapsed_ms(s));

    let entry = registry.resolve(task)?;

    let s = Instant::now();
    let raw = entry.artifact.predict(&req.features);
    STAGE_LATENCY_MS
        .with_label_values(&["predict"])
        .observe(elapsed_ms(s));

    let s = Instant::now();
    let (prediction, label) = normalize::normalize(entry, raw)?;
    STAGE_LATENCY_MS
        .with_label_values(&["normalize"])
        .observe(elapsed_ms(s));

    debug!(%task, raw, "prediction served");
    Ok(PredictionResponse::assemble(task, prediction, label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_decodes_without_features_field() {
        let req: PredictionRequest = serde_json::from_str("{\"task_type\":\"iris\"}").unwrap();
        assert!(req.features.is_empty());
    }

    #[test]
    fn response_serializes_null_label() {
        let resp = PredictionResponse::assemble(Task::Housing, Prediction::Value(4.33), None);
        let v = serde_json::to_value(&resp).unwrap();
        assert_eq!(
            v,
            serde_json::json!({"task_type": "housing", "prediction": 4.33, "label": null})
        );
    }

    #[test]
    fn response_duplicates_label_for_categorical() {
        let resp = PredictionResponse::assemble(
            Task::Iris,
            Prediction::Label("setosa".into()),
            Some("setosa".into()),
        );
        let v = serde_json::to_value(&resp).unwrap();
        assert_eq!(
            v,
            serde_json::json!({"task_type": "iris", "prediction": "setosa", "label": "setosa"})
        );
    }
}
