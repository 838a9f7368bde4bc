//! Per-request error taxonomy and its HTTP binding.
//!
//! Client input errors map to the 4xx class, a model that failed to load at
//! startup maps to 503 (the request was valid, the server is missing a
//! dependency), and a decoder mismatch maps to 500 (a registry/artifact
//! configuration bug, surfaced loudly rather than coerced).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::task::Task;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unknown task_type {got:?}; expected one of \"iris\", \"housing\"")]
    InvalidTask { got: String },
    #[error("task {task} expects {expected} features, received {received}")]
    FeatureCount {
        task: Task,
        expected: usize,
        received: usize,
    },
    #[error("feature at index {index} is not a finite number")]
    NonFiniteFeature { index: usize },
    #[error("model for task {task} is unavailable: {reason}")]
    ModelUnavailable { task: Task, reason: String },
    #[error("raw class index {index} does not decode against the {len}-entry label map for task {task}")]
    DecoderMismatch { task: Task, index: f64, len: usize },
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidTask { .. } => "invalid_task",
            ApiError::FeatureCount { .. } => "feature_count_mismatch",
            ApiError::NonFiniteFeature { .. } => "non_finite_feature",
            ApiError::ModelUnavailable { .. } => "model_unavailable",
            ApiError::DecoderMismatch { .. } => "decoder_mismatch",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidTask { .. } | ApiError::FeatureCount { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NonFiniteFeature { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ModelUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::DecoderMismatch { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "error": self.kind(),
            "message": self.to_string(),
        }));
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_are_4xx() {
        assert!(ApiError::InvalidTask { got: "wine".into() }.status().is_client_error());
        assert!(ApiError::FeatureCount {
            task: Task::Iris,
            expected: 4,
            received: 2
        }
        .status()
        .is_client_error());
        assert!(ApiError::NonFiniteFeature { index: 1 }.status().is_client_error());
    }

    #[test]
    fn server_errors_are_5xx() {
        assert_eq!(
            ApiError::ModelUnavailable {
                task: Task::Housing,
                reason: "artifact not found".into()
            }
            .status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::DecoderMismatch {
                task: Task::Iris,
                index: 3.0,
                len: 3
            }
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn feature_count_message_names_both_counts() {
        let msg = ApiError::FeatureCount {
            task: Task::Iris,
            expected: 4,
            received: 2,
        }
        .to_string();
        assert!(msg.contains('4') && msg.contains('2'));
    }
}
