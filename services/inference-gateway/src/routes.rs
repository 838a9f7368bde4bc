//! HTTP surface: a single `POST /predict` bound over the shared registry.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use crate::error::ApiError;
use crate::pipeline::{self, PredictionRequest, PredictionResponse};
use crate::registry::ModelRegistry;

pub fn router(registry: Arc<ModelRegistry>) -> Router {
    Router::new()
        .route("/predict", post(predict))
        .with_state(registry)
}

async fn predict(
    State(registry): State<Arc<ModelRegistry>>,
    Json(req): Json<PredictionRequest>,
) -> Result<Json<PredictionResponse>, ApiError> {
    pipeline::handle(&registry, &req).map(Json)
}
