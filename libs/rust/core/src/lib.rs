//! Core shared utilities for gateway services.

use anyhow::Result;
use axum::{routing::get, Json, Router};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use prometheus::{Encoder, TextEncoder};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

static NODE_LIVENESS: AtomicBool = AtomicBool::new(true);
static NODE_READINESS: AtomicBool = AtomicBool::new(false);
static STATUS_DETAIL: Lazy<RwLock<serde_json::Value>> =
    Lazy::new(|| RwLock::new(serde_json::Value::Null));

pub fn mark_ready() {
    NODE_READINESS.store(true, Ordering::SeqCst);
}
pub fn clear_ready() {
    NODE_READINESS.store(false, Ordering::SeqCst);
}
pub fn mark_not_live() {
    NODE_LIVENESS.store(false, Ordering::SeqCst);
}

/// Service-specific payload merged into the `/status` response (e.g. per-model
/// availability). Set once after startup; `/status` reads it lock-free enough.
pub fn set_status_detail(detail: serde_json::Value) {
    *STATUS_DETAIL.write() = detail;
}

pub fn init_tracing(service: &str) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let json = std::env::var("GATEWAY_JSON_LOG")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    let result = if json {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .json()
            .flatten_event(true)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_line_number(true)
            .try_init()
    };
    if let Err(e) = result {
        return Err(anyhow::anyhow!("tracing init failed: {e}"));
    }
    info!(service, "tracing initialized");
    Ok(())
}

/// Spawns the side server exposing liveness, readiness, status and Prometheus
/// metrics. Binds before returning so a bad port fails startup, then serves in
/// the background.
pub async fn start_health_server(port: u16) -> Result<()> {
    let app = Router::new()
        .route(
            "/live",
            get(|| async {
                Json(serde_json::json!({"live": NODE_LIVENESS.load(Ordering::SeqCst)}))
            }),
        )
        .route(
            "/ready",
            get(|| async {
                Json(serde_json::json!({"ready": NODE_READINESS.load(Ordering::SeqCst)}))
            }),
        )
        .route("/status", get(status_handler))
        .route("/metrics", get(metrics_handler));
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "health server listening");
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "health server failed");
        }
    });
    Ok(())
}

async fn status_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "live": NODE_LIVENESS.load(Ordering::SeqCst),
        "ready": NODE_READINESS.load(Ordering::SeqCst),
        "detail": STATUS_DETAIL.read().clone(),
    }))
}

async fn metrics_handler() -> axum::response::Response {
    let metric_families = prometheus::default_registry().gather();
    let mut buf = Vec::new();
    if let Err(e) = TextEncoder::new().encode(&metric_families, &mut buf) {
        return axum::response::Response::builder()
            .status(500)
            .body(axum::body::Body::from(format!("encode error: {e}")))
            .unwrap();
    }
    axum::response::Response::builder()
        .status(200)
        .header("Content-Type", "text/plain; version=0.0.4")
        .body(axum::body::Body::from(buf))
        .unwrap()
}

mod config;
pub use config::load_config;
pub mod lifecycle;
pub use lifecycle::{BootPhase, BootState};
