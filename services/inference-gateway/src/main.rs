use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::info;

use gateway_core::{init_tracing, load_config, mark_ready, set_status_detail, start_health_server, BootState};
use inference_gateway::config::GatewayConfig;
use inference_gateway::registry::ModelRegistry;
use inference_gateway::routes;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("inference-gateway")?;

    let mut boot = BootState::new();
    let cfg: GatewayConfig = load_config("inference-gateway")?;
    info!(?cfg, "config loaded");
    boot.advance();

    let registry = Arc::new(ModelRegistry::load(cfg.artifact_sources()));
    set_status_detail(serde_json::json!({ "models": registry.availability() }));
    boot.advance();

    start_health_server(cfg.health_port).await?;
    // Registry population is complete before readiness flips or /predict binds.
    mark_ready();
    info!(phases = ?boot.durations(), "service ready");

    let app = routes::router(registry);
    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.http_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "predict endpoint listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = signal::ctrl_c().await;
        })
        .await?;
    info!("shutdown");
    Ok(())
}
