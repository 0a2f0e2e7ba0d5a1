//! Axum webhook server: accepts forge deliveries and hands them to the
//! runtime. No handler error propagates back to the delivery layer.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tracing::{info, warn};

use rota_github_triage::webhook_payload::WebhookPayload;

use super::{GithubTriageRuntime, GithubTriageRuntimeConfig};

/// Binds the webhook server and serves deliveries until ctrl-c.
pub async fn run_github_triage_server(config: GithubTriageRuntimeConfig) -> Result<()> {
    let bind_addr = config
        .bind
        .parse::<SocketAddr>()
        .with_context(|| format!("invalid --bind '{}'", config.bind))?;
    let runtime = Arc::new(GithubTriageRuntime::new(config)?);

    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind webhook server on {bind_addr}"))?;
    let local_addr = listener
        .local_addr()
        .context("failed to resolve bound webhook server address")?;
    info!(addr = %local_addr, "github triage webhook server listening");

    let app = build_webhook_router(runtime);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("webhook server exited unexpectedly")?;
    info!("github triage webhook server shut down");
    Ok(())
}

pub(super) fn build_webhook_router(runtime: Arc<GithubTriageRuntime>) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/webhook", post(handle_webhook))
        .with_state(runtime)
}

async fn handle_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "rota-github-triage",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn handle_webhook(
    State(runtime): State<Arc<GithubTriageRuntime>>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let event = headers
        .get("x-github-event")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    if event.is_empty() {
        warn!("webhook delivery missing x-github-event header");
        return StatusCode::BAD_REQUEST;
    }

    let payload: WebhookPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(parse_error) => {
            warn!(event = %event, error = %parse_error, "failed to parse webhook payload");
            return StatusCode::BAD_REQUEST;
        }
    };

    runtime.handle_event(&event, payload).await;
    StatusCode::NO_CONTENT
}
