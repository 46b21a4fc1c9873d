//! Gateway server setup and initialization

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;

use super::news;
use super::state::ProxyState;
use super::summary;

/// Start the gateway server
pub async fn start_proxy(
    config: Config,
    shutdown_rx: tokio::sync::oneshot::Receiver<()>,
) -> Result<()> {
    let bind_addr = config.bind_addr;

    // Build the HTTP client with timeout and connection pooling
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(300)) // 5 minute timeout for API calls
        .pool_max_idle_per_host(10)
        .build()
        .context("Failed to create HTTP client")?;

    let cors = cors_layer(config.cors_origin.as_deref())?;
    let state = ProxyState::from_config(&config, client);

    // Build the router - provider endpoints + health probe
    let app = Router::new()
        .route("/api/news", get(news::get_news))
        .route("/api/ai-summary", post(summary::ai_summary))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state);

    tracing::info!("Starting gateway on {}", bind_addr);

    // Bind and serve
    let listener = TcpListener::bind(bind_addr)
        .await
        .context("Failed to bind to address")?;

    tracing::info!("Gateway listening on {}", bind_addr);

    // Start serving requests with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_rx.await.ok();
        })
        .await
        .context("Server error")?;

    tracing::info!("Gateway shut down gracefully");
    Ok(())
}

/// Liveness probe for the frontend's deploy checks
async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// Browser-facing CORS policy
///
/// A configured origin pins the gateway to one frontend; without one the
/// gateway stays wide open for local development.
fn cors_layer(origin: Option<&str>) -> Result<CorsLayer> {
    match origin {
        Some(origin) => {
            let origin = origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin: {origin}"))?;
            Ok(CorsLayer::new()
                .allow_origin(origin)
                .allow_methods(Any)
                .allow_headers(Any))
        }
        None => Ok(CorsLayer::permissive()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_reports_ok() {
        let response = health().await;
        assert_eq!(response.0, json!({"ok": true}));
    }

    #[test]
    fn test_cors_layer_accepts_pinned_origin() {
        assert!(cors_layer(Some("https://naijahub.example")).is_ok());
    }

    #[test]
    fn test_cors_layer_rejects_malformed_origin() {
        assert!(cors_layer(Some("not\nan origin")).is_err());
    }

    #[test]
    fn test_cors_layer_defaults_to_permissive() {
        assert!(cors_layer(None).is_ok());
    }
}
