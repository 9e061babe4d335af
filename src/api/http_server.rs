// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::generate_image::generate_image_handler;
use crate::config::{ConfigResolver, ServerArgs};
use crate::generation::{ChatCompletionsClient, ImageGenerationProvider};
use crate::version;

/// Shared, immutable per-process state
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn ImageGenerationProvider>,
    pub config: Arc<ConfigResolver>,
}

impl AppState {
    pub fn new(provider: Arc<dyn ImageGenerationProvider>, config: ConfigResolver) -> Self {
        Self {
            provider,
            config: Arc::new(config),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub version_number: String,
    pub features: Vec<String>,
    pub limited: bool,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/generate-image", post(generate_image_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(args: ServerArgs) -> anyhow::Result<()> {
    let provider = ChatCompletionsClient::new(args.provider_timeout())?;
    let resolver = ConfigResolver::standard(args.platform_bindings.clone());
    tracing::info!("Config sources: {}", resolver.source_names().join(" > "));

    let app = create_app(AppState::new(Arc::new(provider), resolver));

    let addr = args.listen_addr.parse::<SocketAddr>()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let config = state.config.resolve();
    Json(HealthResponse {
        status: "ok".to_string(),
        version: version::VERSION.to_string(),
        version_number: version::VERSION_NUMBER.to_string(),
        features: version::FEATURES.iter().map(|f| f.to_string()).collect(),
        limited: config.is_limited,
    })
}
