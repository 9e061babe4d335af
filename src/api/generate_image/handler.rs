// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image generation endpoint handler

use axum::{body::Bytes, extract::State, Json};
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::request::GenerateImageRequest;
use super::response::GenerateImageResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::generation::data_url::image_subtype;
use crate::generation::generate_with_fallback;

/// POST /api/generate-image - Generate an image from a reference photo and a prompt
///
/// Pipeline:
/// 1. Resolve configuration (429 if the limiter flag is set, before reading the body)
/// 2. Parse the JSON body (parse failures are classified by message)
/// 3. Require an API key (500)
/// 4. Require both fields (500) and a well-formed image data URL (400)
/// 5. Run up to two provider attempts, the second with the decade fallback prompt
/// 6. Return `{ imageUrl }`, or 500 if no attempt produced one
pub async fn generate_image_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GenerateImageResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    let span = info_span!("generate_image", %request_id);
    handle(state, body).instrument(span).await
}

async fn handle(state: AppState, body: Bytes) -> Result<Json<GenerateImageResponse>, ApiError> {
    let config = state.config.resolve();
    debug!("Resolved provider config: {:?}", config);

    if config.is_limited {
        warn!("Rejecting request: service limited");
        return Err(ApiError::Limited);
    }

    let request: GenerateImageRequest = serde_json::from_slice(&body).map_err(|e| {
        error!("Error generating image: {}", e);
        ApiError::from_failure_message(&e.to_string())
    })?;

    if !config.has_api_key() {
        error!("API_KEY is not configured");
        return Err(ApiError::MissingApiKey);
    }

    if let Err(e) = request.validate() {
        warn!("Image generation validation failed: {}", e);
        return Err(e);
    }

    info!(
        "Image generation request: prompt_len={}, image_type={}, image_len={}, model={}",
        request.prompt().len(),
        image_subtype(request.image_data_url()).unwrap_or("unknown"),
        request.image_data_url().len(),
        config.model
    );

    let generated = generate_with_fallback(
        state.provider.as_ref(),
        &config,
        request.prompt(),
        request.image_data_url(),
    )
    .await
    .map_err(|e| {
        error!("Image generation failed: {}", e);
        ApiError::GenerationFailed
    })?;

    info!("Image generated after {} attempt(s)", generated.attempts);

    Ok(Json(GenerateImageResponse {
        image_url: generated.image_url,
    }))
}
