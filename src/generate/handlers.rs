/**
 * Text-Generation Handler
 *
 * This module implements the token-gated completion proxy for
 * POST /generate-text.
 *
 * # Request Flow
 *
 * 1. The `AuthUser` extractor verifies the bearer token; a missing, garbled,
 *    or expired token rejects with 401 before any provider traffic
 * 2. The provider API key is read lazily from `OPENAI_API_KEY`
 * 3. The provider stream is opened and relayed to the caller as a
 *    `text/plain` body, one fragment at a time, in arrival order
 *
 * The response body is backed by an mpsc channel: if the caller disconnects
 * mid-stream, the channel receiver is dropped and the provider relay stops
 * promptly. Nothing is persisted.
 */

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Json, Response};
use futures_util::stream;
use serde::Deserialize;

use crate::error::ApiError;
use crate::extract::AuthUser;
use crate::generate::provider::stream_completion;
use crate::server::state::AppState;

/// Request body for POST /generate-text
#[derive(Deserialize, Debug)]
pub struct GenerateTextRequest {
    pub prompt: String,
}

/// Text-generation handler
///
/// # Errors
///
/// * `401 Unauthorized` - missing or invalid bearer token (via `AuthUser`)
/// * `500 Internal Server Error` - provider API key not configured
/// * `502 Bad Gateway` - provider request failed before the stream opened
pub async fn generate_text(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<GenerateTextRequest>,
) -> Result<Response<Body>, ApiError> {
    tracing::info!("Text generation request from: {}", user.username);

    // Provider credential is read per call, not at startup
    let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
        tracing::error!("OPENAI_API_KEY not set");
        ApiError::Configuration("OPENAI_API_KEY not found".to_string())
    })?;

    let rx = stream_completion(&state.config.provider_api_base, &api_key, &request.prompt).await?;

    // Drain the channel into the response body; the stream ends when the
    // producer drops the sender (provider done or failed)
    let body_stream = stream::unfold(rx, |mut receiver| async move {
        receiver.recv().await.map(|item| (item, receiver))
    });

    let body = Body::from_stream(body_stream);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(header::CACHE_CONTROL, "no-cache, no-transform, no-store")
        // Prevents nginx-style intermediaries from buffering the stream
        .header("X-Accel-Buffering", "no")
        .body(body)
        .map_err(|e| {
            tracing::error!("Failed to build streaming response: {:?}", e);
            ApiError::Internal(format!("response build failed: {e}"))
        })
}
