/**
 * Router Configuration
 *
 * This module assembles the Axum router for the three endpoints:
 *
 * - `POST /create-user` - user registration (public)
 * - `POST /login` - user login, returns a bearer token (public)
 * - `POST /generate-text` - streaming completion proxy (bearer token
 *   required, enforced by the `AuthUser` extractor in the handler)
 *
 * A permissive CORS layer and request tracing are applied to every route;
 * unknown paths fall through to a 404 handler.
 */

use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{login, signup};
use crate::generate::generate_text;
use crate::server::state::AppState;

/// Create the Axum router with all routes configured.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/create-user", post(signup))
        .route("/login", post(login))
        .route("/generate-text", post(generate_text))
        .fallback(|| async { (StatusCode::NOT_FOUND, "404 Not Found") })
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
