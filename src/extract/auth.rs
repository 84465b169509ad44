/**
 * Bearer Token Extractor
 *
 * This module provides the `AuthUser` extractor for routes that require
 * authentication. It pulls the JWT from the `Authorization: Bearer <token>`
 * header and verifies it before the handler body runs, so a protected
 * handler with an `AuthUser` parameter can never execute with a missing or
 * invalid token.
 */

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::auth::tokens::verify_token;
use crate::error::ApiError;
use crate::server::state::AppState;

/// Authenticated user extracted from a verified bearer token
#[derive(Clone, Debug)]
pub struct AuthUser {
    /// Subject claim: the authenticated username
    pub username: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Get Authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| {
                tracing::warn!("Missing Authorization header");
                ApiError::InvalidToken
            })?;

        // Extract token (format: "Bearer <token>")
        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            tracing::warn!("Invalid Authorization header format");
            ApiError::InvalidToken
        })?;

        // Verify signature and expiration
        let claims = verify_token(&state.config.jwt_secret, token)?;

        Ok(AuthUser {
            username: claims.sub,
        })
    }
}
