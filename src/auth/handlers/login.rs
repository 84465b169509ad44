/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /login.
 *
 * # Authentication Process
 *
 * 1. Look up the user by username
 * 2. Verify the password against the stored bcrypt hash
 * 3. Issue a JWT with the username as subject
 *
 * # Security
 *
 * - An unknown username and a wrong password return the same 401 response,
 *   so the caller cannot enumerate accounts
 * - Verification is safe on an empty or malformed stored hash (fails closed)
 * - Passwords are never logged or returned
 */

use axum::extract::State;
use axum::response::Json;

use crate::auth::handlers::types::{LoginRequest, LoginResponse};
use crate::auth::password::verify_password;
use crate::auth::tokens::create_token;
use crate::auth::users::find_user_by_username;
use crate::error::ApiError;
use crate::server::state::AppState;

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - unknown user or wrong password (indistinguishable)
/// * `500 Internal Server Error` - database or token-signing failure
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    tracing::info!("Login request for: {}", request.username);

    let user = find_user_by_username(&state.pool, &request.username)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Login failed: user not found: {}", request.username);
            ApiError::InvalidCredentials
        })?;

    // Verify password (false on mismatch or missing/malformed stored hash)
    if !verify_password(&request.password, &user.password_hash) {
        tracing::warn!("Login failed: invalid password for: {}", request.username);
        return Err(ApiError::InvalidCredentials);
    }

    // Issue token with subject = username
    let token = create_token(&state.config.jwt_secret, &user.username).map_err(|e| {
        tracing::error!("Failed to create token: {:?}", e);
        ApiError::Internal(format!("token signing failed: {e}"))
    })?;

    tracing::info!("User logged in successfully: {}", user.username);

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        access_token: token,
        token_type: "bearer".to_string(),
    }))
}
