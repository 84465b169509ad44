/**
 * API Error Types
 *
 * This module defines the error taxonomy for the backend. Every failure a
 * handler can produce is one of these variants, and each maps to exactly one
 * HTTP status code and a short, non-leaking JSON `detail` message.
 *
 * # Error Categories
 *
 * - `DuplicateCredential` - signup conflict (username or email taken)
 * - `InvalidCredentials` - failed login; deliberately identical for an
 *   unknown username and a wrong password
 * - `InvalidToken` - missing, malformed, or expired bearer token
 * - `Configuration` - a required secret or setting is absent; fatal at
 *   startup, 500 when hit at request time (missing provider key)
 * - `Provider` - the external text-generation call failed
 * - `Database` / `Internal` - unexpected server-side failures
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Backend error taxonomy.
///
/// Internal variants (`Database`, `Internal`, `Configuration`, `Provider`)
/// keep their source detail for logging but render a generic message to the
/// client - see [`ApiError::detail`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// Signup conflict: username or email already registered
    #[error("user already exists")]
    DuplicateCredential,

    /// Failed login (unknown user or wrong password - indistinguishable)
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Missing, malformed, or expired bearer token
    #[error("invalid or expired token")]
    InvalidToken,

    /// Required configuration absent
    #[error("configuration error: {0}")]
    Configuration(String),

    /// External text-generation provider call failed
    #[error("provider error: {0}")]
    Provider(String),

    /// Database error
    #[error("database error: {0}")]
    Database(sqlx::Error),

    /// Any other unexpected server-side failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// The HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::DuplicateCredential => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Provider(_) => StatusCode::BAD_GATEWAY,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The client-facing `detail` message.
    ///
    /// Internal variants return a fixed message; the underlying cause is
    /// logged server-side only.
    pub fn detail(&self) -> &'static str {
        match self {
            Self::DuplicateCredential => "User already exists",
            Self::InvalidCredentials => "Invalid credentials",
            Self::InvalidToken => "Invalid or expired token",
            Self::Configuration(_) => "Server misconfigured",
            Self::Provider(_) => "Text generation provider request failed",
            Self::Database(_) | Self::Internal(_) => "Internal server error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::DuplicateCredential.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::InvalidToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::Configuration("JWT_SECRET not found".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Provider("connect refused".to_string()).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_login_failures_are_indistinguishable() {
        // Unknown user and wrong password must produce identical responses
        let unknown_user = ApiError::InvalidCredentials;
        let wrong_password = ApiError::InvalidCredentials;
        assert_eq!(unknown_user.status_code(), wrong_password.status_code());
        assert_eq!(unknown_user.detail(), wrong_password.detail());
    }

    #[test]
    fn test_internal_detail_does_not_leak() {
        let err = ApiError::Database(sqlx::Error::PoolTimedOut);
        assert_eq!(err.detail(), "Internal server error");

        let err = ApiError::Internal("bcrypt failure: cost out of range".to_string());
        assert_eq!(err.detail(), "Internal server error");
    }
}
