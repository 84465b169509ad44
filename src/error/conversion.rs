/**
 * Error Conversions
 *
 * This module converts `ApiError` into HTTP responses and maps library
 * errors into the taxonomy.
 *
 * # Response Shape
 *
 * Every error renders as a JSON body of the form:
 *
 * ```json
 * { "detail": "Invalid credentials" }
 * ```
 *
 * matching the error shape of the signup/login/generate endpoints.
 */

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use crate::error::types::ApiError;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Server-side failures carry detail we never show the client
        if status == StatusCode::INTERNAL_SERVER_ERROR || status == StatusCode::BAD_GATEWAY {
            tracing::error!("Request failed: {}", self);
        }

        (status, Json(json!({ "detail": self.detail() }))).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    /// Maps a Postgres unique violation (SQLSTATE 23505) to
    /// `DuplicateCredential` so that two concurrent signups with the same
    /// username or email resolve atomically at the constraint, and any other
    /// database failure to `Database`.
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some("23505") {
                return ApiError::DuplicateCredential;
            }
        }
        ApiError::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_unique_violation_maps_to_database() {
        let err: ApiError = sqlx::Error::RowNotFound.into();
        match err {
            ApiError::Database(_) => {}
            other => panic!("Expected Database error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_into_response_renders_detail_json() {
        let response = ApiError::InvalidCredentials.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["detail"], "Invalid credentials");
    }

    #[tokio::test]
    async fn test_duplicate_renders_400() {
        let response = ApiError::DuplicateCredential.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["detail"], "User already exists");
    }
}
