/**
 * Signup Handler
 *
 * This module implements the user registration handler for POST /create-user.
 *
 * # Registration Process
 *
 * 1. Check whether the username or email is already registered
 * 2. Hash the password using bcrypt
 * 3. Insert the user record
 * 4. Return a success acknowledgement
 *
 * No token is issued on signup - the client must log in.
 *
 * # Concurrency
 *
 * The existence check is a courtesy; two simultaneous signups with the same
 * username can both pass it. The UNIQUE constraints on the `users` table
 * decide the race, and a constraint violation at insert time produces the
 * same 400 response as the pre-check.
 */

use axum::extract::State;
use axum::response::Json;
use sqlx::PgPool;

use crate::auth::handlers::types::{MessageResponse, SignupRequest};
use crate::auth::password::hash_password;
use crate::auth::users::{create_user, credential_exists};
use crate::error::ApiError;

/// Signup handler
///
/// # Errors
///
/// * `400 Bad Request` - username or email already registered
/// * `500 Internal Server Error` - hashing or database failure
pub async fn signup(
    State(pool): State<PgPool>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    tracing::info!("Signup request for username: {}", request.username);

    // Check if username or email already exists
    if credential_exists(&pool, &request.username, &request.email).await? {
        tracing::warn!("Duplicate signup attempt: {}", request.username);
        return Err(ApiError::DuplicateCredential);
    }

    // Hash password
    let password_hash = hash_password(&request.password).map_err(|e| {
        tracing::error!("Failed to hash password: {:?}", e);
        ApiError::Internal(format!("password hashing failed: {e}"))
    })?;

    // Create user; a unique violation here (lost race) also maps to 400
    create_user(
        &pool,
        &request.name,
        &request.username,
        &request.email,
        &password_hash,
    )
    .await?;

    tracing::info!("User created successfully: {}", request.username);

    Ok(Json(MessageResponse {
        message: "User created successfully".to_string(),
    }))
}

#[cfg(all(test, feature = "db-tests"))]
mod tests {
    use super::*;
    use crate::auth::password::verify_password;
    use crate::auth::users::{create_user, find_user_by_username};
    use crate::server::init::ensure_schema;
    use sqlx::PgPool;

    fn signup_request(username: &str, email: &str) -> SignupRequest {
        SignupRequest {
            name: "Alice".to_string(),
            username: username.to_string(),
            email: email.to_string(),
            password: "pw123".to_string(),
        }
    }

    async fn user_count(pool: &PgPool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[sqlx::test]
    async fn test_signup_success_stores_hashed_password(pool: PgPool) {
        ensure_schema(&pool).await.unwrap();

        let result = signup(State(pool.clone()), Json(signup_request("alice", "a@x.com"))).await;
        let response = result.unwrap();
        assert_eq!(response.0.message, "User created successfully");

        // Lookup returns the new record with a non-plaintext password field
        let user = find_user_by_username(&pool, "alice").await.unwrap().unwrap();
        assert_eq!(user.email, "a@x.com");
        assert_ne!(user.password_hash, "pw123");
        assert!(verify_password("pw123", &user.password_hash));
    }

    #[sqlx::test]
    async fn test_signup_duplicate_username_creates_no_record(pool: PgPool) {
        ensure_schema(&pool).await.unwrap();

        signup(State(pool.clone()), Json(signup_request("alice", "a@x.com")))
            .await
            .unwrap();

        let result = signup(
            State(pool.clone()),
            Json(signup_request("alice", "other@x.com")),
        )
        .await;
        assert!(matches!(result, Err(ApiError::DuplicateCredential)));
        assert_eq!(user_count(&pool).await, 1);
    }

    #[sqlx::test]
    async fn test_signup_duplicate_email_creates_no_record(pool: PgPool) {
        ensure_schema(&pool).await.unwrap();

        signup(State(pool.clone()), Json(signup_request("alice", "a@x.com")))
            .await
            .unwrap();

        let result = signup(State(pool.clone()), Json(signup_request("bob", "a@x.com"))).await;
        assert!(matches!(result, Err(ApiError::DuplicateCredential)));
        assert_eq!(user_count(&pool).await, 1);
    }

    #[sqlx::test]
    async fn test_unique_violation_at_insert_maps_to_duplicate(pool: PgPool) {
        // Simulates a signup that passed the pre-check but lost the insert
        // race: the constraint violation itself must map to the same error.
        ensure_schema(&pool).await.unwrap();

        create_user(&pool, "Alice", "alice", "a@x.com", "hash").await.unwrap();

        let err: ApiError = create_user(&pool, "Mallory", "alice", "m@x.com", "hash")
            .await
            .unwrap_err()
            .into();
        assert!(matches!(err, ApiError::DuplicateCredential));
        assert_eq!(user_count(&pool).await, 1);
    }
}
