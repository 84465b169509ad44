/**
 * User Model and Database Operations
 *
 * This module owns the user identity record and every query against the
 * `users` table. Records are created on signup and never updated or
 * deleted.
 */

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// User struct representing a row in the `users` table
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Auto-assigned numeric ID
    pub id: i32,
    /// Display name
    pub name: String,
    /// Username (unique)
    pub username: String,
    /// Email address (unique)
    pub email: String,
    /// Hashed password (bcrypt) - never plaintext
    pub password_hash: String,
}

/// Create a new user.
///
/// The `users` table carries UNIQUE constraints on `username` and `email`;
/// a violation surfaces as a `sqlx::Error` with SQLSTATE 23505, which the
/// caller maps to a duplicate-credential error.
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `name` - Display name
/// * `username` - Unique username
/// * `email` - Unique email address
/// * `password_hash` - Hashed password
///
/// # Returns
/// Created user or error
pub async fn create_user(
    pool: &PgPool,
    name: &str,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (name, username, email, password_hash)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, username, email, password_hash
        "#,
    )
    .bind(name)
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Get user by username.
///
/// # Returns
/// User or None if not found
pub async fn find_user_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, username, email, password_hash
        FROM users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Check whether a username or email is already registered.
///
/// Used as the signup pre-check; the UNIQUE constraints remain the source
/// of truth under concurrent signups.
pub async fn credential_exists(
    pool: &PgPool,
    username: &str,
    email: &str,
) -> Result<bool, sqlx::Error> {
    let exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM users WHERE username = $1 OR email = $2
        )
        "#,
    )
    .bind(username)
    .bind(email)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}
