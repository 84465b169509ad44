/**
 * Server Initialization
 *
 * This module wires the application together: it connects the database
 * pool, ensures the schema exists, builds the shared state, and hands off
 * to the router.
 *
 * # Initialization Process
 *
 * 1. Connect the PostgreSQL pool from `AppConfig::database_url`
 * 2. Create the `users` table if it does not exist
 * 3. Build `AppState` and the router
 *
 * Unlike configuration loading, a failed database connection here is fatal:
 * every endpoint except the generation proxy depends on the store.
 */

use axum::Router;
use sqlx::PgPool;

use crate::error::ApiError;
use crate::routes::create_router;
use crate::server::config::AppConfig;
use crate::server::state::AppState;

/// Create and configure the Axum application.
///
/// # Errors
///
/// Returns an error if the database connection or schema creation fails.
pub async fn create_app(config: AppConfig) -> Result<Router, ApiError> {
    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&config.database_url).await?;
    tracing::info!("Database connection pool created");

    ensure_schema(&pool).await?;

    let state = AppState::new(pool, config);
    Ok(create_router(state))
}

/// Create the `users` table if it is absent.
///
/// Uniqueness of `username` and `email` is enforced at the database level so
/// that concurrent signups racing past the handler's pre-check cannot both
/// succeed.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), ApiError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Database schema ready");
    Ok(())
}
