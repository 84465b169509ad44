/**
 * Server Configuration
 *
 * This module loads and validates server configuration from the environment.
 * Configuration is read once at startup into an immutable `AppConfig` that is
 * shared with every handler through the application state.
 *
 * # Configuration Sources
 *
 * - `DATABASE_URL` - PostgreSQL connection string (required)
 * - `JWT_SECRET` - token signing secret (required)
 * - `OPENAI_API_BASE` - provider base URL (optional, defaults to the
 *   public OpenAI endpoint)
 * - `SERVER_PORT` - listen port (optional, defaults to 3000)
 *
 * # Error Handling
 *
 * Missing required variables are fatal: `from_env` returns a
 * `Configuration` error and the process aborts before binding a socket.
 *
 * The provider API key (`OPENAI_API_KEY`) is intentionally not part of this
 * struct - it is read lazily on each generation request.
 */

use crate::error::ApiError;
use crate::generate::provider::DEFAULT_API_BASE;

/// Immutable server configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// PostgreSQL connection string
    pub database_url: String,
    /// Secret used to sign and verify JWT bearer tokens
    pub jwt_secret: String,
    /// Base URL of the text-generation provider API
    pub provider_api_base: String,
    /// Port the HTTP server listens on
    pub port: u16,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Configuration` if `DATABASE_URL` or `JWT_SECRET`
    /// is not set.
    pub fn from_env() -> Result<Self, ApiError> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| ApiError::Configuration("DATABASE_URL not found".to_string()))?;

        let jwt_secret = std::env::var("JWT_SECRET")
            .map_err(|_| ApiError::Configuration("JWT_SECRET not found".to_string()))?;

        let provider_api_base =
            std::env::var("OPENAI_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

        let port = parse_port(std::env::var("SERVER_PORT").ok().as_deref());

        Ok(Self {
            database_url,
            jwt_secret,
            provider_api_base,
            port,
        })
    }
}

/// Default listen port, used when `SERVER_PORT` is unset or malformed.
const DEFAULT_PORT: u16 = 3000;

/// Parse the optional `SERVER_PORT` value, warning on a malformed one
/// before falling back to the default.
fn parse_port(raw: Option<&str>) -> u16 {
    match raw {
        None => DEFAULT_PORT,
        Some(raw) => raw.parse::<u16>().unwrap_or_else(|_| {
            tracing::warn!(
                "Invalid SERVER_PORT value {:?}, falling back to {}",
                raw,
                DEFAULT_PORT
            );
            DEFAULT_PORT
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_port_unset_uses_default() {
        assert_eq!(parse_port(None), DEFAULT_PORT);
    }

    #[test]
    fn test_parse_port_valid_value() {
        assert_eq!(parse_port(Some("8080")), 8080);
    }

    #[test]
    fn test_parse_port_malformed_falls_back() {
        assert_eq!(parse_port(Some("not-a-port")), DEFAULT_PORT);
        assert_eq!(parse_port(Some("70000")), DEFAULT_PORT);
    }

    #[test]
    fn test_from_env_missing_database_url() {
        // Note: relies on the test environment not defining DATABASE_URL
        std::env::remove_var("DATABASE_URL");
        let result = AppConfig::from_env();
        match result {
            Err(ApiError::Configuration(msg)) => assert!(msg.contains("DATABASE_URL")),
            other => panic!("Expected Configuration error, got {:?}", other.map(|_| ())),
        }
    }
}
