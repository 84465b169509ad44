/**
 * JWT Token Service
 *
 * This module issues and verifies the signed, time-limited bearer tokens
 * returned by login. Tokens are stateless: there is no server-side session
 * and no revocation - a token is valid exactly until its embedded
 * expiration, or never if the signature does not check out.
 */

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ApiError;

/// Token lifetime in minutes
pub const ACCESS_TOKEN_EXPIRE_MINUTES: u64 = 60;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the authenticated username
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Create a signed token for a user.
///
/// # Arguments
/// * `secret` - Server-held signing secret
/// * `username` - Subject claim
///
/// # Returns
/// Signed JWT (HS256), expiring in [`ACCESS_TOKEN_EXPIRE_MINUTES`]
pub fn create_token(secret: &str, username: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let now = unix_now();

    let claims = Claims {
        sub: username.to_string(),
        exp: now + ACCESS_TOKEN_EXPIRE_MINUTES * 60,
        iat: now,
    };

    let key = EncodingKey::from_secret(secret.as_ref());
    encode(&Header::default(), &claims, &key)
}

/// Verify and decode a token.
///
/// Signature and expiration are both checked; any failure collapses into
/// `ApiError::InvalidToken` (401) - the caller learns nothing about which
/// check failed.
pub fn verify_token(secret: &str, token: &str) -> Result<Claims, ApiError> {
    let key = DecodingKey::from_secret(secret.as_ref());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| {
        tracing::warn!("Token verification failed: {:?}", e.kind());
        ApiError::InvalidToken
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_issue_then_verify_preserves_subject() {
        let token = create_token(SECRET, "alice").unwrap();
        let claims = verify_token(SECRET, &token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token_rejected() {
        // Manually encode a token whose expiration is well in the past
        // (beyond the default validation leeway).
        let now = unix_now();
        let claims = Claims {
            sub: "alice".to_string(),
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_ref()),
        )
        .unwrap();

        let result = verify_token(SECRET, &token);
        assert!(matches!(result, Err(ApiError::InvalidToken)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token(SECRET, "alice").unwrap();
        let result = verify_token("different-secret", &token);
        assert!(matches!(result, Err(ApiError::InvalidToken)));
    }

    #[test]
    fn test_garbled_token_rejected() {
        let result = verify_token(SECRET, "not.a.token");
        assert!(matches!(result, Err(ApiError::InvalidToken)));
    }

    #[test]
    fn test_expiry_is_sixty_minutes() {
        let token = create_token(SECRET, "alice").unwrap();
        let claims = verify_token(SECRET, &token).unwrap();
        assert_eq!(claims.exp - claims.iat, ACCESS_TOKEN_EXPIRE_MINUTES * 60);
    }
}
