/**
 * Password Hashing
 *
 * One-way, salted hashing and verification for user passwords using bcrypt.
 * bcrypt embeds a random per-hash salt, so hashing the same password twice
 * produces different digests.
 */

use bcrypt::{hash, verify, BcryptError, DEFAULT_COST};

/// Hash a plaintext password with bcrypt at the default cost.
pub fn hash_password(plain: &str) -> Result<String, BcryptError> {
    hash(plain, DEFAULT_COST)
}

/// Verify a plaintext password against a stored hash.
///
/// Returns `false` (never an error) when the stored hash is empty or
/// malformed, so a record with a missing hash can never authenticate.
pub fn verify_password(plain: &str, stored_hash: &str) -> bool {
    if stored_hash.is_empty() {
        return false;
    }
    verify(plain, stored_hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hashed = hash_password("pw123").unwrap();
        assert!(verify_password("pw123", &hashed));
    }

    #[test]
    fn test_hash_is_not_plaintext() {
        let hashed = hash_password("pw123").unwrap();
        assert_ne!(hashed, "pw123");
    }

    #[test]
    fn test_hash_is_salted() {
        // Two hashes of the same password must differ (random salt)
        let a = hash_password("pw123").unwrap();
        let b = hash_password("pw123").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_wrong_password() {
        let hashed = hash_password("pw123").unwrap();
        assert!(!verify_password("wrong", &hashed));
    }

    #[test]
    fn test_verify_empty_stored_hash() {
        assert!(!verify_password("pw123", ""));
    }

    #[test]
    fn test_verify_malformed_stored_hash() {
        assert!(!verify_password("pw123", "not-a-bcrypt-hash"));
    }
}
