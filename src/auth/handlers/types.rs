/**
 * Authentication Handler Types
 *
 * Request and response bodies for the signup and login endpoints.
 */

use serde::{Deserialize, Serialize};

/// Signup request body for POST /create-user
#[derive(Deserialize, Serialize, Debug)]
pub struct SignupRequest {
    /// Display name
    pub name: String,
    /// Desired username (must be unique)
    pub username: String,
    /// Email address (must be unique)
    pub email: String,
    /// Plaintext password (hashed before storage)
    pub password: String,
}

/// Login request body for POST /login
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Acknowledgement body returned by signup
#[derive(Serialize, Deserialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

/// Body returned by a successful login
#[derive(Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub message: String,
    /// Signed bearer token (60-minute expiry)
    pub access_token: String,
    /// Always "bearer"
    pub token_type: String,
}
