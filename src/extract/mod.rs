//! Request extractors for protected routes.

pub mod auth;

pub use auth::AuthUser;
