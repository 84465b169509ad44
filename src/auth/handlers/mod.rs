//! Request handlers for the authentication endpoints.

pub mod login;
pub mod signup;
pub mod types;

pub use login::login;
pub use signup::signup;
