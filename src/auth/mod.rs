//! Authentication subsystem: credential store, password hashing, JWT
//! tokens, and the signup/login handlers.

pub mod handlers;
pub mod password;
pub mod tokens;
pub mod users;

pub use handlers::{login, signup};
