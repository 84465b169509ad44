//! Token-gated streaming text-generation proxy.

pub mod handlers;
pub mod provider;

pub use handlers::generate_text;
