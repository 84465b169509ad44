//! Brian Backend - Main Library
//!
//! Brian is a small AI-assistant backend. It exposes three HTTP endpoints:
//! user signup, user login (issuing a JWT bearer token), and a token-gated
//! text-generation endpoint that proxies a streaming completion from the
//! OpenAI chat-completions API.
//!
//! # Module Structure
//!
//! - **`server`** - Configuration, application state, and app wiring
//! - **`auth`** - Credential store, password hashing, JWT tokens, and the
//!   signup/login handlers
//! - **`extract`** - Bearer-token extractor for protected routes
//! - **`generate`** - Streaming text-generation proxy
//! - **`routes`** - Router assembly
//! - **`error`** - Error taxonomy and HTTP response conversion

pub mod auth;
pub mod error;
pub mod extract;
pub mod generate;
pub mod routes;
pub mod server;
