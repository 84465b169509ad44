//! Error taxonomy and HTTP response conversion.

pub mod conversion;
pub mod types;

pub use types::ApiError;
