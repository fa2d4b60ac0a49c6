//! Transport layer (HTTP).
//!
//! Exposes the admission decision handler and the error-to-status mapping
//! shared by request handlers.

pub mod admit;
pub mod error;

pub use error::ApiError;
