//! Shared error type across nodegate crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed request.
    BadRequest,
    /// Node key text form is invalid.
    InvalidKey,
    /// Payload too large.
    PayloadTooLarge,
    /// Allow-list source unreachable.
    FetchFailed,
    /// Allow-list payload malformed.
    DecodeFailed,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::InvalidKey => "INVALID_KEY",
            ClientCode::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            ClientCode::FetchFailed => "FETCH_FAILED",
            ClientCode::DecodeFailed => "DECODE_FAILED",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, NodeGateError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum NodeGateError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("invalid node key: {0}")]
    InvalidKey(String),
    #[error("payload too large")]
    PayloadTooLarge,
    #[error("fetch failed: {0}")]
    Fetch(String),
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl NodeGateError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            NodeGateError::BadRequest(_) => ClientCode::BadRequest,
            NodeGateError::InvalidKey(_) => ClientCode::InvalidKey,
            NodeGateError::PayloadTooLarge => ClientCode::PayloadTooLarge,
            NodeGateError::Fetch(_) => ClientCode::FetchFailed,
            NodeGateError::Decode(_) => ClientCode::DecodeFailed,
            NodeGateError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            NodeGateError::Internal(_) => ClientCode::Internal,
        }
    }
}
