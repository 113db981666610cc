//! Error types for the ticket API client.
//!
//! # Design
//! Every non-2xx response lands in `Status`, which carries both the HTTP
//! status (for programmatic handling) and a human-readable message. The
//! message is what `Display` prints: either the server's `error` field or a
//! fixed per-operation fallback. Network failures are passed through
//! untranslated in `Transport`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a status outside 200..=299.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The request never completed (connection refused, body read failure, ...).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// A success body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// The HTTP status of a `Status` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
