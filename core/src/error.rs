//! Error types for the task API client.
//!
//! # Design
//! Every non-2xx response collapses into `Http`, carrying the status code and
//! status text the caller would see from the server. The remaining variants
//! cover failures that never produced a usable response.

use thiserror::Error;

/// Errors returned by `TaskClient` parse methods and `TaskApi` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("API error: {status} {status_text}")]
    Http { status: u16, status_text: String },

    /// The request could not be sent or no response arrived.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// HTTP status of the failed response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
