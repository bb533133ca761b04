// SPDX-License-Identifier: MIT

//! Client error types shared across the session and cache layers.

/// Error returned by any operation that talks to the backend.
///
/// Payloads are plain strings so the error can be cloned into cache state
/// and rendered later.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("An account with this email already exists")]
    Conflict,

    #[error("Session expired")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    ValidationFailed(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl ApiError {
    /// True if this error means the current session token was rejected.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

/// Error from the on-disk credential store.
///
/// Only `save` reports errors; `load` treats every failure as "no session".
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to write session file: {0}")]
    Write(#[from] std::io::Error),

    #[error("Failed to encode credential: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type alias for backend calls.
pub type Result<T> = std::result::Result<T, ApiError>;
