//! Application error types
//!
//! Unified error handling across the client.

use room_core::PatchError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Connection errors
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Transport error: {0}")]
    Transport(String),

    // Message errors
    #[error("Failed to decode message: {0}")]
    Decode(#[from] serde_json::Error),

    // Patch errors
    #[error(transparent)]
    Patch(#[from] PatchError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Internal errors
    #[error("Internal error")]
    Internal(#[source] anyhow::Error),
}

impl AppError {
    /// Whether this error ends the session
    ///
    /// Decode and patch failures are per-message: the offending message is
    /// dropped and the session continues with its prior state. Everything
    /// else is fatal.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Decode(_) | Self::Patch(_) => false,
            Self::Connection(_) | Self::Transport(_) | Self::Config(_) | Self::Internal(_) => true,
        }
    }

    /// Create a connection error
    #[must_use]
    pub fn connection(msg: impl std::fmt::Display) -> Self {
        Self::Connection(msg.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(err: crate::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Application result type
pub type AppResult<T> = Result<T, AppError>;
