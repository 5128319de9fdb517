//! API client error types.

use thiserror::Error;

use super::StorageError;

/// Message used when an error body carries a `detail` that cannot be rendered.
pub const GENERIC_FAILURE_MESSAGE: &str = "Request failed";

/// API client error variants.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response. Displays exactly the server-provided message.
    #[error("{message}")]
    Http {
        /// Response status code.
        status: u16,
        /// `detail` from the body, or `HTTP <status>`.
        message: String,
    },

    /// Transport-level failure, reported with the transport's own message.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// Success body that is not JSON or not the expected shape.
    #[error("failed to decode response body: {message}")]
    Decode {
        /// Decoder error.
        message: String,
    },

    /// Input rejected before any request was sent.
    #[error("{message}")]
    Validation {
        /// What was wrong with the input.
        message: String,
    },

    /// Token missing from a login response or unusable in a header.
    #[error("invalid token: {reason}")]
    InvalidToken {
        /// Why the token was refused.
        reason: String,
    },

    /// Durable token store failure.
    #[error("token storage error: {0}")]
    Storage(#[from] StorageError),

    /// A logout happened while the transition was in flight.
    #[error("session changed while the request was in flight")]
    Superseded,

    /// Local file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that was being read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Client could not be set up.
    #[error("unexpected client error: {message}")]
    Unexpected {
        /// Description of the failure.
        message: String,
    },
}

impl ApiError {
    /// Creates HTTP status error.
    #[must_use]
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates HTTP status error with the synthesized `HTTP <status>` message.
    #[must_use]
    pub fn status_only(status: u16) -> Self {
        Self::http(status, format!("HTTP {status}"))
    }

    /// Creates decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates invalid token error.
    #[must_use]
    pub fn invalid_token(reason: impl Into<String>) -> Self {
        Self::InvalidToken {
            reason: reason.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns the HTTP status for status errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns whether the server rejected the credentials.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http { status: 401, .. })
    }

    /// Returns whether error is network related.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
