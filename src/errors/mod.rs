//! Error types for the site chat client.
//!
//! The client does not interpret HTTP statuses: a response with any status
//! code is handed back to the caller as-is. Errors only arise when no
//! response could be obtained, when the request body cannot be serialized,
//! or when the client is misconfigured.

use thiserror::Error;

use crate::transport::TransportError;

/// Result type alias for client operations.
pub type ChatClientResult<T> = Result<T, ChatClientError>;

/// Error type for site chat client operations.
#[derive(Debug, Error)]
pub enum ChatClientError {
    /// Configuration error (invalid base URL, bad header, etc.)
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message describing the configuration issue.
        message: String,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message.
        message: String,
    },

    /// Failure reported by the underlying transport, passed through untouched.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ChatClientError {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        ChatClientError::Configuration {
            message: message.into(),
        }
    }

    /// Returns true if the transport gave up waiting for the backend.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ChatClientError::Transport(TransportError::Timeout { .. }))
    }

    /// Returns the transport error, if this error came from the transport.
    pub fn transport_error(&self) -> Option<&TransportError> {
        match self {
            ChatClientError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ChatClientError {
    fn from(err: serde_json::Error) -> Self {
        ChatClientError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for ChatClientError {
    fn from(err: url::ParseError) -> Self {
        ChatClientError::Configuration {
            message: format!("Invalid URL: {}", err),
        }
    }
}
