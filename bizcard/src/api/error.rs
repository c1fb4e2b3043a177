//! Transport-level errors

use thiserror::Error;

/// Failure talking to the REST backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The backend answered with a non-2xx status
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("request failed"))]
    Status {
        /// HTTP status code
        status: u16,
        /// `error` field of the response body, if any
        message: Option<String>,
    },

    /// The request never got an answer
    #[error("Network error: {0}")]
    Network(String),

    /// The request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// The response body could not be decoded
    #[error("Invalid response: {0}")]
    Decode(String),

    /// The request could not be built
    #[error("Invalid request: {0}")]
    Request(String),
}

impl ApiError {
    /// Message supplied by the server, if any
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref().filter(|m| !m.trim().is_empty()),
            _ => None,
        }
    }

    /// HTTP status, for status errors
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the backend rejected the credentials
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }

    /// Server message if present, otherwise `fallback`
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else if err.is_builder() {
            Self::Request(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status {
                status: status.as_u16(),
                message: None,
            }
        } else {
            Self::Network(err.to_string())
        }
    }
}
