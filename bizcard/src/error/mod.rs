//! Error types and error handling
//!
//! [`SubmitError`] and [`FetchError`] carry the message a page shows the
//! user: the server's `error` text when the backend supplied one, otherwise
//! a fixed fallback for the operation.

use thiserror::Error;

use crate::api::ApiError;
use crate::auth::TokenStoreError;
use crate::config::ConfigError;

/// A write operation (login, registration, create/update/delete) failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SubmitError {
    /// User-facing message
    pub message: String,
    /// Underlying transport error
    #[source]
    pub source: ApiError,
}

impl SubmitError {
    /// Wrap an API error, preferring the server's message over `fallback`
    #[must_use]
    pub fn from_api(source: ApiError, fallback: &str) -> Self {
        Self {
            message: source.user_message(fallback),
            source,
        }
    }
}

/// A read operation (template list, dashboard) failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FetchError {
    /// User-facing message
    pub message: String,
    /// Underlying transport error
    #[source]
    pub source: ApiError,
}

impl FetchError {
    /// Wrap an API error, preferring the server's message over `fallback`
    #[must_use]
    pub fn from_api(source: ApiError, fallback: &str) -> Self {
        Self {
            message: source.user_message(fallback),
            source,
        }
    }
}

/// Crate-wide error type
#[derive(Debug, Error)]
pub enum BizcardError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Backend error
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Submission failed
    #[error("Submission failed: {0}")]
    Submit(#[from] SubmitError),

    /// Fetch failed
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Token persistence error
    #[error("Session storage error: {0}")]
    TokenStore(#[from] TokenStoreError),
}
