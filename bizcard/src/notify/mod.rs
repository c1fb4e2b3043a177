//! User-facing notifications
//!
//! Mutations report their outcome through a [`Notifier`]. The default
//! [`FlashQueue`] collects messages until the UI drains them with
//! [`FlashQueue::take_flashes`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Notification severity level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    /// Success message (green)
    Success,
    /// Informational message (blue)
    Info,
    /// Warning message (yellow)
    Warning,
    /// Error message (red)
    Error,
}

impl FlashLevel {
    /// CSS class for this level
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "flash-success",
            Self::Info => "flash-info",
            Self::Warning => "flash-warning",
            Self::Error => "flash-error",
        }
    }
}

/// A one-time notification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlashMessage {
    /// Severity
    pub level: FlashLevel,
    /// Message text
    pub message: String,
    /// Optional title
    pub title: Option<String>,
    /// When the message was raised
    pub created_at: DateTime<Utc>,
}

impl FlashMessage {
    fn new(level: FlashLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            title: None,
            created_at: Utc::now(),
        }
    }

    /// Success notification
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Success, message)
    }

    /// Informational notification
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Info, message)
    }

    /// Warning notification
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Warning, message)
    }

    /// Error notification
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Error, message)
    }

    /// Set a title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// CSS class for this message
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        self.level.css_class()
    }
}

/// Sink for user-facing notifications
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    /// Raise a notification
    fn notify(&self, message: FlashMessage);
}

/// In-memory notification queue shared by clones
#[derive(Debug, Clone, Default)]
pub struct FlashQueue {
    messages: Arc<Mutex<Vec<FlashMessage>>>,
}

impl FlashQueue {
    /// Empty queue
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain every pending message, oldest first
    #[must_use]
    pub fn take_flashes(&self) -> Vec<FlashMessage> {
        std::mem::take(&mut *self.messages.lock())
    }

    /// Pending messages without draining
    #[must_use]
    pub fn peek(&self) -> Vec<FlashMessage> {
        self.messages.lock().clone()
    }

    /// Whether anything is pending
    #[must_use]
    pub fn has_flashes(&self) -> bool {
        !self.messages.lock().is_empty()
    }
}

impl Notifier for FlashQueue {
    fn notify(&self, message: FlashMessage) {
        tracing::debug!(level = ?message.level, message = %message.message, "notification");
        self.messages.lock().push(message);
    }
}
