//! Page controllers
//!
//! Each page owns its form state and its user-visible messages, and turns
//! every failure into either inline field errors or a banner string. Views
//! render from these controllers and never see an error type.
//!
//! A page drops results that arrive after it was unmounted (see
//! [`PageLifecycle`]).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::auth::User;

mod dashboard;
mod editor;
mod login;
mod register;
mod templates;

pub use dashboard::{DashboardPage, DASHBOARD_LOAD_FAILED};
pub use editor::TemplateEditorPage;
pub use login::LoginPage;
pub use register::RegisterPage;
pub use templates::{TemplatesPage, TEMPLATES_LOAD_FAILED};

/// Mounted flag shared between a page and the view showing it
#[derive(Debug, Clone)]
pub struct PageLifecycle {
    mounted: Arc<AtomicBool>,
}

impl Default for PageLifecycle {
    fn default() -> Self {
        Self {
            mounted: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl PageLifecycle {
    /// Mounted lifecycle
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the page is still on screen
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    /// The view went away; in-flight results will be dropped
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::Release);
    }
}

/// What happened to a form submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome<T = User> {
    /// Client-side validation failed; inline errors are set
    Invalid,
    /// A submission from this form is already running
    Busy,
    /// The backend rejected it; the message is also the page banner
    Failed(String),
    /// Done
    Succeeded(T),
    /// The page was unmounted before the result arrived
    Discarded,
}

impl<T> SubmitOutcome<T> {
    /// Whether the submission went through
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }
}
