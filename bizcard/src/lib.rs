//! bizcard: client-side data, validation and session layer for the bizcard
//! digital business card platform
//!
//! The web frontend's pages (login, registration, dashboard, template catalog
//! and template administration) are thin views over this crate:
//! - **Forms**: declarative field rules, form state and validation
//! - **Auth**: session lifecycle, token persistence, password strength
//! - **Templates**: catalog model and filtering
//! - **Mutations**: create/update/delete coordination with cache invalidation
//!   and user-facing notifications
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use bizcard::prelude::*;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = BizcardConfig::load()?;
//! let ctx = AppContext::new(config)?;
//! ctx.session().restore().await;
//!
//! let mut login = LoginPage::new();
//! login.form_mut().set_value("email", "ada@example.com");
//! login.form_mut().set_value("password", "correct-horse");
//!
//! match login.submit(ctx.session()).await {
//!     SubmitOutcome::Succeeded(user) => tracing::info!(user = %user.name, "logged in"),
//!     other => tracing::warn!(?other, "login did not complete"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! Pages collect input into a [`forms::FormState`], validate it, then hand
//! off to the [`auth::SessionStore`] or the [`mutation::MutationCoordinator`].
//! Both talk to the backend through the traits in [`api`], and read-side
//! data flows through the process-wide [`cache::QueryCache`].

#![allow(clippy::missing_errors_doc)]

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod context;
pub mod error;
pub mod forms;
pub mod mutation;
pub mod notify;
pub mod observability;
pub mod pages;
pub mod templates;

pub mod prelude {
    //! Convenience re-exports for common types and traits
    //!
    //! # Examples
    //!
    //! ```rust
    //! use bizcard::prelude::*;
    //! ```

    // Forms
    pub use crate::forms::{
        validate_field, validate_form, FieldValidation, FormState, FormValidation, RuleSet,
        SubmitLatch, ValidationErrors, ValidationRule,
    };

    // Authentication
    pub use crate::auth::{
        password_strength, AuthToken, PasswordStrength, SessionState, SessionStore,
        StrengthLabel, User,
    };

    // Templates
    pub use crate::templates::{filter_templates, CategoryFilter, Template, TemplateCategory};

    // Mutations and notifications
    pub use crate::mutation::{ConfirmedDelete, MutationCoordinator, PendingDelete, TemplateAdmin};
    pub use crate::notify::{FlashLevel, FlashMessage, FlashQueue, Notifier};

    // Pages
    pub use crate::pages::{
        DashboardPage, LoginPage, PageLifecycle, RegisterPage, SubmitOutcome, TemplateEditorPage,
        TemplatesPage,
    };

    // Errors
    pub use crate::error::{BizcardError, FetchError, SubmitError};

    // Configuration and context
    pub use crate::config::BizcardConfig;
    pub use crate::context::AppContext;
}
