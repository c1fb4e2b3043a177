//! Form state and validation
//!
//! This module provides:
//! - Declarative per-field rules ([`ValidationRule`], [`RuleSet`])
//! - Pure field and form validation ([`validate_field`], [`validate_form`])
//! - Per-form state with touched tracking ([`FormState`])
//! - A latch that blocks double submission ([`SubmitLatch`])
//! - Ready-made rule sets for the platform's forms ([`rules`])
//!
//! # Quick Start
//!
//! ```rust
//! use bizcard::forms::{rules, FormState};
//!
//! let mut form = FormState::new(rules::register_rules());
//! form.set_value("password", "abc");
//! form.set_value("confirm_password", "xyz");
//!
//! assert!(!form.validate_all());
//! assert_eq!(form.error("confirm_password"), Some(rules::PASSWORD_MISMATCH));
//! ```

mod error;
mod latch;
mod rule;
pub mod rules;
mod state;
mod validate;

pub use error::{FieldError, ValidationErrors};
pub use latch::{SubmitGuard, SubmitLatch};
pub use rule::{CustomCheck, FieldContext, FormValues, RuleSet, ValidationRule};
pub use state::FormState;
pub use validate::{
    validate_field, validate_field_with, validate_form, FieldValidation, FormValidation,
    GENERIC_ERROR,
};
