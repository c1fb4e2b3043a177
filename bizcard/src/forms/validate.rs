//! Field and form validation
//!
//! Both entry points are pure. A check that misbehaves (a custom check that
//! errors or panics) fails the field with [`GENERIC_ERROR`] instead of
//! propagating.

use std::panic::{catch_unwind, AssertUnwindSafe};

use validator::ValidateEmail;

use super::error::ValidationErrors;
use super::rule::{FieldContext, FormValues, RuleSet, ValidationRule};

/// Message used when a rule cannot be evaluated
pub const GENERIC_ERROR: &str = "This field is invalid";

/// Outcome of validating one field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldValidation {
    /// Message of the first failing check
    pub error: Option<String>,
}

impl FieldValidation {
    /// A passing outcome
    #[must_use]
    pub const fn valid() -> Self {
        Self { error: None }
    }

    /// A failing outcome
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
        }
    }

    /// Whether every check passed
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcome of validating a whole form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormValidation {
    /// One error per failing field
    pub errors: ValidationErrors,
}

impl FormValidation {
    /// True iff no field failed
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a value against a rule without access to other fields
///
/// Rules that mirror another field compare against an empty value.
///
/// # Example
///
/// ```rust
/// use bizcard::forms::{validate_field, ValidationRule};
///
/// let rule = ValidationRule::new().label("Email").required();
/// assert_eq!(validate_field("", &rule).error.as_deref(), Some("Email is required"));
/// assert!(validate_field("x", &rule).is_valid());
/// ```
#[must_use]
pub fn validate_field(value: &str, rule: &ValidationRule) -> FieldValidation {
    validate_field_with(value, rule, &FieldContext::empty())
}

/// Validate a value against a rule, reading other fields from `context`
#[must_use]
pub fn validate_field_with(
    value: &str,
    rule: &ValidationRule,
    context: &FieldContext<'_>,
) -> FieldValidation {
    let label = rule.display_label();

    if value.trim().is_empty() {
        if rule.required {
            return FieldValidation::invalid(
                rule.required_message
                    .clone()
                    .unwrap_or_else(|| format!("{label} is required")),
            );
        }
        return FieldValidation::valid();
    }

    let length = value.chars().count();
    if let Some(min) = rule.min_length {
        if length < min {
            return FieldValidation::invalid(format!(
                "{label} must be at least {min} characters"
            ));
        }
    }
    if let Some(max) = rule.max_length {
        if length > max {
            return FieldValidation::invalid(format!(
                "{label} must be at most {max} characters"
            ));
        }
    }

    if let Some(pattern) = &rule.pattern {
        if !pattern.regex.is_match(value) {
            return FieldValidation::invalid(pattern.message.clone());
        }
    }

    if rule.email && !value.validate_email() {
        return FieldValidation::invalid("Please enter a valid email address");
    }

    if let Some(check) = &rule.must_match {
        if value != context.value(&check.field) {
            return FieldValidation::invalid(check.message.clone());
        }
    }

    if let Some(custom) = &rule.custom {
        return match catch_unwind(AssertUnwindSafe(|| custom(value, context))) {
            Ok(Ok(None)) => FieldValidation::valid(),
            Ok(Ok(Some(message))) => FieldValidation::invalid(message),
            Ok(Err(error)) => {
                tracing::warn!(field = label, %error, "custom validation check failed");
                FieldValidation::invalid(GENERIC_ERROR)
            }
            Err(_) => {
                tracing::warn!(field = label, "custom validation check panicked");
                FieldValidation::invalid(GENERIC_ERROR)
            }
        };
    }

    FieldValidation::valid()
}

/// Validate every field named in `rules` against `values`
///
/// Missing values are validated as empty strings.
#[must_use]
pub fn validate_form(values: &FormValues, rules: &RuleSet) -> FormValidation {
    let context = FieldContext::new(values);
    let mut errors = ValidationErrors::new();

    for (field, rule) in rules.iter() {
        let value = values.get(field).map_or("", String::as_str);
        if let Some(message) = validate_field_with(value, rule, &context).error {
            errors.add(field, message);
        }
    }

    FormValidation { errors }
}
