//! Declarative field rules
//!
//! A [`ValidationRule`] is a bundle of optional checks built with a fluent
//! API. [`validate_field`](super::validate_field) evaluates the checks in a
//! fixed order and stops at the first failure:
//!
//! 1. required
//! 2. minimum length
//! 3. maximum length
//! 4. pattern
//! 5. email
//! 6. must match another field
//! 7. custom check
//!
//! # Example
//!
//! ```rust
//! use bizcard::forms::{RuleSet, ValidationRule};
//!
//! let rules = RuleSet::new()
//!     .field("email", ValidationRule::new().label("Email").required().email())
//!     .field("password", ValidationRule::new().label("Password").required().min_length(8))
//!     .field(
//!         "confirm_password",
//!         ValidationRule::new()
//!             .label("Confirm password")
//!             .required()
//!             .must_match("password", "Passwords do not match"),
//!     );
//!
//! assert_eq!(rules.len(), 3);
//! assert_eq!(rules.dependents_of("password"), vec!["confirm_password"]);
//! ```

use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Field name → raw input value
pub type FormValues = BTreeMap<String, String>;

/// Signature of a custom check
///
/// `Ok(None)` passes, `Ok(Some(message))` fails with `message`. An `Err`
/// (or a panic) counts as a failed validation with a generic message.
pub type CustomCheck =
    Arc<dyn Fn(&str, &FieldContext<'_>) -> anyhow::Result<Option<String>> + Send + Sync>;

/// Read-only view of the whole form, handed to context-aware checks
#[derive(Debug, Clone, Copy)]
pub struct FieldContext<'a> {
    values: Option<&'a FormValues>,
}

impl<'a> FieldContext<'a> {
    /// Context over the given form values
    #[must_use]
    pub const fn new(values: &'a FormValues) -> Self {
        Self {
            values: Some(values),
        }
    }

    /// Context with no other fields
    #[must_use]
    pub const fn empty() -> Self {
        Self { values: None }
    }

    /// Current value of another field (empty if absent)
    #[must_use]
    pub fn value(&self, field: &str) -> &'a str {
        self.values
            .and_then(|values| values.get(field))
            .map_or("", String::as_str)
    }
}

#[derive(Clone)]
pub(crate) struct PatternCheck {
    pub(crate) regex: Regex,
    pub(crate) message: String,
}

#[derive(Clone)]
pub(crate) struct MatchCheck {
    pub(crate) field: String,
    pub(crate) message: String,
}

/// Validation rule for a single field
#[derive(Clone, Default)]
pub struct ValidationRule {
    pub(crate) label: Option<String>,
    pub(crate) required: bool,
    pub(crate) required_message: Option<String>,
    pub(crate) min_length: Option<usize>,
    pub(crate) max_length: Option<usize>,
    pub(crate) pattern: Option<PatternCheck>,
    pub(crate) email: bool,
    pub(crate) must_match: Option<MatchCheck>,
    pub(crate) custom: Option<CustomCheck>,
}

impl ValidationRule {
    /// Create a rule with no checks (accepts anything)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Human-readable field name used in generated messages
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Reject empty or whitespace-only values
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Reject empty values with a custom message
    #[must_use]
    pub fn required_with(mut self, message: impl Into<String>) -> Self {
        self.required = true;
        self.required_message = Some(message.into());
        self
    }

    /// Minimum length in characters
    #[must_use]
    pub const fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Maximum length in characters
    #[must_use]
    pub const fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Require the value to match `regex` (anchor the pattern for whole-value matches)
    #[must_use]
    pub fn pattern(mut self, regex: Regex, message: impl Into<String>) -> Self {
        self.pattern = Some(PatternCheck {
            regex,
            message: message.into(),
        });
        self
    }

    /// Require a syntactically valid email address
    #[must_use]
    pub const fn email(mut self) -> Self {
        self.email = true;
        self
    }

    /// Require the value to equal the current value of `field`
    ///
    /// The other field is read at validation time, so the rule tracks edits
    /// to that field without being rebuilt.
    #[must_use]
    pub fn must_match(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.must_match = Some(MatchCheck {
            field: field.into(),
            message: message.into(),
        });
        self
    }

    /// Attach a custom check, evaluated last
    ///
    /// Like every other check it is skipped when the field is optional and
    /// empty.
    #[must_use]
    pub fn custom<F>(mut self, check: F) -> Self
    where
        F: Fn(&str, &FieldContext<'_>) -> anyhow::Result<Option<String>> + Send + Sync + 'static,
    {
        self.custom = Some(Arc::new(check));
        self
    }

    /// Whether the rule rejects empty values
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Field this rule mirrors, if any
    #[must_use]
    pub fn matches_field(&self) -> Option<&str> {
        self.must_match.as_ref().map(|m| m.field.as_str())
    }

    pub(crate) fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or("This field")
    }
}

impl fmt::Debug for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRule")
            .field("label", &self.label)
            .field("required", &self.required)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("pattern", &self.pattern.as_ref().map(|p| p.regex.as_str()))
            .field("email", &self.email)
            .field("must_match", &self.matches_field())
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

/// Ordered set of field rules for one form
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<(String, ValidationRule)>,
}

impl RuleSet {
    /// Create an empty rule set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the rule for a field
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, rule: ValidationRule) -> Self {
        self.insert(name, rule);
        self
    }

    /// Add (or replace) the rule for a field in place
    pub fn insert(&mut self, name: impl Into<String>, rule: ValidationRule) {
        let name = name.into();
        if let Some(slot) = self.rules.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = rule;
        } else {
            self.rules.push((name, rule));
        }
    }

    /// Rule for a field
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&ValidationRule> {
        self.rules
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, rule)| rule)
    }

    /// Field names in declaration order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|(name, _)| name.as_str())
    }

    /// Iterate over `(field, rule)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValidationRule)> {
        self.rules.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    /// Fields whose rule mirrors `field`
    #[must_use]
    pub fn dependents_of(&self, field: &str) -> Vec<&str> {
        self.rules
            .iter()
            .filter(|(_, rule)| rule.matches_field() == Some(field))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Number of fields with rules
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set has no rules
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
