//! Per-form input state
//!
//! `FormState` owns the raw values, the inline errors and the set of touched
//! fields for one rendered form. Every field named by the rule set is present
//! in `values` from construction, and errors are only ever recorded for
//! fields present in `values`.

use std::collections::BTreeSet;

use super::error::ValidationErrors;
use super::latch::SubmitLatch;
use super::rule::{FieldContext, FormValues, RuleSet};
use super::validate::{validate_field_with, validate_form};

/// Values, errors and touched fields for one form
#[derive(Debug, Clone, Default)]
pub struct FormState {
    rules: RuleSet,
    values: FormValues,
    errors: ValidationErrors,
    touched: BTreeSet<String>,
    latch: SubmitLatch,
}

impl FormState {
    /// Create a form whose fields are the ones named by `rules`
    #[must_use]
    pub fn new(rules: RuleSet) -> Self {
        let values = rules
            .fields()
            .map(|field| (field.to_string(), String::new()))
            .collect();
        Self {
            rules,
            values,
            ..Self::default()
        }
    }

    /// Update a field value
    ///
    /// Touched fields are re-validated immediately, as are touched fields
    /// that mirror this one (a confirmation field follows its original).
    pub fn set_value(&mut self, field: &str, value: impl Into<String>) {
        self.values.insert(field.to_string(), value.into());

        if self.touched.contains(field) {
            self.revalidate(field);
        }

        let dependents: Vec<String> = self
            .rules
            .dependents_of(field)
            .into_iter()
            .filter(|dependent| self.touched.contains(*dependent))
            .map(str::to_string)
            .collect();
        for dependent in dependents {
            self.revalidate(&dependent);
        }
    }

    /// Mark a field as touched and validate it
    pub fn blur(&mut self, field: &str) {
        if !self.values.contains_key(field) {
            return;
        }
        self.touched.insert(field.to_string());
        self.revalidate(field);
    }

    /// Validate every field, mark them all touched, and report validity
    pub fn validate_all(&mut self) -> bool {
        self.touched
            .extend(self.rules.fields().map(str::to_string));
        self.errors = validate_form(&self.values, &self.rules).errors;
        self.errors.is_empty()
    }

    /// Record an error reported by the server for a known field
    ///
    /// Returns `false` (and records nothing) if the form has no such field.
    pub fn set_error(&mut self, field: &str, message: impl Into<String>) -> bool {
        if !self.values.contains_key(field) {
            return false;
        }
        self.errors.set(field, message);
        true
    }

    /// Swap in a new rule set, keeping entered values
    pub fn replace_rules(&mut self, rules: RuleSet) {
        for field in rules.fields() {
            self.values.entry(field.to_string()).or_default();
        }
        self.rules = rules;
        let touched: Vec<String> = self.touched.iter().cloned().collect();
        for field in touched {
            self.revalidate(&field);
        }
    }

    /// Clear values, errors and touched state
    pub fn reset(&mut self) {
        for value in self.values.values_mut() {
            value.clear();
        }
        self.errors.clear();
        self.touched.clear();
    }

    /// Current value of a field (empty if unknown)
    #[must_use]
    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map_or("", String::as_str)
    }

    /// All current values
    #[must_use]
    pub const fn values(&self) -> &FormValues {
        &self.values
    }

    /// Inline error for a field
    #[must_use]
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.message(field)
    }

    /// All inline errors
    #[must_use]
    pub const fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Whether the user has interacted with a field
    #[must_use]
    pub fn is_touched(&self, field: &str) -> bool {
        self.touched.contains(field)
    }

    /// Whether no inline errors are showing
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The form's rules
    #[must_use]
    pub const fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// The form's submission latch
    #[must_use]
    pub const fn latch(&self) -> &SubmitLatch {
        &self.latch
    }

    fn revalidate(&mut self, field: &str) {
        let Some(rule) = self.rules.get(field) else {
            self.errors.remove(field);
            return;
        };
        let value = self.values.get(field).map_or("", String::as_str);
        let outcome = validate_field_with(value, rule, &FieldContext::new(&self.values));
        match outcome.error {
            Some(message) => self.errors.set(field, message),
            None => {
                self.errors.remove(field);
            }
        }
    }
}
