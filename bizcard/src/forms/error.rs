//! Form validation error types
//!
//! A form reports at most one error per field: validation short-circuits on
//! the first failing rule, so the map holds the message of that rule.

use std::collections::BTreeMap;

/// A single validation error for a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The error message
    pub message: String,
}

impl FieldError {
    /// Create a field error
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Validation errors keyed by field name
///
/// # Examples
///
/// ```rust
/// use bizcard::forms::ValidationErrors;
///
/// let mut errors = ValidationErrors::new();
/// errors.add("email", "Email is required");
/// errors.add("email", "Email is invalid");
/// errors.add("password", "Password is required");
///
/// assert!(!errors.is_empty());
/// // The first message recorded for a field wins
/// assert_eq!(errors.message("email"), Some("Email is required"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<String, FieldError>,
}

impl ValidationErrors {
    /// Create a new empty error collection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an error for a field unless one is already recorded
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_insert_with(|| FieldError::new(message));
    }

    /// Set the error for a field, replacing any existing one
    pub fn set(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(field.into(), FieldError::new(message));
    }

    /// Remove the error for a field
    pub fn remove(&mut self, field: &str) -> Option<FieldError> {
        self.errors.remove(field)
    }

    /// Check if the collection is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the error message for a specific field
    #[must_use]
    pub fn message(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(|e| e.message.as_str())
    }

    /// Get all field names that have errors, in name order
    #[must_use]
    pub fn fields_with_errors(&self) -> Vec<&str> {
        self.errors.keys().map(String::as_str).collect()
    }

    /// Get the number of fields with errors
    #[must_use]
    pub fn count(&self) -> usize {
        self.errors.len()
    }

    /// Clear all errors
    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Iterate over all errors in field-name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldError)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Convert from validator crate's `ValidationErrors`
///
/// Only the first error reported for each field is kept. An error without a
/// message is reported by its code.
impl From<validator::ValidationErrors> for ValidationErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut result = Self::new();
        for (field, field_errors) in errors.field_errors() {
            if let Some(error) = field_errors.first() {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string);
                result.add(field.to_string(), message);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_error() {
        let error = FieldError::new("is required");
        assert_eq!(error.message, "is required");
        assert_eq!(error.to_string(), "is required");
    }

    #[test]
    fn test_validation_errors_new() {
        let errors = ValidationErrors::new();
        assert!(errors.is_empty());
        assert_eq!(errors.count(), 0);
    }

    #[test]
    fn test_first_error_wins() {
        let mut errors = ValidationErrors::new();
        errors.add("email", "is required");
        errors.add("email", "is invalid");

        assert_eq!(errors.message("email"), Some("is required"));
        assert_eq!(errors.message("password"), None);
        assert_eq!(errors.count(), 1);
    }

    #[test]
    fn test_set_replaces() {
        let mut errors = ValidationErrors::new();
        errors.add("email", "is required");
        errors.set("email", "already taken");
        assert_eq!(errors.message("email"), Some("already taken"));
    }

    #[test]
    fn test_remove() {
        let mut errors = ValidationErrors::new();
        errors.add("email", "is required");
        assert!(errors.remove("email").is_some());
        assert!(errors.is_empty());
        assert!(errors.remove("email").is_none());
    }

    #[test]
    fn test_fields_with_errors_sorted() {
        let mut errors = ValidationErrors::new();
        errors.add("password", "too short");
        errors.add("email", "is required");

        assert_eq!(errors.fields_with_errors(), vec!["email", "password"]);
    }

    #[test]
    fn test_from_validator_errors() {
        use validator::Validate;

        #[derive(Validate)]
        struct Signup {
            #[validate(email(message = "Enter a valid email address"))]
            email: String,
            #[validate(length(min = 8))]
            password: String,
        }

        let signup = Signup {
            email: "nope".to_string(),
            password: "short".to_string(),
        };
        let errors: ValidationErrors = signup.validate().unwrap_err().into();

        assert_eq!(errors.message("email"), Some("Enter a valid email address"));
        assert_eq!(errors.message("password"), Some("length"));
    }
}
