//! Rule sets for the platform's forms

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidateUrl;

use super::rule::{RuleSet, ValidationRule};

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length accepted at registration
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Message shown when the confirmation does not match the password
pub const PASSWORD_MISMATCH: &str = "Passwords do not match";

/// Message shown when the terms of service were not accepted
pub const TERMS_NOT_ACCEPTED: &str = "You must accept the terms of service";

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid regex"));

/// Login form: `email`, `password`
#[must_use]
pub fn login_rules() -> RuleSet {
    RuleSet::new()
        .field("email", ValidationRule::new().label("Email").required().email())
        .field("password", ValidationRule::new().label("Password").required())
}

/// Registration form: `name`, `email`, `password`, `confirm_password`,
/// `accept_terms`
///
/// `accept_terms` holds `"true"` when the box is ticked.
#[must_use]
pub fn register_rules() -> RuleSet {
    RuleSet::new()
        .field(
            "name",
            ValidationRule::new()
                .label("Name")
                .required()
                .min_length(2)
                .max_length(80),
        )
        .field("email", ValidationRule::new().label("Email").required().email())
        .field(
            "password",
            ValidationRule::new()
                .label("Password")
                .required()
                .min_length(MIN_PASSWORD_LENGTH)
                .max_length(MAX_PASSWORD_LENGTH),
        )
        .field(
            "confirm_password",
            ValidationRule::new()
                .label("Confirm password")
                .required_with("Please confirm your password")
                .must_match("password", PASSWORD_MISMATCH),
        )
        .field(
            "accept_terms",
            ValidationRule::new()
                .required_with(TERMS_NOT_ACCEPTED)
                .custom(|value, _| Ok((value != "true").then(|| TERMS_NOT_ACCEPTED.to_string()))),
        )
}

/// Admin template form
#[must_use]
pub fn template_rules() -> RuleSet {
    let color = |label: &str| {
        ValidationRule::new()
            .label(label)
            .required()
            .pattern(HEX_COLOR.clone(), format!("{label} must be a hex color like #1a2b3c"))
    };

    RuleSet::new()
        .field(
            "name",
            ValidationRule::new().label("Name").required().max_length(80),
        )
        .field(
            "description",
            ValidationRule::new().label("Description").max_length(500),
        )
        .field(
            "category",
            ValidationRule::new().label("Category").required().custom(|value, _| {
                Ok(crate::templates::TemplateCategory::parse(value)
                    .is_none()
                    .then(|| "Choose a valid category".to_string()))
            }),
        )
        .field(
            "thumbnail",
            ValidationRule::new()
                .label("Thumbnail")
                .required()
                .custom(|value, _| {
                    Ok((!value.validate_url()).then(|| "Thumbnail must be a valid URL".to_string()))
                }),
        )
        .field("primary_color", color("Primary color"))
        .field("secondary_color", color("Secondary color"))
        .field("text_color", color("Text color"))
        .field("background_color", color("Background color"))
}
