//! Template catalog types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::api::ResourceId;
use crate::forms::{rules::template_rules, validate_form, FormValues, ValidationErrors};

/// Closed set of template categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    /// Corporate and professional layouts
    Business,
    /// Artistic layouts
    Creative,
    /// Tech industry layouts
    Technology,
    /// Medical practice layouts
    Healthcare,
    /// Schools and educators
    Education,
    /// Sparse, typography-first layouts
    Minimal,
}

impl TemplateCategory {
    /// Every category, in display order
    pub const ALL: [Self; 6] = [
        Self::Business,
        Self::Creative,
        Self::Technology,
        Self::Healthcare,
        Self::Education,
        Self::Minimal,
    ];

    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Business => "business",
            Self::Creative => "creative",
            Self::Technology => "technology",
            Self::Healthcare => "healthcare",
            Self::Education => "education",
            Self::Minimal => "minimal",
        }
    }

    /// Parse a wire name (exact match)
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Business => "Business",
            Self::Creative => "Creative",
            Self::Technology => "Technology",
            Self::Healthcare => "Healthcare",
            Self::Education => "Education",
            Self::Minimal => "Minimal",
        }
    }

    /// Icon name shown on category tabs
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Business => "briefcase",
            Self::Creative => "palette",
            Self::Technology => "cpu",
            Self::Healthcare => "heart-pulse",
            Self::Education => "graduation-cap",
            Self::Minimal => "square",
        }
    }

    /// Badge color token
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Business => "blue",
            Self::Creative => "purple",
            Self::Technology => "indigo",
            Self::Healthcare => "red",
            Self::Education => "green",
            Self::Minimal => "gray",
        }
    }
}

impl fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Error for a category name outside the closed set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown template category: {0}")]
pub struct UnknownCategory(pub String);

/// Default color scheme of a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScheme {
    /// Primary brand color
    pub primary: String,
    /// Secondary accent color
    pub secondary: String,
    /// Body text color
    pub text: String,
    /// Card background color
    pub background: String,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            primary: "#1e40af".to_string(),
            secondary: "#64748b".to_string(),
            text: "#111827".to_string(),
            background: "#ffffff".to_string(),
        }
    }
}

/// Default fonts of a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontPair {
    /// Heading font family
    pub heading: String,
    /// Body font family
    pub body: String,
}

impl Default for FontPair {
    fn default() -> Self {
        Self {
            heading: "Inter".to_string(),
            body: "Inter".to_string(),
        }
    }
}

/// A reusable visual preset for a business card profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Backend identifier
    pub id: ResourceId,
    /// Display name
    pub name: String,
    /// Short description
    #[serde(default)]
    pub description: String,
    /// Category
    pub category: TemplateCategory,
    /// Requires a paid plan
    #[serde(default)]
    pub is_premium: bool,
    /// Offered to users
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Preview image URL
    #[serde(default)]
    pub thumbnail: String,
    /// Default colors
    #[serde(default)]
    pub default_colors: ColorScheme,
    /// Default fonts
    #[serde(default)]
    pub default_fonts: FontPair,
    /// Feature bullet points, in display order
    #[serde(default)]
    pub features: Vec<String>,
    /// Number of profiles using the template
    #[serde(default)]
    pub usage_count: u64,
}

const fn default_active() -> bool {
    true
}

/// Payload for creating or updating a template
///
/// Per-field checks live in [`template_rules`]; the derive only checks the
/// assembled feature list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TemplateInput {
    /// Display name
    pub name: String,
    /// Short description
    pub description: String,
    /// Category
    pub category: TemplateCategory,
    /// Requires a paid plan
    pub is_premium: bool,
    /// Offered to users
    pub is_active: bool,
    /// Preview image URL
    pub thumbnail: String,
    /// Default colors
    pub default_colors: ColorScheme,
    /// Default fonts
    pub default_fonts: FontPair,
    /// Feature bullet points
    #[validate(length(max = 12, message = "A template can list at most 12 features"))]
    pub features: Vec<String>,
}

impl TemplateInput {
    /// Build a payload from the admin template form
    ///
    /// Field names match [`template_rules`]; `is_premium` and `is_active`
    /// are `"true"`/`"false"`, `features` is one feature per line, and the
    /// optional `heading_font`/`body_font` fall back to the defaults.
    pub fn from_form(values: &FormValues) -> Result<Self, ValidationErrors> {
        let validation = validate_form(values, &template_rules());
        let get = |field: &str| values.get(field).map_or("", |v| v.trim());
        let font = |field: &str, fallback: String| {
            let value = get(field);
            if value.is_empty() {
                fallback
            } else {
                value.to_string()
            }
        };
        let defaults = FontPair::default();

        // The category rule rejects anything `parse` does not accept
        let category = match (validation.is_valid(), TemplateCategory::parse(get("category"))) {
            (true, Some(category)) => category,
            _ => return Err(validation.errors),
        };

        let input = Self {
            name: get("name").to_string(),
            description: get("description").to_string(),
            category,
            is_premium: get("is_premium") == "true",
            is_active: get("is_active") != "false",
            thumbnail: get("thumbnail").to_string(),
            default_colors: ColorScheme {
                primary: get("primary_color").to_string(),
                secondary: get("secondary_color").to_string(),
                text: get("text_color").to_string(),
                background: get("background_color").to_string(),
            },
            default_fonts: FontPair {
                heading: font("heading_font", defaults.heading),
                body: font("body_font", defaults.body),
            },
            features: get("features")
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
        };

        input.validate().map_err(ValidationErrors::from)?;
        Ok(input)
    }
}
