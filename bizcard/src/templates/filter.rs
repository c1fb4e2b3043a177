//! Catalog filtering and search
//!
//! # Example
//!
//! ```rust
//! use bizcard::templates::{filter_templates, CategoryFilter, Template};
//!
//! fn visible<'a>(catalog: &'a [Template], tab: &str, search: &str) -> Vec<&'a Template> {
//!     filter_templates(catalog, CategoryFilter::parse(tab), search)
//! }
//! ```

use super::model::{Template, TemplateCategory};

/// Category selection on the catalog page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// The "all" tab
    #[default]
    All,
    /// One category
    Only(TemplateCategory),
    /// A category name outside the closed set; matches nothing
    Unknown,
}

impl CategoryFilter {
    /// Sentinel name of the "all" tab
    pub const ALL: &'static str = "all";

    /// Parse a tab name: `"all"`, a category name, or anything else
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value == Self::ALL {
            Self::All
        } else {
            TemplateCategory::parse(value).map_or(Self::Unknown, Self::Only)
        }
    }

    /// Whether a template in `category` passes this filter
    #[must_use]
    pub fn matches(self, category: TemplateCategory) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
            Self::Unknown => false,
        }
    }
}

impl From<TemplateCategory> for CategoryFilter {
    fn from(category: TemplateCategory) -> Self {
        Self::Only(category)
    }
}

/// Templates passing both the category filter and the search query
///
/// The query is trimmed and matched case-insensitively as a substring of the
/// name or the description; an empty query matches everything. Input order
/// is preserved.
#[must_use]
pub fn filter_templates<'a>(
    templates: &'a [Template],
    category: CategoryFilter,
    query: &str,
) -> Vec<&'a Template> {
    let needle = query.trim().to_lowercase();
    templates
        .iter()
        .filter(|t| category.matches(t.category))
        .filter(|t| matches_query(t, &needle))
        .collect()
}

/// Whether a template matches an already-lowercased search needle
#[must_use]
pub fn matches_query(template: &Template, needle: &str) -> bool {
    needle.is_empty()
        || template.name.to_lowercase().contains(needle)
        || template.description.to_lowercase().contains(needle)
}

/// Number of templates per category, in [`TemplateCategory::ALL`] order
#[must_use]
pub fn category_counts(templates: &[Template]) -> Vec<(TemplateCategory, usize)> {
    TemplateCategory::ALL
        .into_iter()
        .map(|category| {
            let count = templates.iter().filter(|t| t.category == category).count();
            (category, count)
        })
        .collect()
}
