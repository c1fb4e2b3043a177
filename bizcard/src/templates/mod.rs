//! Template catalog: model, filtering and admin payloads

mod filter;
mod model;

pub use filter::{category_counts, filter_templates, matches_query, CategoryFilter};
pub use model::{
    ColorScheme, FontPair, Template, TemplateCategory, TemplateInput, UnknownCategory,
};
