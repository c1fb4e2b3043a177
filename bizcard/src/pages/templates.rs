//! Template catalog page

use std::sync::Arc;

use super::PageLifecycle;
use crate::api::TemplateApi;
use crate::cache::QueryCache;
use crate::error::FetchError;
use crate::templates::{category_counts, filter_templates, CategoryFilter, Template, TemplateCategory};

/// Shown when the catalog cannot be loaded and the server says nothing
pub const TEMPLATES_LOAD_FAILED: &str = "Could not load templates. Please try again.";

/// Browsable template catalog with category tabs and search
#[derive(Debug, Clone, Default)]
pub struct TemplatesPage {
    templates: Arc<Vec<Template>>,
    category: CategoryFilter,
    query: String,
    error: Option<String>,
    lifecycle: PageLifecycle,
}

impl TemplatesPage {
    /// Empty catalog, all categories, no search
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a category tab by its value (`"all"` or a category name)
    pub fn set_category(&mut self, value: &str) {
        self.category = CategoryFilter::parse(value);
    }

    /// Current category filter
    #[must_use]
    pub const fn category(&self) -> CategoryFilter {
        self.category
    }

    /// Update the search box
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Current search text
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Load the catalog through the cache
    ///
    /// On failure the catalog is empty and [`error`](Self::error) holds the
    /// message to show.
    pub async fn load(&mut self, cache: &QueryCache, api: &dyn TemplateApi) {
        let result = cache
            .templates()
            .get_or_fetch(|| async {
                api.list_templates()
                    .await
                    .map_err(|e| FetchError::from_api(e, TEMPLATES_LOAD_FAILED))
            })
            .await;
        self.apply(result);
    }

    /// Load the catalog from the backend, bypassing the cache
    pub async fn reload(&mut self, cache: &QueryCache, api: &dyn TemplateApi) {
        let result = cache
            .templates()
            .refresh(|| async {
                api.list_templates()
                    .await
                    .map_err(|e| FetchError::from_api(e, TEMPLATES_LOAD_FAILED))
            })
            .await;
        self.apply(result);
    }

    fn apply(&mut self, result: Result<Arc<Vec<Template>>, FetchError>) {
        if !self.lifecycle.is_mounted() {
            return;
        }
        match result {
            Ok(templates) => {
                self.templates = templates;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e.source, "template catalog unavailable");
                self.templates = Arc::default();
                self.error = Some(e.message);
            }
        }
    }

    /// Every loaded template
    #[must_use]
    pub fn all(&self) -> &[Template] {
        &self.templates
    }

    /// Templates matching the selected category and search text, in
    /// catalog order
    #[must_use]
    pub fn visible(&self) -> Vec<&Template> {
        filter_templates(&self.templates, self.category, &self.query)
    }

    /// Count per category, for the tab badges
    #[must_use]
    pub fn counts(&self) -> Vec<(TemplateCategory, usize)> {
        category_counts(&self.templates)
    }

    /// Load error to show instead of the catalog
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Mounted flag
    #[must_use]
    pub const fn lifecycle(&self) -> &PageLifecycle {
        &self.lifecycle
    }
}
