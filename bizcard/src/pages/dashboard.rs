//! Dashboard page

use super::PageLifecycle;
use crate::api::{DashboardApi, DashboardStats};
use crate::auth::User;
use crate::cache::QueryCache;
use crate::error::FetchError;

/// Shown when the dashboard cannot be loaded and the server says nothing
pub const DASHBOARD_LOAD_FAILED: &str = "Could not load your dashboard. Showing empty stats.";

/// Account overview: totals, recent profiles and recent activity
///
/// If loading fails the page shows all-zero stats together with an error
/// message, never a blank page.
#[derive(Debug, Clone, Default)]
pub struct DashboardPage {
    stats: DashboardStats,
    error: Option<String>,
    loaded: bool,
    lifecycle: PageLifecycle,
}

impl DashboardPage {
    /// Page with zero stats, not yet loaded
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch stats through the cache
    pub async fn load(&mut self, cache: &QueryCache, api: &dyn DashboardApi) {
        let result = cache
            .dashboard()
            .get_or_fetch(|| async {
                api.dashboard()
                    .await
                    .map_err(|e| FetchError::from_api(e, DASHBOARD_LOAD_FAILED))
            })
            .await;

        if !self.lifecycle.is_mounted() {
            return;
        }
        self.loaded = true;
        match result {
            Ok(stats) => {
                self.stats = (*stats).clone();
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e.source, "dashboard unavailable, showing fallback");
                self.stats = DashboardStats::default();
                self.error = Some(e.message);
            }
        }
    }

    /// Stats to render
    #[must_use]
    pub const fn stats(&self) -> &DashboardStats {
        &self.stats
    }

    /// Load error shown above the fallback stats
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a load has completed (successfully or not)
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Header greeting
    #[must_use]
    pub fn greeting(user: &User) -> String {
        format!("Welcome back, {}", user.display_name())
    }

    /// Mounted flag
    #[must_use]
    pub const fn lifecycle(&self) -> &PageLifecycle {
        &self.lifecycle
    }
}
