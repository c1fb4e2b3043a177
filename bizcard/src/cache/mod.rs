//! Query cache for read-side data
//!
//! Each [`CachedQuery`] slot holds at most one value and a generation
//! counter. Mutations invalidate slots rather than patching them; a fetch
//! that began before an invalidation returns its result to the caller but
//! does not store it.

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::api::DashboardStats;
use crate::templates::Template;

struct Slot<T> {
    value: Option<Arc<T>>,
    fetched_at: Option<DateTime<Utc>>,
    generation: u64,
}

/// One cached query result, shared by clones
pub struct CachedQuery<T> {
    slot: Arc<RwLock<Slot<T>>>,
}

impl<T> Clone for CachedQuery<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> Default for CachedQuery<T> {
    fn default() -> Self {
        Self {
            slot: Arc::new(RwLock::new(Slot {
                value: None,
                fetched_at: None,
                generation: 0,
            })),
        }
    }
}

impl<T> std::fmt::Debug for CachedQuery<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slot = self.slot.read();
        f.debug_struct("CachedQuery")
            .field("cached", &slot.value.is_some())
            .field("generation", &slot.generation)
            .field("fetched_at", &slot.fetched_at)
            .finish()
    }
}

impl<T> CachedQuery<T> {
    /// Empty slot
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value, if any
    #[must_use]
    pub fn peek(&self) -> Option<Arc<T>> {
        self.slot.read().value.clone()
    }

    /// When the cached value was stored
    #[must_use]
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.slot.read().fetched_at
    }

    /// Number of invalidations so far
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.slot.read().generation
    }

    /// Drop the cached value and bump the generation
    pub fn invalidate(&self) {
        let mut slot = self.slot.write();
        slot.value = None;
        slot.fetched_at = None;
        slot.generation += 1;
    }

    /// Return the cached value or run `fetch` and cache its result
    pub async fn get_or_fetch<F, Fut, E>(&self, fetch: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(value) = self.peek() {
            return Ok(value);
        }
        self.refresh(fetch).await
    }

    /// Run `fetch` unconditionally and cache its result
    pub async fn refresh<F, Fut, E>(&self, fetch: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let started_at = self.generation();
        let value = Arc::new(fetch().await?);

        let mut slot = self.slot.write();
        if slot.generation == started_at {
            slot.value = Some(Arc::clone(&value));
            slot.fetched_at = Some(Utc::now());
        } else {
            tracing::debug!(
                started_at,
                current = slot.generation,
                "discarding result fetched before invalidation"
            );
        }
        Ok(value)
    }
}

/// Cache keys mutations can invalidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// `GET /templates`
    Templates,
    /// `GET /dashboard`
    Dashboard,
}

/// Process-wide cache of backend reads
#[derive(Debug, Clone, Default)]
pub struct QueryCache {
    templates: CachedQuery<Vec<Template>>,
    dashboard: CachedQuery<DashboardStats>,
}

impl QueryCache {
    /// Empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Template list slot
    #[must_use]
    pub const fn templates(&self) -> &CachedQuery<Vec<Template>> {
        &self.templates
    }

    /// Dashboard slot
    #[must_use]
    pub const fn dashboard(&self) -> &CachedQuery<DashboardStats> {
        &self.dashboard
    }

    /// Invalidate one key
    pub fn invalidate(&self, key: QueryKey) {
        tracing::debug!(?key, "invalidating cached query");
        match key {
            QueryKey::Templates => self.templates.invalidate(),
            QueryKey::Dashboard => self.dashboard.invalidate(),
        }
    }

    /// Invalidate every key
    pub fn clear(&self) {
        self.invalidate(QueryKey::Templates);
        self.invalidate(QueryKey::Dashboard);
    }
}
