//! Application context
//!
//! [`AppContext`] is the one place the session, the query cache, the
//! notification queue and the backend handles are constructed. It starts
//! anonymous with an empty cache; [`AppContext::teardown`] returns it to
//! that state.

use std::sync::Arc;

use crate::api::{ApiClient, AuthApi, DashboardApi, TemplateApi};
use crate::auth::{
    Credentials, FileTokenStore, MemoryTokenStore, PasswordStrengthScorer, SessionStore,
    TokenStore,
};
use crate::cache::QueryCache;
use crate::config::BizcardConfig;
use crate::error::BizcardError;
use crate::mutation::{MutationCoordinator, TemplateAdmin};
use crate::notify::FlashQueue;

/// Shared state for one running client
///
/// # Example
///
/// ```rust,no_run
/// use bizcard::{config::BizcardConfig, context::AppContext};
///
/// # async fn example() -> anyhow::Result<()> {
/// let ctx = AppContext::new(BizcardConfig::load()?)?;
/// if let Some(user) = ctx.session().restore().await {
///     tracing::info!(user = %user.display_name(), "welcome back");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AppContext {
    config: Arc<BizcardConfig>,
    session: SessionStore,
    cache: QueryCache,
    flashes: FlashQueue,
    mutations: MutationCoordinator,
    templates: Arc<dyn TemplateApi>,
    dashboard: Arc<dyn DashboardApi>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("config", &self.config)
            .field("session", &self.session)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Context talking HTTP to the configured backend
    ///
    /// The token is persisted to a file unless `session.persist_token` is off.
    pub fn new(config: BizcardConfig) -> Result<Self, BizcardError> {
        let credentials = Credentials::default();
        let client = Arc::new(ApiClient::new(&config.api, credentials.clone())?);
        let tokens: Arc<dyn TokenStore> = if config.session.persist_token {
            Arc::new(FileTokenStore::new(config.session.resolved_token_path()))
        } else {
            Arc::new(MemoryTokenStore::new())
        };
        tracing::debug!(base_url = %client.base_url(), "creating application context");
        Ok(Self::with_backend(config, client, credentials, tokens))
    }

    /// Context over any backend implementation
    ///
    /// `credentials` must be the handle `backend` authorizes requests with.
    pub fn with_backend<B>(
        config: BizcardConfig,
        backend: Arc<B>,
        credentials: Credentials,
        tokens: Arc<dyn TokenStore>,
    ) -> Self
    where
        B: AuthApi + TemplateApi + DashboardApi + 'static,
    {
        let cache = QueryCache::new();
        let flashes = FlashQueue::new();
        let mutations = MutationCoordinator::new(cache.clone(), Arc::new(flashes.clone()));
        let session =
            SessionStore::with_cache(backend.clone(), tokens, credentials, cache.clone());

        Self {
            config: Arc::new(config),
            session,
            cache,
            flashes,
            mutations,
            templates: backend.clone(),
            dashboard: backend,
        }
    }

    /// Loaded configuration
    #[must_use]
    pub fn config(&self) -> &BizcardConfig {
        &self.config
    }

    /// Session store
    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Query cache
    #[must_use]
    pub const fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Pending notifications
    #[must_use]
    pub const fn flashes(&self) -> &FlashQueue {
        &self.flashes
    }

    /// Mutation coordinator
    #[must_use]
    pub const fn mutations(&self) -> &MutationCoordinator {
        &self.mutations
    }

    /// Template create/update/delete
    #[must_use]
    pub fn template_admin(&self) -> TemplateAdmin {
        TemplateAdmin::new(Arc::clone(&self.templates), self.mutations.clone())
    }

    /// Template endpoints
    #[must_use]
    pub fn templates_api(&self) -> &dyn TemplateApi {
        self.templates.as_ref()
    }

    /// Dashboard endpoint
    #[must_use]
    pub fn dashboard_api(&self) -> &dyn DashboardApi {
        self.dashboard.as_ref()
    }

    /// Password meter configured from `[password]`
    #[must_use]
    pub fn password_scorer(&self) -> PasswordStrengthScorer {
        PasswordStrengthScorer::from_settings(&self.config.password)
    }

    /// Sign out, which drops every cached query, and discard notifications
    pub async fn teardown(&self) {
        self.session.logout().await;
        let _ = self.flashes.take_flashes();
        tracing::debug!("application context torn down");
    }
}
