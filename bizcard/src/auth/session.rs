//! Session lifecycle
//!
//! ```text
//! Anonymous ──login/register/restore──▶ Authenticating ──ok──▶ Authenticated
//!     ▲                                       │                     │
//!     └───────────────failure─────────────────┘                     │
//!     └──────────────────────logout / token invalidated─────────────┘
//! ```
//!
//! [`SessionStore`] is cheap to clone; all clones share one state. Locks are
//! released before every backend call.
//!
//! Cached queries hold per-user data, so the store clears its [`QueryCache`]
//! whenever the signed-in user changes.

use std::sync::Arc;

use parking_lot::RwLock;

use super::token::{AuthToken, Credentials, TokenStore};
use super::user::User;
use crate::api::{AuthApi, AuthResponse, LoginRequest, RegisterRequest};
use crate::cache::QueryCache;
use crate::error::SubmitError;

/// Shown when a login fails without a server message
pub const LOGIN_FAILED: &str = "Login failed. Please check your credentials and try again.";

/// Shown when a registration fails without a server message
pub const REGISTER_FAILED: &str = "Registration failed. Please try again.";

/// Where the session currently stands
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// No user
    #[default]
    Anonymous,
    /// A login, registration or restore is in flight
    Authenticating,
    /// Signed in
    Authenticated(User),
}

impl SessionState {
    /// The signed-in user, if any
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

struct Inner {
    api: Arc<dyn AuthApi>,
    tokens: Arc<dyn TokenStore>,
    credentials: Credentials,
    cache: QueryCache,
    state: RwLock<SessionState>,
}

/// Holds the authenticated user and drives login, registration, logout and
/// restore against the backend
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &*self.inner.state.read())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// New anonymous session with a private query cache
    ///
    /// `credentials` should be the same handle the API client authorizes
    /// requests with.
    #[must_use]
    pub fn new(
        api: Arc<dyn AuthApi>,
        tokens: Arc<dyn TokenStore>,
        credentials: Credentials,
    ) -> Self {
        Self::with_cache(api, tokens, credentials, QueryCache::new())
    }

    /// New anonymous session that clears `cache` on every change of user
    #[must_use]
    pub fn with_cache(
        api: Arc<dyn AuthApi>,
        tokens: Arc<dyn TokenStore>,
        credentials: Credentials,
        cache: QueryCache,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                tokens,
                credentials,
                cache,
                state: RwLock::new(SessionState::Anonymous),
            }),
        }
    }

    /// Snapshot of the current state
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.inner.state.read().clone()
    }

    /// The signed-in user, if any
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.inner.state.read().user().cloned()
    }

    /// Whether a user is signed in
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(*self.inner.state.read(), SessionState::Authenticated(_))
    }

    /// Credentials shared with the API client
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.inner.credentials
    }

    /// Query cache cleared on sign-in and sign-out
    #[must_use]
    pub fn cache(&self) -> &QueryCache {
        &self.inner.cache
    }

    /// Sign in with email and password
    ///
    /// A failure signs out any previous user, including the persisted token.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, SubmitError> {
        let was_authenticated = self.is_authenticated();
        self.set_state(SessionState::Authenticating);
        tracing::debug!(email, "logging in");

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        match self.inner.api.login(request).await {
            Ok(response) => Ok(self.establish(response).await),
            Err(e) => {
                tracing::warn!(email, error = %e, "login failed");
                self.fail(was_authenticated).await;
                Err(SubmitError::from_api(e, LOGIN_FAILED))
            }
        }
    }

    /// Create an account and sign in
    ///
    /// Password confirmation and terms acceptance are checked by the form,
    /// not here. A failure signs out any previous user.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, SubmitError> {
        let was_authenticated = self.is_authenticated();
        self.set_state(SessionState::Authenticating);
        tracing::debug!(email, "registering");

        let request = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        match self.inner.api.register(request).await {
            Ok(response) => Ok(self.establish(response).await),
            Err(e) => {
                tracing::warn!(email, error = %e, "registration failed");
                self.fail(was_authenticated).await;
                Err(SubmitError::from_api(e, REGISTER_FAILED))
            }
        }
    }

    /// Sign out; safe to call when already signed out
    pub async fn logout(&self) {
        let was_authenticated = self.is_authenticated();
        self.reset_anonymous();
        self.forget_token().await;
        if was_authenticated {
            tracing::info!("logged out");
        }
    }

    /// Resume a previous session from the persisted token
    ///
    /// Returns the user on success. A token the backend rejects with 401 is
    /// discarded; other failures keep it for the next attempt.
    pub async fn restore(&self) -> Option<User> {
        let token = match self.inner.tokens.load().await {
            Ok(Some(token)) => token,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load persisted token");
                return None;
            }
        };

        self.set_state(SessionState::Authenticating);
        match self.inner.api.current_user(token.clone()).await {
            Ok(account) => {
                let user = User::from_account(account, token.clone());
                self.inner.cache.clear();
                self.inner.credentials.set(token);
                self.set_state(SessionState::Authenticated(user.clone()));
                tracing::info!(user_id = %user.id, "session restored");
                Some(user)
            }
            Err(e) if e.is_unauthorized() => {
                tracing::info!("persisted token rejected, discarding");
                self.reset_anonymous();
                self.forget_token().await;
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "session restore failed");
                self.reset_anonymous();
                None
            }
        }
    }

    async fn establish(&self, response: AuthResponse) -> User {
        let token = AuthToken::new(response.token);
        let user = User::from_account(response.user, token.clone());

        self.inner.cache.clear();
        self.inner.credentials.set(token.clone());
        self.set_state(SessionState::Authenticated(user.clone()));
        tracing::info!(user_id = %user.id, "authenticated");

        if let Err(e) = self.inner.tokens.save(token).await {
            tracing::warn!(error = %e, "failed to persist token");
        }
        user
    }

    async fn fail(&self, was_authenticated: bool) {
        self.reset_anonymous();
        if was_authenticated {
            self.forget_token().await;
        }
    }

    async fn forget_token(&self) {
        if let Err(e) = self.inner.tokens.clear().await {
            tracing::warn!(error = %e, "failed to clear persisted token");
        }
    }

    fn reset_anonymous(&self) {
        self.inner.credentials.clear();
        self.inner.cache.clear();
        self.set_state(SessionState::Anonymous);
    }

    fn set_state(&self, state: SessionState) {
        *self.inner.state.write() = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AccountInfo, ApiError, DashboardStats, MockAuthApi, ResourceId};
    use crate::auth::token::{MemoryTokenStore, MockTokenStore, TokenStoreError};

    fn account() -> AccountInfo {
        AccountInfo {
            id: ResourceId::from("42"),
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
        }
    }

    fn auth_response() -> AuthResponse {
        AuthResponse {
            user: account(),
            token: "tok-1".to_string(),
        }
    }

    fn store_with(api: MockAuthApi, tokens: Arc<MemoryTokenStore>) -> SessionStore {
        SessionStore::new(Arc::new(api), tokens, Credentials::default())
    }

    async fn prime_dashboard(store: &SessionStore, views: u64) {
        store
            .cache()
            .dashboard()
            .refresh(|| async {
                Ok::<_, ()>(DashboardStats {
                    total_views: views,
                    ..DashboardStats::default()
                })
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut api = MockAuthApi::new();
        api.expect_login()
            .withf(|req| req.email == "ada@example.com" && req.password == "secret")
            .times(1)
            .returning(|_| Ok(auth_response()));
        let tokens = Arc::new(MemoryTokenStore::new());
        let store = store_with(api, tokens.clone());

        let user = store.login("ada@example.com", "secret").await.unwrap();

        assert_eq!(user.name, "Ada Lovelace");
        assert!(store.is_authenticated());
        assert_eq!(store.current_user(), Some(user));
        assert_eq!(store.credentials().get(), Some(AuthToken::new("tok-1")));
        assert_eq!(tokens.peek(), Some(AuthToken::new("tok-1")));
    }

    #[tokio::test]
    async fn test_login_rejected_uses_server_message() {
        let mut api = MockAuthApi::new();
        api.expect_login().returning(|_| {
            Err(ApiError::Status {
                status: 401,
                message: Some("Invalid credentials".to_string()),
            })
        });
        let tokens = Arc::new(MemoryTokenStore::new());
        let store = store_with(api, tokens.clone());

        let err = store.login("ada@example.com", "wrong").await.unwrap_err();

        assert_eq!(err.message, "Invalid credentials");
        assert_eq!(store.state(), SessionState::Anonymous);
        assert!(!store.credentials().is_set());
        assert!(tokens.peek().is_none());
    }

    #[tokio::test]
    async fn test_login_network_error_uses_fallback() {
        let mut api = MockAuthApi::new();
        api.expect_login()
            .returning(|_| Err(ApiError::Network("connection refused".to_string())));
        let store = store_with(api, Arc::new(MemoryTokenStore::new()));

        let err = store.login("ada@example.com", "secret").await.unwrap_err();
        assert_eq!(err.message, LOGIN_FAILED);
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut api = MockAuthApi::new();
        api.expect_register()
            .withf(|req| req.name == "Ada Lovelace")
            .times(1)
            .returning(|_| Ok(auth_response()));
        let store = store_with(api, Arc::new(MemoryTokenStore::new()));

        let user = store
            .register("Ada Lovelace", "ada@example.com", "secret-pass")
            .await
            .unwrap();
        assert_eq!(user.id, ResourceId::from("42"));
        assert!(store.is_authenticated());
    }

    #[tokio::test]
    async fn test_register_conflict() {
        let mut api = MockAuthApi::new();
        api.expect_register().returning(|_| {
            Err(ApiError::Status {
                status: 409,
                message: Some("Email already registered".to_string()),
            })
        });
        let store = store_with(api, Arc::new(MemoryTokenStore::new()));

        let err = store
            .register("Ada", "ada@example.com", "secret-pass")
            .await
            .unwrap_err();
        assert_eq!(err.message, "Email already registered");
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let mut api = MockAuthApi::new();
        api.expect_login().returning(|_| Ok(auth_response()));
        let tokens = Arc::new(MemoryTokenStore::new());
        let store = store_with(api, tokens.clone());
        store.login("ada@example.com", "secret").await.unwrap();

        store.logout().await;
        store.logout().await;

        assert_eq!(store.state(), SessionState::Anonymous);
        assert!(!store.credentials().is_set());
        assert!(tokens.peek().is_none());
    }

    #[tokio::test]
    async fn test_restore_without_token_skips_backend() {
        // No expectations: any backend call would panic
        let api = MockAuthApi::new();
        let store = store_with(api, Arc::new(MemoryTokenStore::new()));

        assert!(store.restore().await.is_none());
        assert_eq!(store.state(), SessionState::Anonymous);
    }

    #[tokio::test]
    async fn test_restore_with_valid_token() {
        let mut api = MockAuthApi::new();
        api.expect_current_user()
            .withf(|token| token.expose() == "saved")
            .times(1)
            .returning(|_| Ok(account()));
        let tokens = Arc::new(MemoryTokenStore::with_token(AuthToken::new("saved")));
        let store = store_with(api, tokens);

        let user = store.restore().await.unwrap();
        assert_eq!(user.auth_token, AuthToken::new("saved"));
        assert!(store.is_authenticated());
        assert_eq!(store.credentials().get(), Some(AuthToken::new("saved")));
    }

    #[tokio::test]
    async fn test_restore_discards_rejected_token() {
        let mut api = MockAuthApi::new();
        api.expect_current_user().returning(|_| {
            Err(ApiError::Status {
                status: 401,
                message: None,
            })
        });
        let tokens = Arc::new(MemoryTokenStore::with_token(AuthToken::new("expired")));
        let store = store_with(api, tokens.clone());

        assert!(store.restore().await.is_none());
        assert!(tokens.peek().is_none());
        assert_eq!(store.state(), SessionState::Anonymous);
    }

    #[tokio::test]
    async fn test_restore_keeps_token_on_network_error() {
        let mut api = MockAuthApi::new();
        api.expect_current_user().returning(|_| Err(ApiError::Timeout));
        let tokens = Arc::new(MemoryTokenStore::with_token(AuthToken::new("saved")));
        let store = store_with(api, tokens.clone());

        assert!(store.restore().await.is_none());
        assert_eq!(tokens.peek(), Some(AuthToken::new("saved")));
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn test_token_persist_failure_still_authenticates() {
        let mut api = MockAuthApi::new();
        api.expect_login().returning(|_| Ok(auth_response()));
        let mut tokens = MockTokenStore::new();
        tokens.expect_save().returning(|_| {
            Err(TokenStoreError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        });
        let store = SessionStore::new(Arc::new(api), Arc::new(tokens), Credentials::default());

        assert!(store.login("ada@example.com", "secret").await.is_ok());
        assert!(store.is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_clears_cached_queries() {
        let mut api = MockAuthApi::new();
        api.expect_login().returning(|_| Ok(auth_response()));
        let store = store_with(api, Arc::new(MemoryTokenStore::new()));
        store.login("ada@example.com", "secret").await.unwrap();
        prime_dashboard(&store, 111).await;

        store.logout().await;

        assert!(store.cache().dashboard().peek().is_none());
    }

    #[tokio::test]
    async fn test_login_clears_previous_users_cache() {
        let mut api = MockAuthApi::new();
        api.expect_login().returning(|_| Ok(auth_response()));
        let cache = QueryCache::new();
        let store = SessionStore::with_cache(
            Arc::new(api),
            Arc::new(MemoryTokenStore::new()),
            Credentials::default(),
            cache.clone(),
        );
        prime_dashboard(&store, 111).await;

        store.login("ada@example.com", "secret").await.unwrap();

        assert!(cache.dashboard().peek().is_none());
    }

    #[tokio::test]
    async fn test_failed_relogin_forgets_previous_token() {
        let calls = std::sync::atomic::AtomicUsize::new(0);
        let mut api = MockAuthApi::new();
        api.expect_login().times(2).returning(move |_| {
            if calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst) == 0 {
                Ok(auth_response())
            } else {
                Err(ApiError::Status {
                    status: 401,
                    message: Some("Invalid credentials".to_string()),
                })
            }
        });
        let tokens = Arc::new(MemoryTokenStore::new());
        let store = store_with(api, tokens.clone());

        store.login("ada@example.com", "secret").await.unwrap();
        assert_eq!(tokens.peek(), Some(AuthToken::new("tok-1")));
        prime_dashboard(&store, 111).await;

        assert!(store.login("grace@example.com", "wrong").await.is_err());

        assert_eq!(store.state(), SessionState::Anonymous);
        assert!(!store.credentials().is_set());
        assert!(tokens.peek().is_none());
        assert!(store.cache().dashboard().peek().is_none());
    }

    #[tokio::test]
    async fn test_failed_login_keeps_token_from_unrestored_session() {
        let mut api = MockAuthApi::new();
        api.expect_login()
            .returning(|_| Err(ApiError::Network("connection refused".to_string())));
        let tokens = Arc::new(MemoryTokenStore::with_token(AuthToken::new("saved")));
        let store = store_with(api, tokens.clone());

        assert!(store.login("ada@example.com", "secret").await.is_err());

        assert_eq!(tokens.peek(), Some(AuthToken::new("saved")));
    }

    #[tokio::test]
    async fn test_failed_register_after_login_forgets_token() {
        let mut api = MockAuthApi::new();
        api.expect_login().returning(|_| Ok(auth_response()));
        api.expect_register().returning(|_| {
            Err(ApiError::Status {
                status: 409,
                message: Some("Email already registered".to_string()),
            })
        });
        let tokens = Arc::new(MemoryTokenStore::new());
        let store = store_with(api, tokens.clone());
        store.login("ada@example.com", "secret").await.unwrap();

        assert!(store
            .register("Grace", "grace@example.com", "secret-pass")
            .await
            .is_err());

        assert!(!store.is_authenticated());
        assert!(tokens.peek().is_none());
    }
}
