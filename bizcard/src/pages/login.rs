//! Login page

use super::{PageLifecycle, SubmitOutcome};
use crate::auth::SessionStore;
use crate::forms::rules::login_rules;
use crate::forms::FormState;

/// Email/password sign-in form
#[derive(Debug, Clone)]
pub struct LoginPage {
    form: FormState,
    banner: Option<String>,
    lifecycle: PageLifecycle,
}

impl Default for LoginPage {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginPage {
    /// Empty login form
    #[must_use]
    pub fn new() -> Self {
        Self {
            form: FormState::new(login_rules()),
            banner: None,
            lifecycle: PageLifecycle::new(),
        }
    }

    /// Form state
    #[must_use]
    pub const fn form(&self) -> &FormState {
        &self.form
    }

    /// Form state, for input events
    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    /// Error banner above the form
    #[must_use]
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Mounted flag
    #[must_use]
    pub const fn lifecycle(&self) -> &PageLifecycle {
        &self.lifecycle
    }

    /// Validate and sign in
    pub async fn submit(&mut self, session: &SessionStore) -> SubmitOutcome {
        self.banner = None;
        if !self.form.validate_all() {
            return SubmitOutcome::Invalid;
        }
        let Some(_guard) = self.form.latch().try_begin() else {
            return SubmitOutcome::Busy;
        };

        let email = self.form.value("email").trim().to_string();
        let password = self.form.value("password").to_string();
        let result = session.login(&email, &password).await;

        if !self.lifecycle.is_mounted() {
            tracing::debug!("login finished after page unmounted");
            return SubmitOutcome::Discarded;
        }
        match result {
            Ok(user) => SubmitOutcome::Succeeded(user),
            Err(e) => {
                self.banner = Some(e.message.clone());
                SubmitOutcome::Failed(e.message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::api::{AccountInfo, ApiError, AuthResponse, MockAuthApi, ResourceId};
    use crate::auth::{Credentials, MemoryTokenStore, SessionState};

    fn session(api: MockAuthApi) -> SessionStore {
        SessionStore::new(
            Arc::new(api),
            Arc::new(MemoryTokenStore::new()),
            Credentials::default(),
        )
    }

    fn filled() -> LoginPage {
        let mut page = LoginPage::new();
        page.form_mut().set_value("email", "ada@example.com");
        page.form_mut().set_value("password", "secret-pass");
        page
    }

    #[tokio::test]
    async fn test_invalid_form_skips_backend() {
        let store = session(MockAuthApi::new());
        let mut page = LoginPage::new();

        assert_eq!(page.submit(&store).await, SubmitOutcome::Invalid);
        assert_eq!(page.form().error("email"), Some("Email is required"));
    }

    #[tokio::test]
    async fn test_rejected_login_sets_banner() {
        let mut api = MockAuthApi::new();
        api.expect_login().times(1).returning(|_| {
            Err(ApiError::Status {
                status: 401,
                message: Some("Invalid credentials".to_string()),
            })
        });
        let store = session(api);
        let mut page = filled();

        let outcome = page.submit(&store).await;

        assert_eq!(outcome, SubmitOutcome::Failed("Invalid credentials".to_string()));
        assert_eq!(page.banner(), Some("Invalid credentials"));
        assert_eq!(store.state(), SessionState::Anonymous);
        assert!(!page.form().latch().is_in_flight());
    }

    #[tokio::test]
    async fn test_successful_login() {
        let mut api = MockAuthApi::new();
        api.expect_login()
            .withf(|req| req.email == "ada@example.com")
            .returning(|_| {
                Ok(AuthResponse {
                    user: AccountInfo {
                        id: ResourceId::from("1"),
                        name: "Ada".to_string(),
                        email: "ada@example.com".to_string(),
                    },
                    token: "tok".to_string(),
                })
            });
        let store = session(api);
        let mut page = filled();

        assert!(page.submit(&store).await.is_success());
        assert!(page.banner().is_none());
        assert!(store.is_authenticated());
    }

    #[tokio::test]
    async fn test_busy_while_in_flight() {
        let store = session(MockAuthApi::new());
        let mut page = filled();
        let _held = page.form().latch().try_begin();

        assert_eq!(page.submit(&store).await, SubmitOutcome::Busy);
    }

    #[tokio::test]
    async fn test_result_discarded_after_unmount() {
        let mut api = MockAuthApi::new();
        api.expect_login()
            .returning(|_| Err(ApiError::Timeout));
        let store = session(api);
        let mut page = filled();
        page.lifecycle().unmount();

        assert_eq!(page.submit(&store).await, SubmitOutcome::Discarded);
        assert!(page.banner().is_none());
    }
}
