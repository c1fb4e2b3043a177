//! Registration page

use super::{PageLifecycle, SubmitOutcome};
use crate::auth::{PasswordStrength, PasswordStrengthScorer, SessionStore};
use crate::forms::rules::register_rules;
use crate::forms::FormState;

/// Account creation form with a live password meter
///
/// Fields: `name`, `email`, `password`, `confirm_password`, `accept_terms`
/// (`"true"` once the box is ticked).
#[derive(Debug, Clone)]
pub struct RegisterPage {
    form: FormState,
    scorer: PasswordStrengthScorer,
    banner: Option<String>,
    lifecycle: PageLifecycle,
}

impl Default for RegisterPage {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterPage {
    /// Empty form with the default password meter
    #[must_use]
    pub fn new() -> Self {
        Self::with_scorer(PasswordStrengthScorer::default())
    }

    /// Empty form with a configured password meter
    #[must_use]
    pub fn with_scorer(scorer: PasswordStrengthScorer) -> Self {
        Self {
            form: FormState::new(register_rules()),
            scorer,
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

    /// Strength of the password typed so far
    #[must_use]
    pub fn password_strength(&self) -> PasswordStrength {
        self.scorer.score(self.form.value("password"))
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

    /// Validate (including confirmation and terms) and create the account
    ///
    /// Nothing is sent unless every field is valid.
    pub async fn submit(&mut self, session: &SessionStore) -> SubmitOutcome {
        self.banner = None;
        if !self.form.validate_all() {
            tracing::debug!(
                fields = ?self.form.errors().fields_with_errors(),
                "registration form invalid"
            );
            return SubmitOutcome::Invalid;
        }
        let Some(_guard) = self.form.latch().try_begin() else {
            return SubmitOutcome::Busy;
        };

        let name = self.form.value("name").trim().to_string();
        let email = self.form.value("email").trim().to_string();
        let password = self.form.value("password").to_string();
        let result = session.register(&name, &email, &password).await;

        if !self.lifecycle.is_mounted() {
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
    use crate::api::{AccountInfo, AuthResponse, MockAuthApi, ResourceId};
    use crate::auth::{Credentials, MemoryTokenStore, StrengthLabel};
    use crate::forms::rules::{PASSWORD_MISMATCH, TERMS_NOT_ACCEPTED};

    fn session(api: MockAuthApi) -> SessionStore {
        SessionStore::new(
            Arc::new(api),
            Arc::new(MemoryTokenStore::new()),
            Credentials::default(),
        )
    }

    fn filled(confirm: &str, terms: &str) -> RegisterPage {
        let mut page = RegisterPage::new();
        let form = page.form_mut();
        form.set_value("name", "Ada Lovelace");
        form.set_value("email", "ada@example.com");
        form.set_value("password", "Analytical1!");
        form.set_value("confirm_password", confirm);
        form.set_value("accept_terms", terms);
        page
    }

    #[tokio::test]
    async fn test_mismatch_never_calls_backend() {
        // No expectations: a register call would panic
        let store = session(MockAuthApi::new());
        let mut page = filled("Analytical2!", "true");

        assert_eq!(page.submit(&store).await, SubmitOutcome::Invalid);
        assert_eq!(page.form().error("confirm_password"), Some(PASSWORD_MISMATCH));
    }

    #[tokio::test]
    async fn test_terms_required() {
        let store = session(MockAuthApi::new());
        let mut page = filled("Analytical1!", "false");

        assert_eq!(page.submit(&store).await, SubmitOutcome::Invalid);
        assert_eq!(page.form().error("accept_terms"), Some(TERMS_NOT_ACCEPTED));
    }

    #[tokio::test]
    async fn test_valid_form_registers() {
        let mut api = MockAuthApi::new();
        api.expect_register()
            .withf(|req| req.name == "Ada Lovelace" && req.password == "Analytical1!")
            .times(1)
            .returning(|req| {
                Ok(AuthResponse {
                    user: AccountInfo {
                        id: ResourceId::from("7"),
                        name: req.name,
                        email: req.email,
                    },
                    token: "tok".to_string(),
                })
            });
        let store = session(api);
        let mut page = filled("Analytical1!", "true");

        let SubmitOutcome::Succeeded(user) = page.submit(&store).await else {
            panic!("registration should succeed");
        };
        assert_eq!(user.name, "Ada Lovelace");
    }

    #[test]
    fn test_confirm_follows_password_edits() {
        let mut page = filled("Analytical1!", "true");
        page.form_mut().blur("confirm_password");
        assert!(page.form().error("confirm_password").is_none());

        page.form_mut().set_value("password", "Different1!");
        assert_eq!(page.form().error("confirm_password"), Some(PASSWORD_MISMATCH));
    }

    #[test]
    fn test_password_meter() {
        let mut page = RegisterPage::new();
        assert_eq!(page.password_strength().label, StrengthLabel::Weak);
        page.form_mut().set_value("password", "Aa1!aaaa");
        assert_eq!(page.password_strength().label, StrengthLabel::Strong);
    }
}
