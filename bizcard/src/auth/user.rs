//! Signed-in user

use crate::api::{AccountInfo, ResourceId};

use super::token::AuthToken;

/// The authenticated user held by the session store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// User ID
    pub id: ResourceId,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Bearer token for this session
    pub auth_token: AuthToken,
}

impl User {
    /// Combine an account returned by the backend with its token
    #[must_use]
    pub fn from_account(account: AccountInfo, auth_token: AuthToken) -> Self {
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
            auth_token,
        }
    }

    /// Name to greet the user with, falling back to the email address
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }

    /// Up to two initials for the avatar badge
    #[must_use]
    pub fn initials(&self) -> String {
        self.display_name()
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}
