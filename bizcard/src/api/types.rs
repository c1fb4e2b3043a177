//! Wire types for the REST backend

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Backend identifier, accepted as a JSON string or number
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    /// The identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(id) => Self(id),
            Raw::Signed(id) => Self(id.to_string()),
            Raw::Unsigned(id) => Self(id.to_string()),
        })
    }
}

/// Account as returned by the auth endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    /// User ID
    pub id: ResourceId,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Email address
    pub email: String,
}

/// `POST /auth/login` body
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    /// Email address
    pub email: String,
    /// Plaintext password
    pub password: String,
}

/// `POST /auth/register` body
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Plaintext password
    pub password: String,
}

/// Successful login or registration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    /// The signed-in account
    pub user: AccountInfo,
    /// Bearer token for subsequent requests
    pub token: String,
}

/// `GET /auth/me` body
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct CurrentUserResponse {
    pub(crate) user: AccountInfo,
}

/// Error body returned by the backend on failure
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub(crate) error: Option<String>,
    #[serde(default)]
    pub(crate) message: Option<String>,
}

impl ErrorBody {
    pub(crate) fn into_message(self) -> Option<String> {
        self.error.or(self.message)
    }
}

/// Dashboard summary for the signed-in user
///
/// `Default` is the all-zero fallback shown when the dashboard cannot be
/// fetched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    /// Profiles owned by the user
    pub total_profiles: u64,
    /// Profile views
    pub total_views: u64,
    /// NFC taps
    pub total_taps: u64,
    /// Shares
    pub total_shares: u64,
    /// Most recently edited profiles
    pub recent_profiles: Vec<RecentProfile>,
    /// Latest activity feed entries
    pub recent_activity: Vec<ActivityEntry>,
}

/// Profile summary on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentProfile {
    /// Profile ID
    pub id: ResourceId,
    /// Profile display name
    pub name: String,
    /// Job title shown on the card
    #[serde(default)]
    pub title: Option<String>,
    /// View count
    #[serde(default)]
    pub views: u64,
}

/// Activity feed entry on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// Activity kind (`view`, `tap`, `share`, ...)
    #[serde(rename = "type")]
    pub kind: String,
    /// Human-readable description
    pub description: String,
    /// When it happened
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}
