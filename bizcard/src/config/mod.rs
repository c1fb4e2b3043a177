//! Configuration management for bizcard
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `BIZCARD_` prefix, `__` for nesting)
//! 2. `./bizcard.toml` (or an explicit file)
//! 3. `~/.config/bizcard/config.toml` (user config)
//! 4. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # bizcard.toml
//! [api]
//! base_url = "https://api.bizcard.example/api"
//! request_timeout_ms = 5000
//!
//! [session]
//! persist_token = true
//! token_path = "/var/lib/bizcard/session.json"
//!
//! [password]
//! min_length = 8
//! bonus_length = 12
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use bizcard::config::BizcardConfig;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = BizcardConfig::load()?;
//! let timeout = config.api.request_timeout_ms;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use crate::auth::FileTokenStore;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "BIZCARD_";

/// Local config file, relative to the working directory
pub const LOCAL_CONFIG_FILE: &str = "bizcard.toml";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or merged
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    /// Values were loaded but are out of range
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Load(Box::new(err))
    }
}

/// REST backend settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL every endpoint path is appended to
    #[validate(url)]
    pub base_url: String,

    /// Per-request timeout in milliseconds
    #[validate(range(min = 1))]
    pub request_timeout_ms: u64,

    /// `User-Agent` header
    pub user_agent: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_string(),
            request_timeout_ms: 10_000,
            user_agent: concat!("bizcard/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Session persistence settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Persist the auth token across restarts
    pub persist_token: bool,

    /// Token file override
    pub token_path: Option<PathBuf>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            persist_token: true,
            token_path: None,
        }
    }
}

impl SessionSettings {
    /// Token file in effect
    #[must_use]
    pub fn resolved_token_path(&self) -> PathBuf {
        self.token_path
            .clone()
            .unwrap_or_else(FileTokenStore::default_path)
    }
}

/// Password strength meter thresholds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PasswordSettings {
    /// Length that earns the minimum-length point
    #[validate(range(min = 1))]
    pub min_length: usize,

    /// Length that earns the bonus point
    pub bonus_length: usize,
}

impl Default for PasswordSettings {
    fn default() -> Self {
        Self {
            min_length: 6,
            bonus_length: 8,
        }
    }
}

/// Complete bizcard configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct BizcardConfig {
    /// Backend settings
    #[serde(default)]
    #[validate(nested)]
    pub api: ApiSettings,

    /// Session settings
    #[serde(default)]
    pub session: SessionSettings,

    /// Password meter settings
    #[serde(default)]
    #[validate(nested)]
    pub password: PasswordSettings,
}

impl BizcardConfig {
    /// Load configuration from the standard locations
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use bizcard::config::BizcardConfig;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = BizcardConfig::load()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        let user_config = Self::recommended_path();
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }

        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            figment = figment.merge(Toml::file(&local_config));
        }

        Self::finish(figment)
    }

    /// Load configuration from a specific file, still honoring environment
    /// overrides
    ///
    /// A missing file is treated as empty.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()));
        Self::finish(figment)
    }

    fn finish(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__").lowercase(true))
            .extract()?;
        config.validate()?;
        tracing::debug!(base_url = %config.api.base_url, "configuration loaded");
        Ok(config)
    }

    /// User config path: `~/.config/bizcard/config.toml`
    #[must_use]
    pub fn recommended_path() -> PathBuf {
        dirs::config_dir().map_or_else(
            || PathBuf::from(LOCAL_CONFIG_FILE),
            |config_dir| config_dir.join("bizcard").join("config.toml"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BizcardConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:3000/api");
        assert_eq!(config.api.request_timeout_ms, 10_000);
        assert!(config.api.user_agent.starts_with("bizcard/"));
        assert!(config.session.persist_token);
        assert_eq!(config.password, PasswordSettings::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_token_path_override() {
        let settings = SessionSettings {
            token_path: Some(PathBuf::from("/tmp/token.json")),
            ..SessionSettings::default()
        };
        assert_eq!(settings.resolved_token_path(), PathBuf::from("/tmp/token.json"));
        assert_eq!(
            SessionSettings::default().resolved_token_path(),
            FileTokenStore::default_path()
        );
    }

    #[test]
    fn test_load_from_file_and_env() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "custom.toml",
                r#"
                [api]
                base_url = "https://api.example.com"
                request_timeout_ms = 2500

                [password]
                min_length = 8
                "#,
            )?;
            jail.set_env("BIZCARD_API__REQUEST_TIMEOUT_MS", "750");
            jail.set_env("BIZCARD_SESSION__PERSIST_TOKEN", "false");

            let config = BizcardConfig::load_from("custom.toml").map_err(|e| e.to_string())?;
            assert_eq!(config.api.base_url, "https://api.example.com");
            assert_eq!(config.api.request_timeout_ms, 750);
            assert!(!config.session.persist_token);
            assert_eq!(config.password.min_length, 8);
            assert_eq!(config.password.bonus_length, 8);
            Ok(())
        });
    }

    #[test]
    fn test_load_reads_local_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                LOCAL_CONFIG_FILE,
                r#"
                [api]
                base_url = "https://local.example.com/api"
                "#,
            )?;
            let config = BizcardConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.api.base_url, "https://local.example.com/api");
            Ok(())
        });
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        figment::Jail::expect_with(|_jail| {
            let config = BizcardConfig::load_from("absent.toml").map_err(|e| e.to_string())?;
            assert_eq!(config.api, ApiSettings::default());
            Ok(())
        });
    }

    #[test]
    fn test_invalid_values_rejected() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("BIZCARD_API__BASE_URL", "not a url");
            assert!(matches!(
                BizcardConfig::load_from("absent.toml"),
                Err(ConfigError::Invalid(_))
            ));
            Ok(())
        });
    }

    #[test]
    fn test_malformed_file_is_load_error() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("broken.toml", "[api\nbase_url = ")?;
            assert!(matches!(
                BizcardConfig::load_from("broken.toml"),
                Err(ConfigError::Load(_))
            ));
            Ok(())
        });
    }
}
