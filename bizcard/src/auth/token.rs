//! Auth tokens, shared request credentials and token persistence

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;

/// Bearer token issued by the backend
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wrap a raw token
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for the `Authorization` header
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether the token is blank
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// Token used to authorize API requests, shared between the session store
/// and the API client
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    token: Arc<RwLock<Option<AuthToken>>>,
}

impl Credentials {
    /// Current token
    #[must_use]
    pub fn get(&self) -> Option<AuthToken> {
        self.token.read().clone()
    }

    /// Replace the token
    pub fn set(&self, token: AuthToken) {
        *self.token.write() = Some(token);
    }

    /// Drop the token
    pub fn clear(&self) {
        *self.token.write() = None;
    }

    /// Whether a token is held
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.token.read().is_some()
    }
}

/// Token persistence errors
#[derive(Debug, Error)]
pub enum TokenStoreError {
    /// Reading or writing the token file failed
    #[error("Token file I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The token file is not valid JSON
    #[error("Token file is corrupt: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Where the session token survives restarts
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Load the persisted token, if any
    async fn load(&self) -> Result<Option<AuthToken>, TokenStoreError>;

    /// Persist a token, replacing any previous one
    async fn save(&self, token: AuthToken) -> Result<(), TokenStoreError>;

    /// Forget the persisted token; succeeds if none exists
    async fn clear(&self) -> Result<(), TokenStoreError>;
}

#[derive(Serialize, Deserialize)]
struct TokenFile {
    token: AuthToken,
}

/// Stores the token as JSON (`{"token": "..."}`) in a file
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store at `path`; parent directories are created on first save
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default location: `<data_local_dir>/bizcard/session.json`
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("bizcard")
            .join("session.json")
    }

    /// File the token is stored in
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<AuthToken>, TokenStoreError> {
        let contents = match fs::read(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let file: TokenFile = serde_json::from_slice(&contents)?;
        Ok(Some(file.token).filter(|token| !token.is_empty()))
    }

    async fn save(&self, token: AuthToken) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let contents = serde_json::to_vec(&TokenFile { token })?;
        fs::write(&self.path, contents).await?;
        tracing::debug!(path = %self.path.display(), "persisted session token");
        Ok(())
    }

    async fn clear(&self) -> Result<(), TokenStoreError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Keeps the token in memory only (lost on restart)
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<AuthToken>>,
}

impl MemoryTokenStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a token
    #[must_use]
    pub fn with_token(token: AuthToken) -> Self {
        Self {
            token: Mutex::new(Some(token)),
        }
    }

    /// Current token, without going through the async trait
    #[must_use]
    pub fn peek(&self) -> Option<AuthToken> {
        self.token.lock().clone()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<Option<AuthToken>, TokenStoreError> {
        Ok(self.peek())
    }

    async fn save(&self, token: AuthToken) -> Result<(), TokenStoreError> {
        *self.token.lock() = Some(token);
        Ok(())
    }

    async fn clear(&self) -> Result<(), TokenStoreError> {
        *self.token.lock() = None;
        Ok(())
    }
}
