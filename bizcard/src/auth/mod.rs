//! Authentication and session management
//!
//! [`SessionStore`] owns the signed-in user. The bearer token lives in
//! [`Credentials`], shared with the API client, and survives restarts through
//! a [`TokenStore`].

pub mod session;
pub mod strength;
pub mod token;
pub mod user;

pub use session::{SessionState, SessionStore, LOGIN_FAILED, REGISTER_FAILED};
pub use strength::{
    password_strength, PasswordStrength, PasswordStrengthScorer, StrengthColor, StrengthLabel,
    MAX_SCORE,
};
pub use token::{
    AuthToken, Credentials, FileTokenStore, MemoryTokenStore, TokenStore, TokenStoreError,
};
pub use user::User;
