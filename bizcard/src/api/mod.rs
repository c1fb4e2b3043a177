//! REST backend access
//!
//! [`ApiClient`] implements the backend traits over HTTP with `reqwest`.
//! Failure bodies of the form `{"error": "..."}` surface as
//! [`ApiError::Status`] with the server message attached.

mod backend;
mod client;
mod error;
mod types;

pub use backend::{AuthApi, DashboardApi, TemplateApi};
#[cfg(test)]
pub use backend::{MockAuthApi, MockDashboardApi, MockTemplateApi};
pub use client::ApiClient;
pub use error::ApiError;
pub use types::{
    AccountInfo, ActivityEntry, AuthResponse, DashboardStats, LoginRequest, RecentProfile,
    RegisterRequest, ResourceId,
};
