//! Backend traits
//!
//! The session store, the mutation coordinator and the pages depend on these
//! traits rather than on [`ApiClient`](super::ApiClient) directly, so tests
//! can substitute mocks.

use async_trait::async_trait;

use super::error::ApiError;
use super::types::{AccountInfo, AuthResponse, DashboardStats, LoginRequest, RegisterRequest, ResourceId};
use crate::auth::AuthToken;
use crate::templates::{Template, TemplateInput};

/// Authentication endpoints
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /auth/login`
    async fn login(&self, request: LoginRequest) -> Result<AuthResponse, ApiError>;

    /// `POST /auth/register`
    async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, ApiError>;

    /// `GET /auth/me`, authorized with `token`
    async fn current_user(&self, token: AuthToken) -> Result<AccountInfo, ApiError>;
}

/// Template catalog endpoints
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplateApi: Send + Sync {
    /// `GET /templates`
    async fn list_templates(&self) -> Result<Vec<Template>, ApiError>;

    /// `POST /templates`
    async fn create_template(&self, input: TemplateInput) -> Result<Template, ApiError>;

    /// `PUT /templates/:id`
    async fn update_template(
        &self,
        id: ResourceId,
        input: TemplateInput,
    ) -> Result<Template, ApiError>;

    /// `DELETE /templates/:id`
    async fn delete_template(&self, id: ResourceId) -> Result<(), ApiError>;
}

/// Dashboard endpoint
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// `GET /dashboard`
    async fn dashboard(&self) -> Result<DashboardStats, ApiError>;
}
