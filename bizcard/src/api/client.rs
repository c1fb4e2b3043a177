//! `reqwest`-backed REST client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::backend::{AuthApi, DashboardApi, TemplateApi};
use super::error::ApiError;
use super::types::{
    AccountInfo, AuthResponse, CurrentUserResponse, DashboardStats, ErrorBody, LoginRequest,
    RegisterRequest, ResourceId,
};
use crate::auth::{AuthToken, Credentials};
use crate::config::ApiSettings;
use crate::templates::{Template, TemplateInput};

/// HTTP client for the platform's REST API
///
/// Requests are authorized with whatever token the shared [`Credentials`]
/// hold at send time.
///
/// # Example
///
/// ```rust,no_run
/// use bizcard::api::{ApiClient, TemplateApi};
/// use bizcard::auth::Credentials;
/// use bizcard::config::ApiSettings;
///
/// # async fn example() -> anyhow::Result<()> {
/// let client = ApiClient::new(&ApiSettings::default(), Credentials::default())?;
/// let templates = client.list_templates().await?;
/// println!("{} templates", templates.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Credentials,
}

impl ApiClient {
    /// Build a client from settings
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Request`] if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(settings: &ApiSettings, credentials: Credentials) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(settings.request_timeout_ms))
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| ApiError::Request(e.to_string()))?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// Base URL requests are resolved against
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Shared credentials used to authorize requests
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%method, %url, "sending API request");
        let builder = self.http.request(method, url);
        match self.credentials.get() {
            Some(token) => builder.bearer_auth(token.expose()),
            None => builder,
        }
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        let response = Self::send(request).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(ApiError::from)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // The body is best-effort; a missing or malformed body still yields the status
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(ErrorBody::into_message);
        tracing::warn!(status = status.as_u16(), ?message, "API request failed");

        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, request: LoginRequest) -> Result<AuthResponse, ApiError> {
        Self::send_json(self.request(Method::POST, "/auth/login").json(&request)).await
    }

    async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, ApiError> {
        Self::send_json(self.request(Method::POST, "/auth/register").json(&request)).await
    }

    async fn current_user(&self, token: AuthToken) -> Result<AccountInfo, ApiError> {
        let url = format!("{}/auth/me", self.base_url);
        let request = self.http.get(url).bearer_auth(token.expose());
        let body: CurrentUserResponse = Self::send_json(request).await?;
        Ok(body.user)
    }
}

#[async_trait]
impl TemplateApi for ApiClient {
    async fn list_templates(&self) -> Result<Vec<Template>, ApiError> {
        Self::send_json(self.request(Method::GET, "/templates")).await
    }

    async fn create_template(&self, input: TemplateInput) -> Result<Template, ApiError> {
        Self::send_json(self.request(Method::POST, "/templates").json(&input)).await
    }

    async fn update_template(
        &self,
        id: ResourceId,
        input: TemplateInput,
    ) -> Result<Template, ApiError> {
        let path = format!("/templates/{id}");
        Self::send_json(self.request(Method::PUT, &path).json(&input)).await
    }

    async fn delete_template(&self, id: ResourceId) -> Result<(), ApiError> {
        let path = format!("/templates/{id}");
        Self::send(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }
}

#[async_trait]
impl DashboardApi for ApiClient {
    async fn dashboard(&self) -> Result<DashboardStats, ApiError> {
        Self::send_json(self.request(Method::GET, "/dashboard")).await
    }
}
