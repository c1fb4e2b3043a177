//! Create/update/delete coordination
//!
//! [`MutationCoordinator::run`] awaits a backend write, then either
//! invalidates the affected cache keys and raises a success notification, or
//! raises an error notification and returns a [`SubmitError`]. Nothing is
//! retried or de-duplicated here; forms hold a
//! [`SubmitLatch`](crate::forms::SubmitLatch) for that.
//!
//! Deletes take a [`ConfirmedDelete`], which only
//! [`PendingDelete::confirm`] produces.

use std::future::Future;
use std::sync::Arc;

use crate::api::{ApiError, ResourceId, TemplateApi};
use crate::cache::{QueryCache, QueryKey};
use crate::error::SubmitError;
use crate::notify::{FlashMessage, Notifier};
use crate::templates::{Template, TemplateInput};

/// What a write affects and how to report it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    /// Cache keys to invalidate on success
    pub invalidates: Vec<QueryKey>,
    /// Notification on success
    pub success_message: String,
    /// Notification on failure when the server gives no message
    pub failure_fallback: String,
}

impl Mutation {
    /// Mutation that invalidates nothing
    #[must_use]
    pub fn new(success_message: impl Into<String>, failure_fallback: impl Into<String>) -> Self {
        Self {
            invalidates: Vec::new(),
            success_message: success_message.into(),
            failure_fallback: failure_fallback.into(),
        }
    }

    /// Also invalidate `key` on success
    #[must_use]
    pub fn invalidates(mut self, key: QueryKey) -> Self {
        if !self.invalidates.contains(&key) {
            self.invalidates.push(key);
        }
        self
    }
}

/// Runs backend writes and applies their side effects
#[derive(Clone)]
pub struct MutationCoordinator {
    cache: QueryCache,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for MutationCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MutationCoordinator")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl MutationCoordinator {
    /// Coordinator over `cache`, reporting to `notifier`
    #[must_use]
    pub fn new(cache: QueryCache, notifier: Arc<dyn Notifier>) -> Self {
        Self { cache, notifier }
    }

    /// The cache this coordinator invalidates
    #[must_use]
    pub const fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Await `operation` and apply the mutation's side effects
    pub async fn run<T, Fut>(&self, mutation: Mutation, operation: Fut) -> Result<T, SubmitError>
    where
        Fut: Future<Output = Result<T, ApiError>>,
    {
        match operation.await {
            Ok(value) => {
                for key in &mutation.invalidates {
                    self.cache.invalidate(*key);
                }
                self.notifier
                    .notify(FlashMessage::success(mutation.success_message));
                Ok(value)
            }
            Err(e) => {
                let err = SubmitError::from_api(e, &mutation.failure_fallback);
                tracing::warn!(error = %err.source, message = %err.message, "mutation failed");
                self.notifier.notify(FlashMessage::error(err.message.clone()));
                Err(err)
            }
        }
    }
}

/// A delete the user has asked for but not yet confirmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    id: ResourceId,
    name: String,
}

impl PendingDelete {
    /// Ask to delete resource `id`, shown to the user as `name`
    #[must_use]
    pub fn new(id: ResourceId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Resource to delete
    #[must_use]
    pub const fn id(&self) -> &ResourceId {
        &self.id
    }

    /// Display name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Confirmation prompt text
    #[must_use]
    pub fn prompt(&self) -> String {
        format!("Delete \"{}\"? This cannot be undone.", self.name)
    }

    /// The user confirmed
    #[must_use]
    pub fn confirm(self) -> ConfirmedDelete {
        ConfirmedDelete {
            id: self.id,
            name: self.name,
        }
    }
}

/// A delete the user has confirmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedDelete {
    id: ResourceId,
    name: String,
}

impl ConfirmedDelete {
    /// Resource to delete
    #[must_use]
    pub const fn id(&self) -> &ResourceId {
        &self.id
    }

    /// Display name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Template administration: create, update and delete through the
/// coordinator
#[derive(Clone)]
pub struct TemplateAdmin {
    api: Arc<dyn TemplateApi>,
    coordinator: MutationCoordinator,
}

impl std::fmt::Debug for TemplateAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateAdmin")
            .field("coordinator", &self.coordinator)
            .finish_non_exhaustive()
    }
}

impl TemplateAdmin {
    /// Admin over `api`
    #[must_use]
    pub fn new(api: Arc<dyn TemplateApi>, coordinator: MutationCoordinator) -> Self {
        Self { api, coordinator }
    }

    /// `POST /templates`
    pub async fn create(&self, input: TemplateInput) -> Result<Template, SubmitError> {
        let mutation = Mutation::new(
            format!("Template \"{}\" created", input.name),
            "Failed to create template",
        )
        .invalidates(QueryKey::Templates);
        self.coordinator
            .run(mutation, self.api.create_template(input))
            .await
    }

    /// `PUT /templates/:id`
    pub async fn update(
        &self,
        id: ResourceId,
        input: TemplateInput,
    ) -> Result<Template, SubmitError> {
        let mutation = Mutation::new(
            format!("Template \"{}\" updated", input.name),
            "Failed to update template",
        )
        .invalidates(QueryKey::Templates);
        self.coordinator
            .run(mutation, self.api.update_template(id, input))
            .await
    }

    /// `DELETE /templates/:id`
    pub async fn delete(&self, confirmed: ConfirmedDelete) -> Result<(), SubmitError> {
        let mutation = Mutation::new(
            format!("Template \"{}\" deleted", confirmed.name),
            "Failed to delete template",
        )
        .invalidates(QueryKey::Templates);
        self.coordinator
            .run(mutation, self.api.delete_template(confirmed.id))
            .await
    }
}
