//! The generic back-office resource table.
//!
//! Every CRUD screen behaves the same way: list, create from a draft,
//! update or delete by id, and refetch after each mutation so the rows
//! show what the backend actually accepted. That behavior lives here
//! once, parameterized by the entity shape and the screen's permission
//! policy; the per-entity bindings in [`crate::entities`] stay thin.

use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use minimarket_api::{ApiClient, ApiError};
use minimarket_core::Role;
use minimarket_storefront::SessionStore;
use tracing::instrument;

use crate::error::AdminError;
use crate::policy::{RolePredicate, ScreenPolicy};

/// One back-office entity kind: its listing shape, its editable draft,
/// its id, and the client calls that move it over the wire.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Row shape served by the listing endpoint.
    type Entity: Clone + Send + Sync;
    /// Editable fields for create and update.
    type Draft: Sync;
    /// Backend identifier.
    type Id: Copy + PartialEq + std::fmt::Display + Send + Sync + 'static;

    /// Plural name used in logs and denial messages.
    const NAME: &'static str;
    /// Who may view, create, and mutate this screen.
    const POLICY: ScreenPolicy;

    fn id_of(entity: &Self::Entity) -> Self::Id;

    async fn fetch(client: &ApiClient) -> Result<Vec<Self::Entity>, ApiError>;
    async fn create(client: &ApiClient, draft: &Self::Draft) -> Result<(), ApiError>;
    async fn update(
        client: &ApiClient,
        id: Self::Id,
        draft: &Self::Draft,
    ) -> Result<(), ApiError>;
    async fn delete(client: &ApiClient, id: Self::Id) -> Result<(), ApiError>;
}

/// CRUD screen state over one [`Resource`], gated by its policy.
///
/// Cheap to clone; every clone observes the same cached rows.
pub struct ResourceTable<R: Resource> {
    client: ApiClient,
    session: SessionStore,
    rows: Arc<RwLock<Vec<R::Entity>>>,
}

impl<R: Resource> std::fmt::Debug for ResourceTable<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cached = self.rows.read().unwrap_or_else(PoisonError::into_inner).len();
        f.debug_struct("ResourceTable")
            .field("resource", &R::NAME)
            .field("cached_rows", &cached)
            .finish_non_exhaustive()
    }
}

impl<R: Resource> Clone for ResourceTable<R> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            session: self.session.clone(),
            rows: Arc::clone(&self.rows),
        }
    }
}

impl<R: Resource> ResourceTable<R> {
    #[must_use]
    pub fn new(client: ApiClient, session: SessionStore) -> Self {
        Self {
            client,
            session,
            rows: Arc::new(RwLock::new(Vec::new())),
        }
    }

    fn authorize(&self, action: &str, allowed: RolePredicate) -> Result<Role, AdminError> {
        let role = self.session.role().ok_or(AdminError::NotSignedIn)?;
        if allowed(role) {
            Ok(role)
        } else {
            Err(AdminError::Forbidden {
                role,
                action: format!("{action} {}", R::NAME),
            })
        }
    }

    /// Fetch the listing and replace the cached rows with it.
    #[instrument(skip(self), fields(resource = R::NAME))]
    pub async fn refresh(&self) -> Result<Vec<R::Entity>, AdminError> {
        self.authorize("view", R::POLICY.view)?;
        let fetched = R::fetch(&self.client).await?;
        *self.rows.write().unwrap_or_else(PoisonError::into_inner) = fetched.clone();
        Ok(fetched)
    }

    /// Create an entity from `draft`, then refetch the listing.
    #[instrument(skip_all, fields(resource = R::NAME))]
    pub async fn create(&self, draft: &R::Draft) -> Result<Vec<R::Entity>, AdminError> {
        self.authorize("create", R::POLICY.create)?;
        R::create(&self.client, draft).await?;
        self.refresh().await
    }

    /// Update the entity `id` from `draft`, then refetch the listing.
    #[instrument(skip_all, fields(resource = R::NAME, id = %id))]
    pub async fn update(&self, id: R::Id, draft: &R::Draft) -> Result<Vec<R::Entity>, AdminError> {
        self.authorize("update", R::POLICY.mutate)?;
        R::update(&self.client, id, draft).await?;
        self.refresh().await
    }

    /// Delete the entity `id`, then refetch the listing.
    #[instrument(skip_all, fields(resource = R::NAME, id = %id))]
    pub async fn delete(&self, id: R::Id) -> Result<Vec<R::Entity>, AdminError> {
        self.authorize("delete", R::POLICY.mutate)?;
        R::delete(&self.client, id).await?;
        self.refresh().await
    }

    /// Rows cached by the last successful refresh.
    #[must_use]
    pub fn rows(&self) -> Vec<R::Entity> {
        self.rows
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// A cached row by id.
    #[must_use]
    pub fn row(&self, id: R::Id) -> Option<R::Entity> {
        self.rows
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|entity| R::id_of(entity) == id)
            .cloned()
    }
}
