//! Role operations.

use minimarket_core::RoleId;
use tracing::instrument;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::auth::RoleUpdate;
use crate::models::{NewRole, RoleRecord};

impl ApiClient {
    /// Fetch all roles.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not parse.
    #[instrument(skip(self))]
    pub async fn get_roles(&self) -> Result<Vec<RoleRecord>, ApiError> {
        self.get_json("roles").await
    }

    /// Create a role.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the
    /// draft.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create_role(&self, draft: &NewRole) -> Result<(), ApiError> {
        self.post_unit("roles", draft).await
    }

    /// Update a role in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the
    /// draft.
    #[instrument(skip(self, draft), fields(role_id = %id))]
    pub async fn update_role(&self, id: RoleId, draft: &NewRole) -> Result<(), ApiError> {
        self.put_unit("roles", &RoleUpdate { id, draft }).await
    }

    /// Delete a role.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, including when users still
    /// hold the role.
    #[instrument(skip(self), fields(role_id = %id))]
    pub async fn delete_role(&self, id: RoleId) -> Result<(), ApiError> {
        self.delete_unit(&format!("roles/{id}")).await
    }
}
