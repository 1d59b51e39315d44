//! User account operations.

use tracing::instrument;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{AuthResponse, ProfileUpdate, RoleChange, User};

impl ApiClient {
    /// Fetch all user accounts (back-office listing).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not parse.
    #[instrument(skip(self))]
    pub async fn get_users(&self) -> Result<Vec<User>, ApiError> {
        self.get_json("usuarios").await
    }

    /// Update the signed-in user's profile. The backend answers with a
    /// fresh user and token; the caller must replace the session with
    /// them, since the old token stops working after an email change.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the
    /// edit.
    #[instrument(skip(self, update), fields(user_id = %update.id))]
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<AuthResponse, ApiError> {
        self.put_json("usuarios", update).await
    }

    /// Change another user's role (back-office).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(user_id = %change.user_id, role_id = %change.role_id))]
    pub async fn change_user_role(&self, change: RoleChange) -> Result<(), ApiError> {
        self.put_unit("usuarios/rol", &change).await
    }
}
