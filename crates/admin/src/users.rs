//! User directory and role assignment. Administrators only, listing
//! included.

use minimarket_api::ApiClient;
use minimarket_api::models::{RoleChange, User};
use minimarket_core::{RoleId, UserId};
use minimarket_storefront::SessionStore;
use tracing::instrument;

use crate::error::AdminError;
use crate::policy;

/// The accounts screen: every registered user and their role.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    client: ApiClient,
    session: SessionStore,
}

impl UserDirectory {
    #[must_use]
    pub fn new(client: ApiClient, session: SessionStore) -> Self {
        Self { client, session }
    }

    fn authorize(&self, action: &str) -> Result<(), AdminError> {
        let role = self.session.role().ok_or(AdminError::NotSignedIn)?;
        if policy::admin_only(role) {
            Ok(())
        } else {
            Err(AdminError::Forbidden {
                role,
                action: format!("{action} users"),
            })
        }
    }

    /// List every account.
    #[instrument(skip(self))]
    pub async fn users(&self) -> Result<Vec<User>, AdminError> {
        self.authorize("list")?;
        Ok(self.client.get_users().await?)
    }

    /// Assign `role_id` to `user_id`, then return the refreshed listing.
    #[instrument(skip(self), fields(user = %user_id, role = %role_id))]
    pub async fn change_role(
        &self,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<Vec<User>, AdminError> {
        self.authorize("edit")?;
        self.client
            .change_user_role(RoleChange { user_id, role_id })
            .await?;
        self.users().await
    }
}
