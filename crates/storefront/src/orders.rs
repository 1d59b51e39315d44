//! The signed-in customer's order history.

use minimarket_api::ApiClient;
use minimarket_api::models::Order;
use tracing::instrument;

use crate::session::{SessionError, SessionStore};

/// Read-only view of the signed-in customer's past orders.
#[derive(Debug, Clone)]
pub struct OrderHistory {
    client: ApiClient,
    session: SessionStore,
}

impl OrderHistory {
    #[must_use]
    pub fn new(client: ApiClient, session: SessionStore) -> Self {
        Self { client, session }
    }

    /// Fetch the signed-in user's orders, in the backend's order.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotAuthenticated`] before any request when
    /// nobody is signed in.
    #[instrument(skip(self))]
    pub async fn my_orders(&self) -> Result<Vec<Order>, SessionError> {
        let user = self
            .session
            .current_user()
            .ok_or(SessionError::NotAuthenticated)?;
        Ok(self.client.get_customer_orders(user.id).await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use minimarket_api::ApiConfig;
    use minimarket_api::models::{AuthResponse, RoleRecord, User};
    use minimarket_core::{RoleId, UserId};

    use super::*;
    use crate::storage::Storage;

    // Nothing listens on port 1; requests fail at connect time.
    fn dead_client() -> ApiClient {
        ApiClient::new(&ApiConfig::from_base_url("http://127.0.0.1:1/api").unwrap())
    }

    fn scratch_storage(name: &str) -> Storage {
        Storage::new(std::env::temp_dir().join(format!(
            "minimarket-{name}-{}",
            uuid::Uuid::new_v4()
        )))
    }

    #[tokio::test]
    async fn test_history_requires_a_session() {
        let client = dead_client();
        let session = SessionStore::new(client.clone(), scratch_storage("orders-anon")).await;
        let history = OrderHistory::new(client, session);

        // A dead client would answer with an Api error, so
        // NotAuthenticated proves no request was attempted.
        assert!(matches!(
            history.my_orders().await,
            Err(SessionError::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn test_signed_in_history_reaches_the_wire() {
        let client = dead_client();
        let session = SessionStore::new(client.clone(), scratch_storage("orders-auth")).await;
        session
            .adopt(AuthResponse {
                user: User {
                    id: UserId::new(7),
                    first_name: "Maria".to_string(),
                    last_name: "Roque".to_string(),
                    email: "maria@example.com".to_string(),
                    dni: "12345678".to_string(),
                    phone: "999888777".to_string(),
                    image: None,
                    role: RoleRecord {
                        id: RoleId::new(2),
                        name: "CLIENTE".to_string(),
                    },
                },
                token: "test-token".to_string(),
            })
            .await
            .expect("adopt session");
        let history = OrderHistory::new(client, session);

        assert!(matches!(
            history.my_orders().await,
            Err(SessionError::Api(_))
        ));
    }
}
