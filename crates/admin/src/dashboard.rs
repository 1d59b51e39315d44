//! Sales and stock statistics for the back-office landing screen.

use minimarket_api::ApiClient;
use minimarket_api::models::{LowStockProduct, MonthlySales, PaymentMethodUsage, TopProduct};
use minimarket_storefront::SessionStore;
use tracing::instrument;

use crate::error::AdminError;
use crate::policy;

/// Everything the landing screen charts in one load.
#[derive(Debug, Clone)]
pub struct DashboardStats {
    pub monthly_sales: Vec<MonthlySales>,
    pub payment_usage: Vec<PaymentMethodUsage>,
    pub top_products: Vec<TopProduct>,
    pub low_stock: Vec<LowStockProduct>,
}

/// Loads the four statistics feeds behind the staff policy.
#[derive(Debug, Clone)]
pub struct Dashboard {
    client: ApiClient,
    session: SessionStore,
}

impl Dashboard {
    #[must_use]
    pub fn new(client: ApiClient, session: SessionStore) -> Self {
        Self { client, session }
    }

    /// Fetch all four feeds. Customers are denied before any request.
    ///
    /// The first failing feed aborts the load; the screen retries as a
    /// whole rather than charting partial data.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<DashboardStats, AdminError> {
        let role = self.session.role().ok_or(AdminError::NotSignedIn)?;
        if !policy::staff(role) {
            return Err(AdminError::Forbidden {
                role,
                action: "view the dashboard".to_string(),
            });
        }

        Ok(DashboardStats {
            monthly_sales: self.client.get_monthly_sales().await?,
            payment_usage: self.client.get_payment_method_usage().await?,
            top_products: self.client.get_top_products().await?,
            low_stock: self.client.get_low_stock_products().await?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use minimarket_api::ApiConfig;
    use minimarket_api::models::{AuthResponse, RoleRecord, User};
    use minimarket_core::{Role, RoleId, UserId};
    use minimarket_storefront::Storage;

    use super::*;

    // Nothing listens on port 1; requests fail at connect time.
    fn dead_client() -> ApiClient {
        ApiClient::new(&ApiConfig::from_base_url("http://127.0.0.1:1/api").unwrap())
    }

    async fn dashboard_as(name: &str, role: Option<Role>) -> Dashboard {
        let client = dead_client();
        let storage = Storage::new(std::env::temp_dir().join(format!(
            "minimarket-{name}-{}",
            uuid::Uuid::new_v4()
        )));
        let session = SessionStore::new(client.clone(), storage).await;
        if let Some(role) = role {
            let user = User {
                id: UserId::new(1),
                first_name: "Rosa".to_string(),
                last_name: "Quispe".to_string(),
                email: "rosa@minimarketroque.pe".to_string(),
                dni: "45678912".to_string(),
                phone: "987654321".to_string(),
                image: None,
                role: RoleRecord {
                    id: RoleId::new(1),
                    name: role.wire_name().to_string(),
                },
            };
            session
                .adopt(AuthResponse {
                    user,
                    token: "test-token".to_string(),
                })
                .await
                .expect("adopt session");
        }
        Dashboard::new(client, session)
    }

    #[tokio::test]
    async fn test_anonymous_load_is_not_signed_in() {
        let dashboard = dashboard_as("dash-anon", None).await;
        assert!(matches!(
            dashboard.load().await,
            Err(AdminError::NotSignedIn)
        ));
    }

    #[tokio::test]
    async fn test_customer_is_denied_before_any_request() {
        let dashboard = dashboard_as("dash-customer", Some(Role::Customer)).await;

        // A dead client would answer with an Api error, so a Forbidden
        // error proves no request was attempted.
        let err = dashboard.load().await.unwrap_err();
        assert!(matches!(
            err,
            AdminError::Forbidden { role: Role::Customer, .. }
        ));
    }

    #[tokio::test]
    async fn test_seller_load_reaches_the_wire() {
        let dashboard = dashboard_as("dash-seller", Some(Role::Seller)).await;
        let err = dashboard.load().await.unwrap_err();
        assert!(matches!(err, AdminError::Api(_)));
    }
}
