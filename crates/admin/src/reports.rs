//! Inventory report download.
//!
//! The backend renders the spreadsheet; this module only authorizes the
//! request and writes the bytes to disk under the conventional name.

use std::path::{Path, PathBuf};

use minimarket_api::ApiClient;
use minimarket_storefront::SessionStore;
use tracing::{info, instrument};

use crate::error::AdminError;
use crate::policy;

/// File name the inventory spreadsheet is saved under.
pub const INVENTORY_REPORT_FILE_NAME: &str = "reporte_inventario.xlsx";

/// Downloads back-office reports.
#[derive(Debug, Clone)]
pub struct Reports {
    client: ApiClient,
    session: SessionStore,
}

impl Reports {
    #[must_use]
    pub fn new(client: ApiClient, session: SessionStore) -> Self {
        Self { client, session }
    }

    /// Download the inventory spreadsheet into `dir` and return the
    /// written path. Staff only.
    #[instrument(skip(self), fields(dir = %dir.display()))]
    pub async fn save_inventory_report(&self, dir: &Path) -> Result<PathBuf, AdminError> {
        let role = self.session.role().ok_or(AdminError::NotSignedIn)?;
        if !policy::staff(role) {
            return Err(AdminError::Forbidden {
                role,
                action: "download the inventory report".to_string(),
            });
        }

        let bytes = self.client.download_inventory_report().await?;
        std::fs::create_dir_all(dir)?;
        let path = dir.join(INVENTORY_REPORT_FILE_NAME);
        std::fs::write(&path, &bytes)?;
        info!(path = %path.display(), size = bytes.len(), "Saved inventory report");
        Ok(path)
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

    async fn reports_as(name: &str, role: Role) -> Reports {
        let client = dead_client();
        let storage = Storage::new(std::env::temp_dir().join(format!(
            "minimarket-{name}-{}",
            uuid::Uuid::new_v4()
        )));
        let session = SessionStore::new(client.clone(), storage).await;
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
        Reports::new(client, session)
    }

    #[tokio::test]
    async fn test_customer_is_denied_and_nothing_is_written() {
        let reports = reports_as("report-customer", Role::Customer).await;
        let dir = std::env::temp_dir().join(format!("minimarket-report-out-{}", uuid::Uuid::new_v4()));

        let err = reports.save_inventory_report(&dir).await.unwrap_err();
        assert!(matches!(err, AdminError::Forbidden { .. }));
        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn test_failed_download_writes_no_file() {
        let reports = reports_as("report-admin", Role::Admin).await;
        let dir = std::env::temp_dir().join(format!("minimarket-report-out-{}", uuid::Uuid::new_v4()));

        let err = reports.save_inventory_report(&dir).await.unwrap_err();
        assert!(matches!(err, AdminError::Api(_)));
        assert!(!dir.join(INVENTORY_REPORT_FILE_NAME).exists());
    }
}
