//! Supplier operations.

use minimarket_core::SupplierId;
use tracing::instrument;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::catalog::SupplierUpdate;
use crate::models::{NewSupplier, Supplier};

impl ApiClient {
    /// Fetch all suppliers.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not parse.
    #[instrument(skip(self))]
    pub async fn get_suppliers(&self) -> Result<Vec<Supplier>, ApiError> {
        self.get_json("proveedores").await
    }

    /// Create a supplier.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the
    /// draft.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create_supplier(&self, draft: &NewSupplier) -> Result<(), ApiError> {
        self.post_unit("proveedores", draft).await
    }

    /// Update a supplier in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the
    /// draft.
    #[instrument(skip(self, draft), fields(supplier_id = %id))]
    pub async fn update_supplier(
        &self,
        id: SupplierId,
        draft: &NewSupplier,
    ) -> Result<(), ApiError> {
        self.put_unit("proveedores", &SupplierUpdate { id, draft })
            .await
    }

    /// Delete a supplier.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(supplier_id = %id))]
    pub async fn delete_supplier(&self, id: SupplierId) -> Result<(), ApiError> {
        self.delete_unit(&format!("proveedores/{id}")).await
    }
}
