//! Inventory operations.
//!
//! `GET inventarios` is the public listing that feeds the storefront
//! catalog; the rest is back-office. Deletion takes the id as a query
//! parameter, not a path segment.

use minimarket_core::InventoryId;
use tracing::instrument;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::catalog::InventoryUpdate;
use crate::models::{Inventory, LowStockProduct, NewInventory};

impl ApiClient {
    /// Fetch all inventory records with their product and supplier graph.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not parse.
    #[instrument(skip(self))]
    pub async fn get_inventories(&self) -> Result<Vec<Inventory>, ApiError> {
        self.get_json("inventarios").await
    }

    /// Create an inventory record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the
    /// draft.
    #[instrument(skip(self, draft), fields(product_id = %draft.product_id))]
    pub async fn create_inventory(&self, draft: &NewInventory) -> Result<(), ApiError> {
        self.post_unit("inventarios", draft).await
    }

    /// Update an inventory record in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the
    /// draft.
    #[instrument(skip(self, draft), fields(inventory_id = %id))]
    pub async fn update_inventory(
        &self,
        id: InventoryId,
        draft: &NewInventory,
    ) -> Result<(), ApiError> {
        self.put_unit("inventarios", &InventoryUpdate { id, draft })
            .await
    }

    /// Delete an inventory record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(inventory_id = %id))]
    pub async fn delete_inventory(&self, id: InventoryId) -> Result<(), ApiError> {
        self.delete_unit(&format!("inventarios?id={id}")).await
    }

    /// Fetch products at or below the low-stock threshold.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not parse.
    #[instrument(skip(self))]
    pub async fn get_low_stock_products(&self) -> Result<Vec<LowStockProduct>, ApiError> {
        self.get_json("inventarios/stock-productos").await
    }

    /// Download the inventory spreadsheet report as raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn download_inventory_report(&self) -> Result<Vec<u8>, ApiError> {
        self.get_bytes("inventarios/reporte").await
    }
}
