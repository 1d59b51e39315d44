//! Product operations.

use minimarket_core::ProductId;
use tracing::instrument;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::catalog::ProductUpdate;
use crate::models::{NewProduct, Product};

impl ApiClient {
    /// Fetch all products with their category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not parse.
    #[instrument(skip(self))]
    pub async fn get_products(&self) -> Result<Vec<Product>, ApiError> {
        self.get_json("productos").await
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the
    /// draft.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create_product(&self, draft: &NewProduct) -> Result<(), ApiError> {
        self.post_unit("productos", draft).await
    }

    /// Update a product in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the
    /// draft.
    #[instrument(skip(self, draft), fields(product_id = %id))]
    pub async fn update_product(&self, id: ProductId, draft: &NewProduct) -> Result<(), ApiError> {
        self.put_unit("productos", &ProductUpdate { id, draft })
            .await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, including when inventory
    /// rows still reference the product.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        self.delete_unit(&format!("productos/{id}")).await
    }
}
