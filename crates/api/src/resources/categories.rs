//! Category operations.

use minimarket_core::CategoryId;
use tracing::instrument;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::catalog::CategoryUpdate;
use crate::models::{Category, NewCategory};

impl ApiClient {
    /// Fetch all categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not parse.
    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get_json("categorias").await
    }

    /// Create a category. Callers refetch the listing to see the new row.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the
    /// draft.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create_category(&self, draft: &NewCategory) -> Result<(), ApiError> {
        self.post_unit("categorias", draft).await
    }

    /// Update a category in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the
    /// draft.
    #[instrument(skip(self, draft), fields(category_id = %id))]
    pub async fn update_category(
        &self,
        id: CategoryId,
        draft: &NewCategory,
    ) -> Result<(), ApiError> {
        self.put_unit("categorias", &CategoryUpdate { id, draft })
            .await
    }

    /// Delete a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, including when the backend
    /// refuses because products still reference the category.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn delete_category(&self, id: CategoryId) -> Result<(), ApiError> {
        self.delete_unit(&format!("categorias/{id}")).await
    }
}
