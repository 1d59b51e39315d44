//! Order operations.
//!
//! Checkout and the back-office share the resource but send different
//! request shapes; see the `order` model module.

use minimarket_core::{OrderId, UserId};
use tracing::instrument;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{AdminOrderRequest, Order, OrderRequest};

impl ApiClient {
    /// Fetch every order (back-office listing).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not parse.
    #[instrument(skip(self))]
    pub async fn get_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.get_json("pedidos").await
    }

    /// Fetch the orders placed by one customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not parse.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn get_customer_orders(&self, user_id: UserId) -> Result<Vec<Order>, ApiError> {
        self.get_json(&format!("pedidos/cliente/{user_id}")).await
    }

    /// Submit a checkout order. The backend prices the lines and answers
    /// 201 with no body the caller needs.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::StockConflict`] when the server rejects a line
    /// for insufficient stock, or another variant if the request fails.
    #[instrument(skip(self, request), fields(line_count = request.lines.len()))]
    pub async fn place_order(&self, request: &OrderRequest) -> Result<(), ApiError> {
        self.post_unit("pedidos", request).await
    }

    /// Create an order from the back-office screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the
    /// draft.
    #[instrument(skip(self, request), fields(line_count = request.lines.len()))]
    pub async fn create_order(&self, request: &AdminOrderRequest) -> Result<(), ApiError> {
        self.post_unit("pedidos", request).await
    }

    /// Update an order from the back-office screen. The order id rides in
    /// the body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the
    /// draft.
    #[instrument(skip(self, request), fields(line_count = request.lines.len()))]
    pub async fn update_order(&self, request: &AdminOrderRequest) -> Result<(), ApiError> {
        self.put_unit("pedidos", request).await
    }

    /// Delete an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn delete_order(&self, id: OrderId) -> Result<(), ApiError> {
        self.delete_unit(&format!("pedidos/{id}")).await
    }
}
