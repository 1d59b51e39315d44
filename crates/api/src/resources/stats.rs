//! Dashboard statistics.
//!
//! Read-only aggregates scattered across the payment and order-line
//! resources; the low-stock listing lives with the inventory operations.

use tracing::instrument;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{MonthlySales, PaymentMethodUsage, TopProduct};

impl ApiClient {
    /// Fetch sales totals grouped by month.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not parse.
    #[instrument(skip(self))]
    pub async fn get_monthly_sales(&self) -> Result<Vec<MonthlySales>, ApiError> {
        self.get_json("pagos/ventas-mes").await
    }

    /// Fetch how often each payment method has been used.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not parse.
    #[instrument(skip(self))]
    pub async fn get_payment_method_usage(&self) -> Result<Vec<PaymentMethodUsage>, ApiError> {
        self.get_json("pagos/estadisticas-pagos").await
    }

    /// Fetch the best-selling products.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not parse.
    #[instrument(skip(self))]
    pub async fn get_top_products(&self) -> Result<Vec<TopProduct>, ApiError> {
        self.get_json("detalle-pedidos/top-vendidos").await
    }
}
