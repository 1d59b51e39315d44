//! Payment method operations.

use minimarket_core::PaymentMethodId;
use tracing::instrument;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::catalog::PaymentMethodUpdate;
use crate::models::{NewPaymentMethod, PaymentMethod};

impl ApiClient {
    /// Fetch all payment methods. Checkout calls this on entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not parse.
    #[instrument(skip(self))]
    pub async fn get_payment_methods(&self) -> Result<Vec<PaymentMethod>, ApiError> {
        self.get_json("metodos-pago").await
    }

    /// Create a payment method.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the
    /// draft.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create_payment_method(&self, draft: &NewPaymentMethod) -> Result<(), ApiError> {
        self.post_unit("metodos-pago", draft).await
    }

    /// Update a payment method in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the
    /// draft.
    #[instrument(skip(self, draft), fields(payment_method_id = %id))]
    pub async fn update_payment_method(
        &self,
        id: PaymentMethodId,
        draft: &NewPaymentMethod,
    ) -> Result<(), ApiError> {
        self.put_unit("metodos-pago", &PaymentMethodUpdate { id, draft })
            .await
    }

    /// Delete a payment method.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, including when orders still
    /// reference the method.
    #[instrument(skip(self), fields(payment_method_id = %id))]
    pub async fn delete_payment_method(&self, id: PaymentMethodId) -> Result<(), ApiError> {
        self.delete_unit(&format!("metodos-pago/{id}")).await
    }
}
