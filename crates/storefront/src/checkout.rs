//! Checkout flow: payment method selection and order submission.
//!
//! The flow is a small state machine over the cart, catalog, and session
//! stores. Guards on [`CheckoutFlow::submit`] run before any request is
//! made, so an empty cart or a missing payment selection never reaches
//! the backend. The backend owns stock: a submission can still come back
//! as a stock conflict even when the cart looked fine.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Local;
use minimarket_api::models::{OrderLineRequest, OrderRequest, OrderRequestHeader, PaymentMethod};
use minimarket_api::{ApiClient, ApiError};
use minimarket_core::PaymentMethodId;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::cart::{CartLine, CartStore};
use crate::catalog::CatalogStore;
use crate::receipt::Receipt;
use crate::session::SessionStore;

/// Where the flow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutState {
    /// Checkout has not been opened.
    #[default]
    Idle,
    /// Payment methods are being fetched.
    LoadingPaymentMethods,
    /// Open and accepting a payment selection or a submission.
    Ready,
    /// An order request is in flight.
    Submitting,
    /// The last submission placed an order.
    Succeeded,
    /// The last submission was rejected or failed.
    Failed,
}

impl std::fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::LoadingPaymentMethods => "loading payment methods",
            Self::Ready => "ready",
            Self::Submitting => "submitting",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Errors raised by the checkout flow.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The flow is not in a state that accepts this operation.
    #[error("checkout is not ready (currently {state})")]
    NotReady { state: CheckoutState },

    /// Submission was attempted with an empty cart.
    #[error("the cart is empty")]
    EmptyCart,

    /// Submission was attempted without a payment method selected.
    #[error("no payment method selected")]
    NoPaymentMethod,

    /// The selected id is not among the fetched payment methods.
    #[error("unknown payment method: {0}")]
    UnknownPaymentMethod(PaymentMethodId),

    /// Submission was attempted without a signed-in user.
    #[error("not signed in")]
    NotAuthenticated,

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl CheckoutError {
    /// Whether the backend rejected the order because stock ran out
    /// between the cart being filled and the order arriving.
    #[must_use]
    pub const fn is_stock_conflict(&self) -> bool {
        matches!(self, Self::Api(ApiError::StockConflict(_)))
    }
}

#[derive(Debug, Default)]
struct CheckoutInner {
    state: CheckoutState,
    methods: Vec<PaymentMethod>,
    selected: Option<PaymentMethodId>,
    last_error: Option<String>,
}

/// Checkout state machine over the injected stores.
#[derive(Debug, Clone)]
pub struct CheckoutFlow {
    client: ApiClient,
    cart: CartStore,
    catalog: CatalogStore,
    session: SessionStore,
    inner: Arc<RwLock<CheckoutInner>>,
}

impl CheckoutFlow {
    /// Create an idle flow over the given stores.
    #[must_use]
    pub fn new(
        client: ApiClient,
        cart: CartStore,
        catalog: CatalogStore,
        session: SessionStore,
    ) -> Self {
        Self {
            client,
            cart,
            catalog,
            session,
            inner: Arc::new(RwLock::new(CheckoutInner::default())),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, CheckoutInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CheckoutInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Open checkout and fetch the payment methods.
    ///
    /// The flow lands in [`CheckoutState::Ready`] either way; when the
    /// fetch fails the method list is empty and the error is recorded, so
    /// the visitor can dismiss and reopen to retry. A previous selection
    /// survives only if the fresh list still contains it.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`ApiError`] when the fetch fails.
    pub async fn open(&self) -> Result<(), ApiError> {
        {
            let mut inner = self.write();
            if inner.state == CheckoutState::Submitting {
                tracing::debug!("Ignoring open() while a submission is in flight");
                return Ok(());
            }
            inner.state = CheckoutState::LoadingPaymentMethods;
            inner.last_error = None;
        }

        let fetched = self.client.get_payment_methods().await;

        let mut inner = self.write();
        inner.state = CheckoutState::Ready;
        match fetched {
            Ok(methods) => {
                if let Some(id) = inner.selected {
                    if !methods.iter().any(|method| method.id == id) {
                        inner.selected = None;
                    }
                }
                inner.methods = methods;
                Ok(())
            }
            Err(e) => {
                inner.methods.clear();
                inner.selected = None;
                inner.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Select one of the fetched payment methods.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::NotReady`] outside the ready state and
    /// [`CheckoutError::UnknownPaymentMethod`] for an id that is not in
    /// the fetched list.
    pub fn select_payment_method(&self, id: PaymentMethodId) -> Result<(), CheckoutError> {
        let mut inner = self.write();
        if inner.state != CheckoutState::Ready {
            return Err(CheckoutError::NotReady { state: inner.state });
        }
        if !inner.methods.iter().any(|method| method.id == id) {
            return Err(CheckoutError::UnknownPaymentMethod(id));
        }
        inner.selected = Some(id);
        Ok(())
    }

    /// Place the order for the current cart.
    ///
    /// All guards run before any request: the flow must be ready, the
    /// cart non-empty, a payment method selected, and a user signed in.
    /// On success the cart is cleared, the catalog is refreshed once, and
    /// the receipt for the placed order is returned.
    ///
    /// # Errors
    ///
    /// Returns a guard error without touching the network, or
    /// [`CheckoutError::Api`] when the backend rejects the order. A
    /// rejection for stale stock is [`ApiError::StockConflict`]; see
    /// [`CheckoutError::is_stock_conflict`].
    pub async fn submit(&self) -> Result<Receipt, CheckoutError> {
        let (user, lines, method) = {
            let mut inner = self.write();
            if inner.state != CheckoutState::Ready {
                return Err(CheckoutError::NotReady { state: inner.state });
            }
            let lines = self.cart.lines();
            if lines.is_empty() {
                return Err(CheckoutError::EmptyCart);
            }
            let method = inner
                .selected
                .and_then(|id| inner.methods.iter().find(|m| m.id == id).cloned())
                .ok_or(CheckoutError::NoPaymentMethod)?;
            let user = self
                .session
                .current_user()
                .ok_or(CheckoutError::NotAuthenticated)?;
            inner.state = CheckoutState::Submitting;
            inner.last_error = None;
            (user, lines, method)
        };

        let request = OrderRequest {
            order: OrderRequestHeader { user_id: user.id },
            lines: lines
                .iter()
                .map(|line| OrderLineRequest {
                    inventory_id: line.inventory_id,
                    quantity: line.quantity,
                })
                .collect(),
            payment_method_id: method.id,
        };

        if let Err(e) = self.client.place_order(&request).await {
            let mut inner = self.write();
            inner.state = CheckoutState::Failed;
            inner.last_error = Some(e.to_string());
            return Err(e.into());
        }

        let total = total_of(&lines);
        let receipt = Receipt::new(&user, &lines, &method.name, total, Local::now());

        self.cart.clear();
        if let Err(e) = self.catalog.refresh().await {
            // The order is already placed; stale stock just lingers until
            // the next refresh.
            tracing::warn!(error = %e, "Catalog refresh after checkout failed");
        }

        self.write().state = CheckoutState::Succeeded;
        Ok(receipt)
    }

    /// Acknowledge a finished submission, returning to the ready state.
    /// The payment selection is retained. Calls in other states are
    /// ignored.
    pub fn dismiss(&self) {
        let mut inner = self.write();
        if matches!(
            inner.state,
            CheckoutState::Succeeded | CheckoutState::Failed
        ) {
            inner.state = CheckoutState::Ready;
        }
    }

    #[must_use]
    pub fn state(&self) -> CheckoutState {
        self.read().state
    }

    /// The fetched payment methods, in backend order.
    #[must_use]
    pub fn payment_methods(&self) -> Vec<PaymentMethod> {
        self.read().methods.clone()
    }

    /// The currently selected payment method, if any.
    #[must_use]
    pub fn selected_method(&self) -> Option<PaymentMethod> {
        let inner = self.read();
        inner
            .selected
            .and_then(|id| inner.methods.iter().find(|m| m.id == id).cloned())
    }

    /// The error recorded by the last failed fetch or submission.
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.read().last_error.clone()
    }

    /// Total the visitor is about to pay, rounded to two decimal places.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.cart.total()
    }

    #[cfg(test)]
    fn force_ready(&self, methods: Vec<PaymentMethod>, selected: Option<PaymentMethodId>) {
        let mut inner = self.write();
        inner.state = CheckoutState::Ready;
        inner.methods = methods;
        inner.selected = selected;
    }

    #[cfg(test)]
    fn force_state(&self, state: CheckoutState) {
        self.write().state = state;
    }
}

/// Order total as shown to the visitor.
fn total_of(lines: &[CartLine]) -> Decimal {
    lines
        .iter()
        .map(CartLine::subtotal)
        .sum::<Decimal>()
        .round_dp(2)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use minimarket_api::ApiConfig;
    use minimarket_api::models::{RoleRecord, User};
    use minimarket_core::{InventoryId, ProductId, RoleId, UserId};

    use crate::catalog::CatalogEntry;
    use crate::session::Session;
    use crate::storage::Storage;

    use super::*;

    fn dead_client() -> ApiClient {
        // Nothing listens on port 1; requests fail at connect time.
        ApiClient::new(&ApiConfig::from_base_url("http://127.0.0.1:1/api").unwrap())
    }

    fn scratch_storage() -> Storage {
        let dir =
            std::env::temp_dir().join(format!("minimarket-checkout-{}", uuid::Uuid::new_v4()));
        Storage::new(dir)
    }

    fn customer() -> User {
        User {
            id: UserId::new(5),
            first_name: "Rosa".to_string(),
            last_name: "Quispe".to_string(),
            email: "rosa@example.com".to_string(),
            dni: "45678912".to_string(),
            phone: "987654321".to_string(),
            image: None,
            role: RoleRecord {
                id: RoleId::new(2),
                name: "CLIENTE".to_string(),
            },
        }
    }

    fn entry(inventory_id: i32, stock: u32) -> CatalogEntry {
        CatalogEntry {
            product_id: ProductId::new(inventory_id),
            inventory_id: InventoryId::new(inventory_id),
            name: format!("Producto {inventory_id}"),
            description: String::new(),
            unit_price: Decimal::new(550, 2),
            category_name: "Abarrotes".to_string(),
            supplier_name: "Distribuidora Sur".to_string(),
            stock,
            image_ref: None,
        }
    }

    fn cash() -> PaymentMethod {
        PaymentMethod {
            id: PaymentMethodId::new(1),
            name: "Efectivo".to_string(),
        }
    }

    async fn flow(signed_in: bool) -> (CheckoutFlow, CartStore) {
        let storage = scratch_storage();
        if signed_in {
            let session = Session {
                user: customer(),
                token: "tok-123".to_string(),
            };
            storage.save("session", &session).unwrap();
        }
        let client = dead_client();
        let cart = CartStore::new(storage.clone());
        let catalog = CatalogStore::new(client.clone());
        let session = SessionStore::new(client.clone(), storage).await;
        let flow = CheckoutFlow::new(client, cart.clone(), catalog, session);
        (flow, cart)
    }

    #[tokio::test]
    async fn test_new_flow_is_idle() {
        let (flow, _cart) = flow(true).await;
        assert_eq!(flow.state(), CheckoutState::Idle);
        assert!(flow.payment_methods().is_empty());
        assert!(flow.selected_method().is_none());
    }

    #[tokio::test]
    async fn test_failed_open_lands_ready_with_error() {
        let (flow, _cart) = flow(true).await;

        let result = flow.open().await;

        assert!(result.is_err());
        assert_eq!(flow.state(), CheckoutState::Ready);
        assert!(flow.payment_methods().is_empty());
        assert!(flow.last_error().is_some());
    }

    #[tokio::test]
    async fn test_select_outside_ready_is_rejected() {
        let (flow, _cart) = flow(true).await;
        let result = flow.select_payment_method(PaymentMethodId::new(1));
        assert!(matches!(result, Err(CheckoutError::NotReady { .. })));
    }

    #[tokio::test]
    async fn test_select_unknown_method_is_rejected() {
        let (flow, _cart) = flow(true).await;
        flow.force_ready(vec![cash()], None);

        let result = flow.select_payment_method(PaymentMethodId::new(99));

        assert!(matches!(
            result,
            Err(CheckoutError::UnknownPaymentMethod(_))
        ));
        assert!(flow.selected_method().is_none());
    }

    #[tokio::test]
    async fn test_submit_outside_ready_is_rejected() {
        let (flow, _cart) = flow(true).await;
        let result = flow.submit().await;
        assert!(matches!(result, Err(CheckoutError::NotReady { .. })));
    }

    // A dead client would answer with an Api error, so a guard error
    // proves no request was attempted.
    #[tokio::test]
    async fn test_submit_rejects_empty_cart_before_any_request() {
        let (flow, _cart) = flow(true).await;
        flow.force_ready(vec![cash()], Some(cash().id));

        let result = flow.submit().await;

        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
        assert_eq!(flow.state(), CheckoutState::Ready);
    }

    #[tokio::test]
    async fn test_submit_requires_payment_selection_before_any_request() {
        let (flow, cart) = flow(true).await;
        cart.add(&entry(1, 5));
        flow.force_ready(vec![cash()], None);

        let result = flow.submit().await;

        assert!(matches!(result, Err(CheckoutError::NoPaymentMethod)));
        assert_eq!(flow.state(), CheckoutState::Ready);
    }

    #[tokio::test]
    async fn test_submit_requires_session() {
        let (flow, cart) = flow(false).await;
        cart.add(&entry(1, 5));
        flow.force_ready(vec![cash()], Some(cash().id));

        let result = flow.submit().await;

        assert!(matches!(result, Err(CheckoutError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn test_failed_submission_keeps_cart_and_records_error() {
        let (flow, cart) = flow(true).await;
        cart.add(&entry(1, 5));
        flow.force_ready(vec![cash()], Some(cash().id));

        let result = flow.submit().await;

        assert!(matches!(result, Err(CheckoutError::Api(_))));
        assert_eq!(flow.state(), CheckoutState::Failed);
        assert!(flow.last_error().is_some());
        assert!(!cart.is_empty());
    }

    #[tokio::test]
    async fn test_dismiss_returns_to_ready_and_keeps_selection() {
        let (flow, _cart) = flow(true).await;
        flow.force_ready(vec![cash()], Some(cash().id));
        flow.force_state(CheckoutState::Failed);

        flow.dismiss();

        assert_eq!(flow.state(), CheckoutState::Ready);
        assert_eq!(flow.selected_method().unwrap().id, cash().id);
    }

    #[tokio::test]
    async fn test_dismiss_outside_finished_states_is_ignored() {
        let (flow, _cart) = flow(true).await;
        flow.dismiss();
        assert_eq!(flow.state(), CheckoutState::Idle);
    }

    #[tokio::test]
    async fn test_total_follows_cart() {
        let (flow, cart) = flow(true).await;
        cart.add(&entry(1, 5));
        cart.add(&entry(1, 5));

        // 2 * 5.50
        assert_eq!(flow.total(), Decimal::new(1100, 2));
    }

    #[test]
    fn test_stock_conflict_is_distinguishable() {
        let err = CheckoutError::Api(ApiError::StockConflict("Stock insuficiente".to_string()));
        assert!(err.is_stock_conflict());
        let err = CheckoutError::EmptyCart;
        assert!(!err.is_stock_conflict());
    }
}
