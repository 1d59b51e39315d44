//! Session lifecycle against the stub backend: restore on startup,
//! failed logins, and the denial hook wiping the session everywhere
//! when an authorized request comes back 401 or 403.
//!
//! Run with: cargo test -p minimarket-integration-tests

#![allow(clippy::unwrap_used)]

use minimarket_admin::UserDirectory;
use minimarket_api::{ApiClient, ApiConfig};
use minimarket_core::{InventoryId, PaymentMethodId};
use minimarket_integration_tests::{
    OrderOutcome, StubOptions, TestContext, inventory, payment_method, user_with_role,
};
use minimarket_storefront::SessionStore;
use rust_decimal::Decimal;

// ============================================================================
// Restore and login
// ============================================================================

#[tokio::test]
async fn test_session_restores_for_a_new_store_over_the_same_storage() {
    let ctx = TestContext::start(StubOptions {
        login_user: Some(user_with_role(7, "CLIENTE")),
        ..StubOptions::default()
    })
    .await;
    ctx.session.login("rosa@example.com", "secret").await.unwrap();

    // A fresh client and store, as a restarted app would build them.
    let config = ApiConfig::from_base_url(&ctx.stub.base_url()).unwrap();
    let client = ApiClient::new(&config);
    let restored = SessionStore::new(client.clone(), ctx.storage.clone()).await;

    assert!(restored.is_authenticated());
    assert_eq!(restored.current_user().unwrap().full_name(), "Rosa Quispe");
    assert!(client.has_bearer_token().await);
}

#[tokio::test]
async fn test_login_failure_surfaces_the_backend_message() {
    let ctx = TestContext::start(StubOptions::default()).await;

    let err = ctx
        .session
        .login("rosa@example.com", "wrong")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Validation error: Credenciales invalidas");
    assert!(!ctx.session.is_authenticated());
    assert!(!ctx.client.has_bearer_token().await);
}

// ============================================================================
// Denial hook
// ============================================================================

#[tokio::test]
async fn test_denied_admin_fetch_signs_the_user_out_everywhere() {
    let ctx = TestContext::start(StubOptions {
        login_user: Some(user_with_role(1, "ADMIN")),
        deny_admin: true,
        ..StubOptions::default()
    })
    .await;
    ctx.session.login("rosa@example.com", "secret").await.unwrap();
    assert!(ctx.session.is_authenticated());
    assert!(ctx.storage.contains("session"));

    let directory = UserDirectory::new(ctx.client.clone(), ctx.session.clone());
    let err = directory.users().await.unwrap_err();

    assert!(err.is_denied());
    // One 403 cleans up memory, the bearer token, and the disk copy.
    assert!(!ctx.session.is_authenticated());
    assert!(!ctx.client.has_bearer_token().await);
    assert!(!ctx.storage.contains("session"));
}

#[tokio::test]
async fn test_denial_during_checkout_signs_the_user_out() {
    let ctx = TestContext::start(StubOptions {
        inventories: vec![inventory(3, "Leche Gloria", Decimal::new(550, 2), 10)],
        payment_methods: vec![payment_method(1, "Yape")],
        login_user: Some(user_with_role(7, "CLIENTE")),
        order_outcome: OrderOutcome::Deny,
        deny_admin: false,
    })
    .await;
    ctx.session.login("rosa@example.com", "secret").await.unwrap();

    ctx.catalog.refresh().await.unwrap();
    let entry = ctx.catalog.entry(InventoryId::new(3)).unwrap();
    ctx.cart.add(&entry);
    ctx.checkout.open().await.unwrap();
    ctx.checkout
        .select_payment_method(PaymentMethodId::new(1))
        .unwrap();

    let err = ctx.checkout.submit().await.unwrap_err();

    assert_eq!(err.to_string(), "Authorization denied (HTTP 403)");
    assert!(!err.is_stock_conflict());
    // The denial hook ran; the cart is kept for whoever signs in next.
    assert!(!ctx.session.is_authenticated());
    assert!(!ctx.storage.contains("session"));
    assert!(!ctx.cart.is_empty());
}
