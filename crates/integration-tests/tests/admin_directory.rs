//! Back-office user directory against the stub backend.
//!
//! Run with: cargo test -p minimarket-integration-tests

#![allow(clippy::unwrap_used)]

use minimarket_admin::UserDirectory;
use minimarket_core::{RoleId, UserId};
use minimarket_integration_tests::{StubOptions, TestContext, user_with_role};

fn admin_stub() -> StubOptions {
    StubOptions {
        login_user: Some(user_with_role(1, "ADMIN")),
        ..StubOptions::default()
    }
}

// ============================================================================
// Listing and role changes
// ============================================================================

#[tokio::test]
async fn test_directory_lists_accounts() {
    let ctx = TestContext::start(admin_stub()).await;
    ctx.session.login("rosa@example.com", "secret").await.unwrap();

    let directory = UserDirectory::new(ctx.client.clone(), ctx.session.clone());
    let users = directory.users().await.unwrap();

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].full_name(), "Rosa Quispe");
    assert_eq!(ctx.stub.user_hits(), 1);
}

#[tokio::test]
async fn test_role_change_refetches_the_listing() {
    let ctx = TestContext::start(admin_stub()).await;
    ctx.session.login("rosa@example.com", "secret").await.unwrap();

    let directory = UserDirectory::new(ctx.client.clone(), ctx.session.clone());
    let users = directory
        .change_role(UserId::new(2), RoleId::new(1))
        .await
        .unwrap();

    assert_eq!(ctx.stub.roles_changed(), 1);
    // The returned listing is a fresh fetch, not a local patch.
    assert_eq!(ctx.stub.user_hits(), 1);
    assert_eq!(users.len(), 1);
}

// ============================================================================
// Image upload
// ============================================================================

#[tokio::test]
async fn test_image_upload_returns_the_stored_name() {
    let ctx = TestContext::start(admin_stub()).await;
    ctx.session.login("rosa@example.com", "secret").await.unwrap();

    let stored = ctx
        .client
        .upload_image("promo.png", vec![0x89, 0x50, 0x4e, 0x47])
        .await
        .unwrap();

    assert_eq!(stored, "stored-promo.png");
    assert_eq!(ctx.stub.images_stored(), 1);
}
