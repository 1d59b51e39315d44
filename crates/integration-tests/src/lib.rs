//! End-to-end test support: an in-process stub of the minimarket REST
//! backend plus the real stores wired against it.
//!
//! Each test starts its own [`StubApi`] on an ephemeral port, so tests
//! run in parallel without sharing state. The stores under test are the
//! production ones; only the far side of the HTTP connection is fake.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p minimarket-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
// Support helpers panic on wiring mistakes instead of returning errors.
#![allow(clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post, put};
use axum::Router;
use minimarket_api::models::{
    AuthResponse, Inventory, PaymentMethod, Product, ProductCategory, RoleRecord,
    SupplierSummary, User,
};
use minimarket_api::{ApiClient, ApiConfig};
use minimarket_core::{CategoryId, InventoryId, PaymentMethodId, ProductId, RoleId, SupplierId, UserId};
use minimarket_storefront::{CartStore, CatalogStore, CheckoutFlow, SessionStore, Storage};
use rust_decimal::Decimal;
use serde_json::json;

// =============================================================================
// Stub backend
// =============================================================================

/// How the stub answers `POST pedidos`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderOutcome {
    /// Accept the order.
    #[default]
    Accept,
    /// Reject with `409` and a stock message, as the backend does when
    /// someone else bought the stock first.
    StockConflict,
    /// Reject with `403`, as the backend does for a stale token.
    Deny,
}

/// Fixture data and behavior for one stub instance.
#[derive(Debug, Clone, Default)]
pub struct StubOptions {
    /// Served by `GET inventarios`.
    pub inventories: Vec<Inventory>,
    /// Served by `GET metodos-pago`.
    pub payment_methods: Vec<PaymentMethod>,
    /// Account returned by `POST auth/login` for any credentials.
    /// `None` makes every login attempt fail with `401`.
    pub login_user: Option<User>,
    pub order_outcome: OrderOutcome,
    /// When set, the admin endpoints (`usuarios`, `usuarios/rol`)
    /// answer `403` even with a bearer token.
    pub deny_admin: bool,
}

struct StubState {
    options: StubOptions,
    inventory_hits: AtomicUsize,
    user_hits: AtomicUsize,
    orders_placed: AtomicUsize,
    roles_changed: AtomicUsize,
    images_stored: AtomicUsize,
}

/// A stub minimarket backend listening on an ephemeral local port.
///
/// The server task is aborted on drop.
pub struct StubApi {
    addr: SocketAddr,
    state: Arc<StubState>,
    server: tokio::task::JoinHandle<()>,
}

impl StubApi {
    /// Bind `127.0.0.1:0` and serve the stub routes until dropped.
    pub async fn start(options: StubOptions) -> Self {
        let state = Arc::new(StubState {
            options,
            inventory_hits: AtomicUsize::new(0),
            user_hits: AtomicUsize::new(0),
            orders_placed: AtomicUsize::new(0),
            roles_changed: AtomicUsize::new(0),
            images_stored: AtomicUsize::new(0),
        });

        let app = Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/inventarios", get(list_inventories))
            .route("/api/metodos-pago", get(list_payment_methods))
            .route("/api/pedidos", post(place_order))
            .route("/api/usuarios", get(list_users))
            .route("/api/usuarios/rol", put(change_role))
            .route("/api/images", post(store_image))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub listener");
        let addr = listener.local_addr().expect("stub listener address");
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve stub backend");
        });

        Self { addr, state, server }
    }

    /// Base URL in the shape `ApiConfig::from_base_url` expects.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// How many times `GET inventarios` was served.
    #[must_use]
    pub fn inventory_hits(&self) -> usize {
        self.state.inventory_hits.load(Ordering::SeqCst)
    }

    /// How many times `GET usuarios` was served.
    #[must_use]
    pub fn user_hits(&self) -> usize {
        self.state.user_hits.load(Ordering::SeqCst)
    }

    /// How many orders `POST pedidos` accepted.
    #[must_use]
    pub fn orders_placed(&self) -> usize {
        self.state.orders_placed.load(Ordering::SeqCst)
    }

    /// How many role changes `PUT usuarios/rol` accepted.
    #[must_use]
    pub fn roles_changed(&self) -> usize {
        self.state.roles_changed.load(Ordering::SeqCst)
    }

    /// How many uploads `POST images` stored.
    #[must_use]
    pub fn images_stored(&self) -> usize {
        self.state.images_stored.load(Ordering::SeqCst)
    }
}

impl Drop for StubApi {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn login(State(state): State<Arc<StubState>>) -> Response {
    match &state.options.login_user {
        Some(user) => Json(AuthResponse {
            user: user.clone(),
            token: "stub-token".to_string(),
        })
        .into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Credenciales invalidas" })),
        )
            .into_response(),
    }
}

async fn list_inventories(State(state): State<Arc<StubState>>) -> Json<Vec<Inventory>> {
    state.inventory_hits.fetch_add(1, Ordering::SeqCst);
    Json(state.options.inventories.clone())
}

async fn list_payment_methods(State(state): State<Arc<StubState>>) -> Json<Vec<PaymentMethod>> {
    Json(state.options.payment_methods.clone())
}

async fn place_order(State(state): State<Arc<StubState>>) -> Response {
    match state.options.order_outcome {
        OrderOutcome::Accept => {
            state.orders_placed.fetch_add(1, Ordering::SeqCst);
            Json(json!({})).into_response()
        }
        OrderOutcome::StockConflict => (
            StatusCode::CONFLICT,
            Json(json!({ "message": "Stock insuficiente para el producto" })),
        )
            .into_response(),
        OrderOutcome::Deny => StatusCode::FORBIDDEN.into_response(),
    }
}

async fn list_users(State(state): State<Arc<StubState>>) -> Response {
    if state.options.deny_admin {
        return StatusCode::FORBIDDEN.into_response();
    }
    state.user_hits.fetch_add(1, Ordering::SeqCst);
    let users: Vec<User> = state.options.login_user.clone().into_iter().collect();
    Json(users).into_response()
}

async fn change_role(State(state): State<Arc<StubState>>) -> Response {
    if state.options.deny_admin {
        return StatusCode::FORBIDDEN.into_response();
    }
    state.roles_changed.fetch_add(1, Ordering::SeqCst);
    StatusCode::OK.into_response()
}

/// Accepts the single `image` multipart field and answers `201` with the
/// name the upload was stored under, prefixed so tests can tell the
/// submitted name flowed through.
async fn store_image(State(state): State<Arc<StubState>>, mut multipart: Multipart) -> Response {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("image") {
            let name = field.file_name().unwrap_or("upload.bin").to_string();
            if field.bytes().await.is_err() {
                break;
            }
            state.images_stored.fetch_add(1, Ordering::SeqCst);
            return (StatusCode::CREATED, format!("stored-{name}")).into_response();
        }
    }
    StatusCode::BAD_REQUEST.into_response()
}

// =============================================================================
// Test context
// =============================================================================

/// The real client and stores wired against one stub instance, with a
/// fresh scratch storage directory per context.
pub struct TestContext {
    pub stub: StubApi,
    pub client: ApiClient,
    pub storage: Storage,
    pub session: SessionStore,
    pub catalog: CatalogStore,
    pub cart: CartStore,
    pub checkout: CheckoutFlow,
}

impl TestContext {
    /// Start a stub with `options` and build the full store graph
    /// against it.
    pub async fn start(options: StubOptions) -> Self {
        let stub = StubApi::start(options).await;
        let config = ApiConfig::from_base_url(&stub.base_url()).expect("stub base url");
        let client = ApiClient::new(&config);
        let storage = Storage::new(
            std::env::temp_dir().join(format!("minimarket-e2e-{}", uuid::Uuid::new_v4())),
        );
        let session = SessionStore::new(client.clone(), storage.clone()).await;
        let catalog = CatalogStore::new(client.clone());
        let cart = CartStore::new(storage.clone());
        let checkout = CheckoutFlow::new(
            client.clone(),
            cart.clone(),
            catalog.clone(),
            session.clone(),
        );
        Self {
            stub,
            client,
            storage,
            session,
            catalog,
            cart,
            checkout,
        }
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// A sellable inventory record with a one-product, one-supplier shape.
#[must_use]
pub fn inventory(id: i32, name: &str, sale_price: Decimal, stock: u32) -> Inventory {
    Inventory {
        id: InventoryId::new(id),
        stock,
        sale_price,
        product: Product {
            id: ProductId::new(id),
            name: name.to_string(),
            description: String::new(),
            image: None,
            category: ProductCategory {
                id: CategoryId::new(1),
                name: "Abarrotes".to_string(),
            },
        },
        supplier: SupplierSummary {
            id: SupplierId::new(1),
            name: "Distribuidora Sur".to_string(),
        },
    }
}

#[must_use]
pub fn payment_method(id: i32, name: &str) -> PaymentMethod {
    PaymentMethod {
        id: PaymentMethodId::new(id),
        name: name.to_string(),
    }
}

/// An account fixture; `role_name` is the wire name (`ADMIN`,
/// `VENDEDOR`, `CLIENTE`).
#[must_use]
pub fn user_with_role(id: i32, role_name: &str) -> User {
    let role_id = match role_name {
        "ADMIN" => RoleId::new(1),
        "VENDEDOR" => RoleId::new(3),
        _ => RoleId::new(2),
    };
    User {
        id: UserId::new(id),
        first_name: "Rosa".to_string(),
        last_name: "Quispe".to_string(),
        email: "rosa@example.com".to_string(),
        dni: "45678912".to_string(),
        phone: "987654321".to_string(),
        image: None,
        role: RoleRecord {
            id: role_id,
            name: role_name.to_string(),
        },
    }
}
