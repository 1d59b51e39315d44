//! Per-entity bindings onto the generic resource table.
//!
//! Each binding is a unit struct naming the listing shape, the draft
//! shape, the id, and which client calls carry them. Screen behavior
//! (policy checks, caching, refetch after mutation) all lives in
//! [`ResourceTable`].

use async_trait::async_trait;
use minimarket_api::models::{
    AdminOrderHeader, AdminOrderLine, AdminOrderRequest, Category, Inventory, NewCategory,
    NewInventory, NewPaymentMethod, NewProduct, NewRole, NewSupplier, Order, PaymentMethod,
    Product, RoleRecord, Supplier,
};
use minimarket_api::{ApiClient, ApiError};
use minimarket_core::{
    CategoryId, InventoryId, OrderId, OrderLineId, PaymentMethodId, ProductId, RoleId, SupplierId,
    UserId,
};
use rust_decimal::Decimal;

use crate::policy::ScreenPolicy;
use crate::table::{Resource, ResourceTable};

// =============================================================================
// Catalog screens
// =============================================================================

/// Categories screen.
pub struct Categories;

#[async_trait]
impl Resource for Categories {
    type Entity = Category;
    type Draft = NewCategory;
    type Id = CategoryId;

    const NAME: &'static str = "categories";
    const POLICY: ScreenPolicy = ScreenPolicy::STANDARD;

    fn id_of(entity: &Category) -> CategoryId {
        entity.id
    }

    async fn fetch(client: &ApiClient) -> Result<Vec<Category>, ApiError> {
        client.get_categories().await
    }

    async fn create(client: &ApiClient, draft: &NewCategory) -> Result<(), ApiError> {
        client.create_category(draft).await
    }

    async fn update(
        client: &ApiClient,
        id: CategoryId,
        draft: &NewCategory,
    ) -> Result<(), ApiError> {
        client.update_category(id, draft).await
    }

    async fn delete(client: &ApiClient, id: CategoryId) -> Result<(), ApiError> {
        client.delete_category(id).await
    }
}

/// Products screen.
pub struct Products;

#[async_trait]
impl Resource for Products {
    type Entity = Product;
    type Draft = NewProduct;
    type Id = ProductId;

    const NAME: &'static str = "products";
    const POLICY: ScreenPolicy = ScreenPolicy::STANDARD;

    fn id_of(entity: &Product) -> ProductId {
        entity.id
    }

    async fn fetch(client: &ApiClient) -> Result<Vec<Product>, ApiError> {
        client.get_products().await
    }

    async fn create(client: &ApiClient, draft: &NewProduct) -> Result<(), ApiError> {
        client.create_product(draft).await
    }

    async fn update(client: &ApiClient, id: ProductId, draft: &NewProduct) -> Result<(), ApiError> {
        client.update_product(id, draft).await
    }

    async fn delete(client: &ApiClient, id: ProductId) -> Result<(), ApiError> {
        client.delete_product(id).await
    }
}

/// Inventories screen.
pub struct Inventories;

#[async_trait]
impl Resource for Inventories {
    type Entity = Inventory;
    type Draft = NewInventory;
    type Id = InventoryId;

    const NAME: &'static str = "inventories";
    const POLICY: ScreenPolicy = ScreenPolicy::STANDARD;

    fn id_of(entity: &Inventory) -> InventoryId {
        entity.id
    }

    async fn fetch(client: &ApiClient) -> Result<Vec<Inventory>, ApiError> {
        client.get_inventories().await
    }

    async fn create(client: &ApiClient, draft: &NewInventory) -> Result<(), ApiError> {
        client.create_inventory(draft).await
    }

    async fn update(
        client: &ApiClient,
        id: InventoryId,
        draft: &NewInventory,
    ) -> Result<(), ApiError> {
        client.update_inventory(id, draft).await
    }

    async fn delete(client: &ApiClient, id: InventoryId) -> Result<(), ApiError> {
        client.delete_inventory(id).await
    }
}

/// Suppliers screen.
pub struct Suppliers;

#[async_trait]
impl Resource for Suppliers {
    type Entity = Supplier;
    type Draft = NewSupplier;
    type Id = SupplierId;

    const NAME: &'static str = "suppliers";
    const POLICY: ScreenPolicy = ScreenPolicy::STANDARD;

    fn id_of(entity: &Supplier) -> SupplierId {
        entity.id
    }

    async fn fetch(client: &ApiClient) -> Result<Vec<Supplier>, ApiError> {
        client.get_suppliers().await
    }

    async fn create(client: &ApiClient, draft: &NewSupplier) -> Result<(), ApiError> {
        client.create_supplier(draft).await
    }

    async fn update(
        client: &ApiClient,
        id: SupplierId,
        draft: &NewSupplier,
    ) -> Result<(), ApiError> {
        client.update_supplier(id, draft).await
    }

    async fn delete(client: &ApiClient, id: SupplierId) -> Result<(), ApiError> {
        client.delete_supplier(id).await
    }
}

/// Payment methods screen.
pub struct PaymentMethods;

#[async_trait]
impl Resource for PaymentMethods {
    type Entity = PaymentMethod;
    type Draft = NewPaymentMethod;
    type Id = PaymentMethodId;

    const NAME: &'static str = "payment methods";
    const POLICY: ScreenPolicy = ScreenPolicy::STANDARD;

    fn id_of(entity: &PaymentMethod) -> PaymentMethodId {
        entity.id
    }

    async fn fetch(client: &ApiClient) -> Result<Vec<PaymentMethod>, ApiError> {
        client.get_payment_methods().await
    }

    async fn create(client: &ApiClient, draft: &NewPaymentMethod) -> Result<(), ApiError> {
        client.create_payment_method(draft).await
    }

    async fn update(
        client: &ApiClient,
        id: PaymentMethodId,
        draft: &NewPaymentMethod,
    ) -> Result<(), ApiError> {
        client.update_payment_method(id, draft).await
    }

    async fn delete(client: &ApiClient, id: PaymentMethodId) -> Result<(), ApiError> {
        client.delete_payment_method(id).await
    }
}

/// Roles screen. Admin only, listing included.
pub struct Roles;

#[async_trait]
impl Resource for Roles {
    type Entity = RoleRecord;
    type Draft = NewRole;
    type Id = RoleId;

    const NAME: &'static str = "roles";
    const POLICY: ScreenPolicy = ScreenPolicy::ADMIN_ONLY;

    fn id_of(entity: &RoleRecord) -> RoleId {
        entity.id
    }

    async fn fetch(client: &ApiClient) -> Result<Vec<RoleRecord>, ApiError> {
        client.get_roles().await
    }

    async fn create(client: &ApiClient, draft: &NewRole) -> Result<(), ApiError> {
        client.create_role(draft).await
    }

    async fn update(client: &ApiClient, id: RoleId, draft: &NewRole) -> Result<(), ApiError> {
        client.update_role(id, draft).await
    }

    async fn delete(client: &ApiClient, id: RoleId) -> Result<(), ApiError> {
        client.delete_role(id).await
    }
}

// =============================================================================
// Orders screen
// =============================================================================

/// Editable state of the back-office order form.
#[derive(Debug, Clone)]
pub struct AdminOrderDraft {
    pub user_id: UserId,
    pub payment_method_id: PaymentMethodId,
    pub lines: Vec<AdminOrderDraftLine>,
}

/// One editable order line. `line_id` is set on rows that already exist
/// so the backend updates them in place instead of inserting.
#[derive(Debug, Clone, Copy)]
pub struct AdminOrderDraftLine {
    pub line_id: Option<OrderLineId>,
    pub inventory_id: InventoryId,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl AdminOrderDraft {
    /// Order total as the form shows it. The backend recomputes this on
    /// save and stays authoritative.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines
            .iter()
            .map(|line| line.unit_price * Decimal::from(line.quantity))
            .sum::<Decimal>()
            .round_dp(2)
    }

    fn to_request(&self, id: Option<OrderId>) -> AdminOrderRequest {
        AdminOrderRequest {
            order: AdminOrderHeader {
                id,
                user_id: self.user_id,
                total: self.total(),
            },
            lines: self
                .lines
                .iter()
                .map(|line| AdminOrderLine {
                    id: line.line_id,
                    inventory_id: line.inventory_id,
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                })
                .collect(),
            payment_method_id: self.payment_method_id,
        }
    }
}

/// Orders screen. Checkout places customer orders; this binding is the
/// back-office side: the full listing plus manual create and edit.
pub struct Orders;

#[async_trait]
impl Resource for Orders {
    type Entity = Order;
    type Draft = AdminOrderDraft;
    type Id = OrderId;

    const NAME: &'static str = "orders";
    const POLICY: ScreenPolicy = ScreenPolicy::STANDARD;

    fn id_of(entity: &Order) -> OrderId {
        entity.summary.id
    }

    async fn fetch(client: &ApiClient) -> Result<Vec<Order>, ApiError> {
        client.get_orders().await
    }

    async fn create(client: &ApiClient, draft: &AdminOrderDraft) -> Result<(), ApiError> {
        client.create_order(&draft.to_request(None)).await
    }

    async fn update(client: &ApiClient, id: OrderId, draft: &AdminOrderDraft) -> Result<(), ApiError> {
        client.update_order(&draft.to_request(Some(id))).await
    }

    async fn delete(client: &ApiClient, id: OrderId) -> Result<(), ApiError> {
        client.delete_order(id).await
    }
}

// =============================================================================
// Aliases
// =============================================================================

pub type CategoryTable = ResourceTable<Categories>;
pub type ProductTable = ResourceTable<Products>;
pub type InventoryTable = ResourceTable<Inventories>;
pub type SupplierTable = ResourceTable<Suppliers>;
pub type PaymentMethodTable = ResourceTable<PaymentMethods>;
pub type RoleTable = ResourceTable<Roles>;
pub type OrderTable = ResourceTable<Orders>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use minimarket_api::ApiConfig;
    use minimarket_api::models::{AuthResponse, RoleRecord, User};
    use minimarket_core::Role;
    use minimarket_storefront::{SessionStore, Storage};

    use super::*;
    use crate::error::AdminError;

    // Nothing listens on port 1; requests fail at connect time.
    fn dead_client() -> ApiClient {
        ApiClient::new(&ApiConfig::from_base_url("http://127.0.0.1:1/api").unwrap())
    }

    fn scratch_storage(name: &str) -> Storage {
        Storage::new(std::env::temp_dir().join(format!(
            "minimarket-{name}-{}",
            uuid::Uuid::new_v4()
        )))
    }

    fn staff_user(role: Role) -> User {
        User {
            id: UserId::new(1),
            first_name: "Rosa".to_string(),
            last_name: "Quispe".to_string(),
            email: "rosa@minimarketroque.pe".to_string(),
            dni: "45678912".to_string(),
            phone: "987654321".to_string(),
            image: None,
            role: RoleRecord {
                id: RoleId::new(1),
                name: role.wire_name().to_string(),
            },
        }
    }

    async fn signed_in_table(name: &str, role: Role) -> CategoryTable {
        let client = dead_client();
        let session = SessionStore::new(client.clone(), scratch_storage(name)).await;
        session
            .adopt(AuthResponse {
                token: "test-token".to_string(),
                user: staff_user(role),
            })
            .await
            .expect("adopt session");
        CategoryTable::new(client, session)
    }

    #[tokio::test]
    async fn test_anonymous_caller_is_not_signed_in() {
        let client = dead_client();
        let session = SessionStore::new(client.clone(), scratch_storage("tbl-anon")).await;
        let table = CategoryTable::new(client, session);

        assert!(matches!(
            table.refresh().await,
            Err(AdminError::NotSignedIn)
        ));
    }

    #[tokio::test]
    async fn test_customer_cannot_view_catalog_screens() {
        let table = signed_in_table("tbl-customer", Role::Customer).await;

        let err = table.refresh().await.unwrap_err();
        assert!(matches!(err, AdminError::Forbidden { role: Role::Customer, .. }));
    }

    #[tokio::test]
    async fn test_seller_view_reaches_the_wire() {
        let table = signed_in_table("tbl-seller-view", Role::Seller).await;

        // Authorization passes; the dead client turns the request into an
        // Api error instead of a policy denial.
        let err = table.refresh().await.unwrap_err();
        assert!(matches!(err, AdminError::Api(_)));
    }

    #[tokio::test]
    async fn test_seller_mutation_is_denied_before_any_request() {
        let table = signed_in_table("tbl-seller-del", Role::Seller).await;

        // A dead client would answer with an Api error, so a Forbidden
        // error proves no request was attempted.
        let err = table.delete(CategoryId::new(3)).await.unwrap_err();
        match err {
            AdminError::Forbidden { role, action } => {
                assert_eq!(role, Role::Seller);
                assert_eq!(action, "delete categories");
            }
            other => panic!("expected Forbidden, got {other:?}"),
        }

        let draft = NewCategory {
            name: "Bebidas".to_string(),
            description: String::new(),
        };
        let err = table.update(CategoryId::new(3), &draft).await.unwrap_err();
        assert!(matches!(err, AdminError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn test_seller_create_reaches_the_wire() {
        let table = signed_in_table("tbl-seller-create", Role::Seller).await;

        let draft = NewCategory {
            name: "Bebidas".to_string(),
            description: "Gaseosas y jugos".to_string(),
        };
        let err = table.create(&draft).await.unwrap_err();
        assert!(matches!(err, AdminError::Api(_)));
    }

    #[tokio::test]
    async fn test_admin_mutation_reaches_the_wire() {
        let client = dead_client();
        let session = SessionStore::new(client.clone(), scratch_storage("tbl-admin")).await;
        session
            .adopt(AuthResponse {
                token: "test-token".to_string(),
                user: staff_user(Role::Admin),
            })
            .await
            .expect("adopt session");
        let table = CategoryTable::new(client, session);

        let err = table.delete(CategoryId::new(3)).await.unwrap_err();
        assert!(matches!(err, AdminError::Api(_)));
    }

    #[tokio::test]
    async fn test_roles_listing_is_admin_only() {
        let client = dead_client();
        let session = SessionStore::new(client.clone(), scratch_storage("tbl-roles")).await;
        session
            .adopt(AuthResponse {
                token: "test-token".to_string(),
                user: staff_user(Role::Seller),
            })
            .await
            .expect("adopt session");
        let table = RoleTable::new(client, session);

        let err = table.refresh().await.unwrap_err();
        match err {
            AdminError::Forbidden { role, action } => {
                assert_eq!(role, Role::Seller);
                assert_eq!(action, "view roles");
            }
            other => panic!("expected Forbidden, got {other:?}"),
        }
    }

    #[test]
    fn test_order_draft_totals_its_lines() {
        let draft = AdminOrderDraft {
            user_id: UserId::new(9),
            payment_method_id: PaymentMethodId::new(1),
            lines: vec![
                AdminOrderDraftLine {
                    line_id: None,
                    inventory_id: InventoryId::new(4),
                    quantity: 2,
                    unit_price: Decimal::new(1230, 2),
                },
                AdminOrderDraftLine {
                    line_id: Some(OrderLineId::new(77)),
                    inventory_id: InventoryId::new(5),
                    quantity: 1,
                    unit_price: Decimal::new(550, 2),
                },
            ],
        };

        assert_eq!(draft.total(), Decimal::new(3010, 2));
    }

    #[test]
    fn test_order_draft_request_carries_edit_ids() {
        let draft = AdminOrderDraft {
            user_id: UserId::new(9),
            payment_method_id: PaymentMethodId::new(2),
            lines: vec![AdminOrderDraftLine {
                line_id: Some(OrderLineId::new(77)),
                inventory_id: InventoryId::new(4),
                quantity: 3,
                unit_price: Decimal::new(500, 2),
            }],
        };

        let create = draft.to_request(None);
        assert!(create.order.id.is_none());
        assert_eq!(create.order.total, Decimal::new(1500, 2));

        let update = draft.to_request(Some(OrderId::new(12)));
        assert_eq!(update.order.id, Some(OrderId::new(12)));
        assert_eq!(update.lines[0].id, Some(OrderLineId::new(77)));
        assert_eq!(update.payment_method_id, PaymentMethodId::new(2));
    }
}
