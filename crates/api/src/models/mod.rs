//! Wire types for the minimarket REST API.
//!
//! The backend speaks Spanish camelCase; every struct here maps those
//! names onto snake_case Rust fields with serde renames. Requests and
//! responses are kept as separate types because the backend is not
//! symmetric (e.g., a category arrives as `idCategoria` but is updated
//! with `id`).

pub mod auth;
pub mod catalog;
pub mod order;
pub mod stats;

pub use auth::{
    AuthResponse, CUSTOMER_ROLE_ID, LoginRequest, NewRole, ProfileUpdate, RegisterRequest,
    RoleChange, RoleRecord, User,
};
pub use catalog::{
    Category, Inventory, NewCategory, NewInventory, NewPaymentMethod, NewProduct, NewSupplier,
    PaymentMethod, Product, ProductCategory, Supplier, SupplierSummary,
};
pub use order::{
    AdminOrderHeader, AdminOrderLine, AdminOrderRequest, Order, OrderLine, OrderLineInventory,
    OrderLineRequest, OrderPayment, OrderRequest, OrderRequestHeader, OrderSummary, ProductSummary,
};
pub use stats::{LowStockProduct, MonthlySales, PaymentMethodUsage, TopProduct};
