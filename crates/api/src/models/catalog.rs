//! Category, product, inventory, supplier, and payment method wire types.

use minimarket_core::{CategoryId, InventoryId, PaymentMethodId, ProductId, SupplierId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Categories
// =============================================================================

/// A category as served by `GET categorias`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "idCategoria")]
    pub id: CategoryId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
}

/// Body for `POST categorias`; also the editable fields of an update.
#[derive(Debug, Clone, Serialize)]
pub struct NewCategory {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: String,
}

/// Body for `PUT categorias`. The backend keys the update on `id`, not
/// `idCategoria`.
#[derive(Debug, Serialize)]
pub(crate) struct CategoryUpdate<'a> {
    pub id: CategoryId,
    #[serde(flatten)]
    pub draft: &'a NewCategory,
}

// =============================================================================
// Products
// =============================================================================

/// A product as served by `GET productos` (and nested in inventories).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "idProducto")]
    pub id: ProductId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "imagen", default)]
    pub image: Option<String>,
    #[serde(rename = "categoria")]
    pub category: ProductCategory,
}

/// Category summary nested inside a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCategory {
    #[serde(rename = "idCategoria")]
    pub id: CategoryId,
    #[serde(rename = "nombre")]
    pub name: String,
}

/// Body for `POST productos`; also the editable fields of an update.
#[derive(Debug, Clone, Serialize)]
pub struct NewProduct {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "imagen", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(rename = "idCategoria")]
    pub category_id: CategoryId,
}

/// Body for `PUT productos` (keyed on `id`).
#[derive(Debug, Serialize)]
pub(crate) struct ProductUpdate<'a> {
    pub id: ProductId,
    #[serde(flatten)]
    pub draft: &'a NewProduct,
}

// =============================================================================
// Inventories
// =============================================================================

/// An inventory record: the sellable unit joining a product, a supplier,
/// a stock count, and a sale price. `GET inventarios` feeds the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(rename = "idInventario")]
    pub id: InventoryId,
    pub stock: u32,
    #[serde(rename = "precioVenta")]
    pub sale_price: Decimal,
    #[serde(rename = "producto")]
    pub product: Product,
    #[serde(rename = "proveedor")]
    pub supplier: SupplierSummary,
}

/// Supplier summary nested inside an inventory record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierSummary {
    #[serde(rename = "idProveedor")]
    pub id: SupplierId,
    #[serde(rename = "nombreProveedor")]
    pub name: String,
}

/// Body for `POST inventarios`; also the editable fields of an update.
#[derive(Debug, Clone, Serialize)]
pub struct NewInventory {
    #[serde(rename = "idProducto")]
    pub product_id: ProductId,
    #[serde(rename = "idProveedor")]
    pub supplier_id: SupplierId,
    pub stock: u32,
    #[serde(rename = "precioVenta")]
    pub sale_price: Decimal,
}

/// Body for `PUT inventarios` (keyed on `idInventario`).
#[derive(Debug, Serialize)]
pub(crate) struct InventoryUpdate<'a> {
    #[serde(rename = "idInventario")]
    pub id: InventoryId,
    #[serde(flatten)]
    pub draft: &'a NewInventory,
}

// =============================================================================
// Suppliers
// =============================================================================

/// A supplier as served by `GET proveedores`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    #[serde(rename = "idProveedor")]
    pub id: SupplierId,
    #[serde(rename = "nombreProveedor")]
    pub name: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    pub email: String,
    #[serde(rename = "direccion")]
    pub address: String,
    pub ruc: String,
}

/// Body for `POST proveedores`; also the editable fields of an update.
#[derive(Debug, Clone, Serialize)]
pub struct NewSupplier {
    #[serde(rename = "nombreProveedor")]
    pub name: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    pub email: String,
    #[serde(rename = "direccion")]
    pub address: String,
    pub ruc: String,
}

/// Body for `PUT proveedores` (keyed on `id`).
#[derive(Debug, Serialize)]
pub(crate) struct SupplierUpdate<'a> {
    pub id: SupplierId,
    #[serde(flatten)]
    pub draft: &'a NewSupplier,
}

// =============================================================================
// Payment methods
// =============================================================================

/// A payment method as served by `GET metodos-pago`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMethod {
    #[serde(rename = "idMetodoPago")]
    pub id: PaymentMethodId,
    #[serde(rename = "nombreMetodo")]
    pub name: String,
}

/// Body for `POST metodos-pago`; also the editable fields of an update.
#[derive(Debug, Clone, Serialize)]
pub struct NewPaymentMethod {
    #[serde(rename = "nombreMetodo")]
    pub name: String,
}

/// Body for `PUT metodos-pago` (keyed on `idMetodoPago`, unlike the
/// other resources).
#[derive(Debug, Serialize)]
pub(crate) struct PaymentMethodUpdate<'a> {
    #[serde(rename = "idMetodoPago")]
    pub id: PaymentMethodId,
    #[serde(flatten)]
    pub draft: &'a NewPaymentMethod,
}
