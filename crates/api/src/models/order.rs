//! Order wire types.
//!
//! Checkout and the back-office send different request shapes to the same
//! resource: checkout posts only inventory ids and quantities (the backend
//! prices the order), while an admin save carries unit prices and a
//! client-computed total.

use chrono::NaiveDateTime;
use minimarket_core::{InventoryId, OrderId, OrderLineId, PaymentMethodId, ProductId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::auth::User;
use super::catalog::PaymentMethod;

// =============================================================================
// Requests
// =============================================================================

/// Body for `POST pedidos` from checkout. Constructed fresh from the cart
/// at submit time and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct OrderRequest {
    #[serde(rename = "pedido")]
    pub order: OrderRequestHeader,
    #[serde(rename = "detallePedido")]
    pub lines: Vec<OrderLineRequest>,
    #[serde(rename = "idModoPago")]
    pub payment_method_id: PaymentMethodId,
}

/// Header of a checkout order request.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OrderRequestHeader {
    #[serde(rename = "idUsuario")]
    pub user_id: UserId,
}

/// One line of a checkout order request.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OrderLineRequest {
    #[serde(rename = "idInventario")]
    pub inventory_id: InventoryId,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
}

/// Body for `POST pedidos` / `PUT pedidos` from the back-office order
/// screen. Carries ids for existing rows so the backend can update them
/// in place.
#[derive(Debug, Clone, Serialize)]
pub struct AdminOrderRequest {
    #[serde(rename = "pedido")]
    pub order: AdminOrderHeader,
    #[serde(rename = "detallePedido")]
    pub lines: Vec<AdminOrderLine>,
    #[serde(rename = "idModoPago")]
    pub payment_method_id: PaymentMethodId,
}

/// Header of a back-office order save.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AdminOrderHeader {
    /// `None` on create; the existing id on edit.
    #[serde(rename = "idPedido")]
    pub id: Option<OrderId>,
    #[serde(rename = "idUsuario")]
    pub user_id: UserId,
    /// Client-computed total; the backend recomputes and stays
    /// authoritative.
    pub total: Decimal,
}

/// One line of a back-office order save.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AdminOrderLine {
    /// `None` for lines added in this edit.
    #[serde(rename = "idDetalle", skip_serializing_if = "Option::is_none")]
    pub id: Option<OrderLineId>,
    #[serde(rename = "idInventario")]
    pub inventory_id: InventoryId,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    #[serde(rename = "precioUnitario")]
    pub unit_price: Decimal,
}

// =============================================================================
// Responses
// =============================================================================

/// An order as served by `GET pedidos` and `GET pedidos/cliente/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "pedido")]
    pub summary: OrderSummary,
    #[serde(rename = "detallePedido")]
    pub lines: Vec<OrderLine>,
    #[serde(rename = "pago", default)]
    pub payment: Option<OrderPayment>,
}

impl Order {
    /// Total units across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}

/// Header of a served order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSummary {
    #[serde(rename = "idPedido")]
    pub id: OrderId,
    #[serde(rename = "usuario", default)]
    pub customer: Option<User>,
    pub total: Decimal,
    #[serde(rename = "fechaPedido", default)]
    pub placed_at: Option<NaiveDateTime>,
}

/// One served order line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(rename = "idDetalle")]
    pub id: OrderLineId,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    #[serde(rename = "inventario")]
    pub inventory: OrderLineInventory,
}

/// The slice of an inventory record an order line carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineInventory {
    #[serde(rename = "idInventario")]
    pub id: InventoryId,
    #[serde(rename = "precioVenta")]
    pub sale_price: Decimal,
    #[serde(rename = "producto")]
    pub product: ProductSummary,
}

/// Product summary nested in an order line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSummary {
    #[serde(rename = "idProducto")]
    pub id: ProductId,
    #[serde(rename = "nombre")]
    pub name: String,
}

/// Payment block of a served order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPayment {
    #[serde(rename = "metodoPago")]
    pub method: PaymentMethod,
}
