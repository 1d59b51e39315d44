//! Dashboard statistics wire types.

use rust_decimal::Decimal;
use serde::Deserialize;

/// One month of sales totals, served by `GET pagos/ventas-mes`.
#[derive(Debug, Clone, Deserialize)]
pub struct MonthlySales {
    #[serde(rename = "mes")]
    pub month: String,
    #[serde(rename = "totalVentas")]
    pub total_sales: Decimal,
}

/// How often a payment method was used, served by
/// `GET pagos/estadisticas-pagos`.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentMethodUsage {
    #[serde(rename = "metodo")]
    pub method: String,
    #[serde(rename = "uso")]
    pub uses: u64,
}

/// A best-selling product, served by `GET detalle-pedidos/top-vendidos`.
#[derive(Debug, Clone, Deserialize)]
pub struct TopProduct {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "cantidadVendida")]
    pub units_sold: u64,
}

/// A product running low on stock, served by
/// `GET inventarios/stock-productos`.
#[derive(Debug, Clone, Deserialize)]
pub struct LowStockProduct {
    #[serde(rename = "nombre")]
    pub name: String,
    pub stock: u32,
}
