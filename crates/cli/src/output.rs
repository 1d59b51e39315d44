//! Terminal rendering for command results.
//!
//! Everything a command prints for the user goes through here; the
//! tracing subscriber keeps diagnostics separate.

#![allow(clippy::print_stdout)]

use minimarket_admin::DashboardStats;
use minimarket_api::models::{
    Category, Inventory, Order, PaymentMethod, Product, RoleRecord, Supplier, User,
};
use minimarket_core::Price;
use minimarket_storefront::{CartLine, CatalogEntry};
use rust_decimal::Decimal;

pub fn line(text: &str) {
    println!("{text}");
}

pub fn catalog_listing(entries: &[CatalogEntry]) {
    if entries.is_empty() {
        println!("The catalog is empty.");
        return;
    }
    println!(
        "{:<6} {:<28} {:<16} {:>10} {:>6}",
        "ID", "PRODUCT", "CATEGORY", "PRICE", "STOCK"
    );
    for entry in entries {
        let price = Price::soles(entry.unit_price).to_string();
        println!(
            "{:<6} {:<28} {:<16} {price:>10} {:>6}",
            entry.inventory_id.as_i32(),
            entry.name,
            entry.category_name,
            entry.stock
        );
    }
}

pub fn catalog_entry(entry: &CatalogEntry) {
    let price = Price::soles(entry.unit_price).to_string();
    println!("{} (inventory {})", entry.name, entry.inventory_id.as_i32());
    if !entry.description.is_empty() {
        println!("  {}", entry.description);
    }
    println!("  Category: {}", entry.category_name);
    println!("  Supplier: {}", entry.supplier_name);
    println!("  Price:    {price}");
    println!("  Stock:    {}", entry.stock);
}

pub fn cart(lines: &[CartLine], total: Decimal) {
    if lines.is_empty() {
        println!("The cart is empty.");
        return;
    }
    println!(
        "{:<36} {:<28} {:>5} {:>10} {:>10}",
        "LINE", "PRODUCT", "QTY", "PRICE", "SUBTOTAL"
    );
    for cart_line in lines {
        let id = cart_line.line_id.to_string();
        let unit = Price::soles(cart_line.unit_price).to_string();
        let subtotal = Price::soles(cart_line.subtotal()).to_string();
        println!(
            "{id:<36} {:<28} {:>5} {unit:>10} {subtotal:>10}",
            cart_line.name, cart_line.quantity
        );
    }
    let total = Price::soles(total).to_string();
    println!("Total: {total}");
}

pub fn payment_methods(methods: &[PaymentMethod]) {
    if methods.is_empty() {
        println!("No payment methods available.");
        return;
    }
    println!("{:<6} {}", "ID", "METHOD");
    for method in methods {
        println!("{:<6} {}", method.id.as_i32(), method.name);
    }
}

pub fn orders(orders: &[Order]) {
    if orders.is_empty() {
        println!("No orders.");
        return;
    }
    for order in orders {
        let placed = order.summary.placed_at.map_or_else(
            || "-".to_string(),
            |t| t.format("%d/%m/%y %H:%M").to_string(),
        );
        let customer = order
            .summary
            .customer
            .as_ref()
            .map_or_else(|| "-".to_string(), User::full_name);
        let total = Price::soles(order.summary.total).to_string();
        println!(
            "Order #{} | {placed} | {customer} | {total}",
            order.summary.id.as_i32()
        );
        for order_line in &order.lines {
            let unit = Price::soles(order_line.inventory.sale_price).to_string();
            println!(
                "  - {} x{} ({unit} each)",
                order_line.inventory.product.name, order_line.quantity
            );
        }
        if let Some(payment) = &order.payment {
            println!("  Paid with {}", payment.method.name);
        }
    }
}

pub fn categories(rows: &[Category]) {
    println!("{:<6} {:<24} {}", "ID", "NAME", "DESCRIPTION");
    for row in rows {
        println!("{:<6} {:<24} {}", row.id.as_i32(), row.name, row.description);
    }
}

pub fn products(rows: &[Product]) {
    println!("{:<6} {:<28} {:<16} {}", "ID", "NAME", "CATEGORY", "DESCRIPTION");
    for row in rows {
        println!(
            "{:<6} {:<28} {:<16} {}",
            row.id.as_i32(),
            row.name,
            row.category.name,
            row.description
        );
    }
}

pub fn suppliers(rows: &[Supplier]) {
    println!(
        "{:<6} {:<28} {:<12} {:<12} {}",
        "ID", "NAME", "RUC", "PHONE", "EMAIL"
    );
    for row in rows {
        println!(
            "{:<6} {:<28} {:<12} {:<12} {}",
            row.id.as_i32(),
            row.name,
            row.ruc,
            row.phone,
            row.email
        );
    }
}

pub fn inventories(rows: &[Inventory]) {
    println!(
        "{:<6} {:<28} {:<24} {:>6} {:>10}",
        "ID", "PRODUCT", "SUPPLIER", "STOCK", "PRICE"
    );
    for row in rows {
        let price = Price::soles(row.sale_price).to_string();
        println!(
            "{:<6} {:<28} {:<24} {:>6} {price:>10}",
            row.id.as_i32(),
            row.product.name,
            row.supplier.name,
            row.stock
        );
    }
}

pub fn roles(rows: &[RoleRecord]) {
    println!("{:<6} {}", "ID", "NAME");
    for row in rows {
        println!("{:<6} {}", row.id.as_i32(), row.name);
    }
}

pub fn users(rows: &[User]) {
    println!(
        "{:<6} {:<24} {:<28} {:<10} {}",
        "ID", "NAME", "EMAIL", "DNI", "ROLE"
    );
    for row in rows {
        println!(
            "{:<6} {:<24} {:<28} {:<10} {}",
            row.id.as_i32(),
            row.full_name(),
            row.email,
            row.dni,
            row.role.name
        );
    }
}

pub fn dashboard(stats: &DashboardStats) {
    println!("Sales by month");
    for row in &stats.monthly_sales {
        let total = Price::soles(row.total_sales).to_string();
        println!("  {:<10} {total:>12}", row.month);
    }
    println!("Payment method usage");
    for row in &stats.payment_usage {
        println!("  {:<16} {:>6}", row.method, row.uses);
    }
    println!("Top products");
    for row in &stats.top_products {
        println!("  {:<28} {:>6}", row.name, row.units_sold);
    }
    println!("Products low on stock");
    for row in &stats.low_stock {
        println!("  {:<28} {:>6}", row.name, row.stock);
    }
}
