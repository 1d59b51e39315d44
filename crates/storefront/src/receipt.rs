//! Plain-text sale receipt rendered after a successful checkout.
//!
//! Uses an Askama text template; money and date fields are preformatted
//! so the template stays dumb.

use std::path::{Path, PathBuf};

use askama::Template;
use chrono::{DateTime, Local};
use minimarket_api::models::User;
use minimarket_core::Price;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::cart::CartLine;

/// Filename receipts are saved under.
pub const RECEIPT_FILE_NAME: &str = "reporte_venta.txt";

/// Errors that can occur when producing a receipt file.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// Failed to write the rendered receipt.
    #[error("Failed to write receipt: {0}")]
    Io(#[from] std::io::Error),
}

/// One product row on the receipt.
#[derive(Debug, Clone)]
pub struct ReceiptLine {
    pub name: String,
    pub quantity: u32,
    /// Preformatted, e.g. `S/ 5.50`.
    pub unit_price: String,
    /// Preformatted, e.g. `S/ 11.00`.
    pub subtotal: String,
}

/// Sale receipt for one placed order.
#[derive(Debug, Clone, Template)]
#[template(path = "receipt.txt")]
pub struct Receipt {
    pub customer_name: String,
    pub customer_dni: String,
    /// Preformatted as `dd/MM/yy HH:mm`.
    pub issued_at: String,
    pub lines: Vec<ReceiptLine>,
    /// Preformatted order total.
    pub total: String,
    pub payment_method: String,
}

impl Receipt {
    /// Assemble a receipt from the cart the order was placed with.
    #[must_use]
    pub fn new(
        user: &User,
        cart_lines: &[CartLine],
        payment_method: &str,
        total: Decimal,
        issued_at: DateTime<Local>,
    ) -> Self {
        let lines = cart_lines
            .iter()
            .map(|line| ReceiptLine {
                name: line.name.clone(),
                quantity: line.quantity,
                unit_price: Price::soles(line.unit_price).to_string(),
                subtotal: Price::soles(line.subtotal()).to_string(),
            })
            .collect();
        Self {
            customer_name: user.full_name(),
            customer_dni: user.dni.clone(),
            issued_at: issued_at.format("%d/%m/%y %H:%M").to_string(),
            lines,
            total: Price::soles(total).to_string(),
            payment_method: payment_method.to_string(),
        }
    }

    /// Render the receipt and write it into `dir` as
    /// [`RECEIPT_FILE_NAME`], returning the written path.
    ///
    /// # Errors
    ///
    /// Returns an error when rendering fails or the file cannot be
    /// written.
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf, ReceiptError> {
        let rendered = self.render()?;
        std::fs::create_dir_all(dir)?;
        let path = dir.join(RECEIPT_FILE_NAME);
        std::fs::write(&path, rendered)?;
        Ok(path)
    }
}
