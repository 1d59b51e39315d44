//! Checkout commands.
//!
//! # Usage
//!
//! ```bash
//! mm-cli checkout methods
//! mm-cli checkout submit --method 1
//! mm-cli checkout submit --method 1 --out /tmp/receipts
//! ```
//!
//! `submit` places the order for the signed-in visitor's cart and writes
//! the sale receipt (`reporte_venta.txt`) into the output directory.

use std::path::PathBuf;

use clap::Subcommand;
use minimarket_api::ApiError;
use minimarket_core::PaymentMethodId;
use minimarket_storefront::{CheckoutError, ReceiptError};
use thiserror::Error;

use crate::context::AppContext;
use crate::output;

#[derive(Subcommand)]
pub enum CheckoutAction {
    /// List the available payment methods
    Methods,
    /// Place the order and save the receipt
    Submit {
        /// Payment method id from `checkout methods`
        #[arg(short, long)]
        method: i32,

        /// Directory the receipt is written into
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
}

#[derive(Debug, Error)]
pub enum CheckoutCommandError {
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Receipt(#[from] ReceiptError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub async fn run(ctx: &AppContext, action: CheckoutAction) -> Result<(), CheckoutCommandError> {
    match action {
        CheckoutAction::Methods => {
            ctx.checkout.open().await?;
            output::payment_methods(&ctx.checkout.payment_methods());
        }
        CheckoutAction::Submit { method, out } => {
            ctx.checkout.open().await?;
            ctx.checkout
                .select_payment_method(PaymentMethodId::new(method))?;
            let receipt = ctx.checkout.submit().await?;
            let path = receipt.save_to(&out)?;
            output::line(&format!("Order placed. Receipt saved to {}", path.display()));
        }
    }
    Ok(())
}
