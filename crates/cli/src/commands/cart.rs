//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! mm-cli cart show
//! mm-cli cart add 3
//! mm-cli cart increment 0c7d9a4e-...
//! mm-cli cart remove 0c7d9a4e-...
//! mm-cli cart clear
//! ```
//!
//! `add` takes the inventory id shown by `catalog list`; the other line
//! commands take the line id shown by `cart show`.

use clap::Subcommand;
use minimarket_api::ApiError;
use minimarket_core::{InventoryId, LineId};
use thiserror::Error;
use uuid::Uuid;

use crate::context::AppContext;
use crate::output;

#[derive(Subcommand)]
pub enum CartAction {
    /// Print the cart
    Show,
    /// Add one unit of a catalog entry
    Add {
        /// Inventory id from `catalog list`
        inventory_id: i32,
    },
    /// Raise a line's quantity by one (capped at its known stock)
    Increment {
        /// Line id from `cart show`
        line_id: Uuid,
    },
    /// Lower a line's quantity by one (floored at one)
    Decrement {
        /// Line id from `cart show`
        line_id: Uuid,
    },
    /// Drop a line
    Remove {
        /// Line id from `cart show`
        line_id: Uuid,
    },
    /// Empty the cart
    Clear,
}

#[derive(Debug, Error)]
pub enum CartCommandError {
    /// Adding to the cart is for signed-in visitors.
    #[error("sign in before adding to the cart")]
    NotSignedIn,

    /// The id is not in the current listing.
    #[error("no catalog entry with inventory id {0}")]
    UnknownInventory(InventoryId),

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub async fn run(ctx: &AppContext, action: CartAction) -> Result<(), CartCommandError> {
    match action {
        CartAction::Show => {}
        CartAction::Add { inventory_id } => {
            if !ctx.session.is_authenticated() {
                return Err(CartCommandError::NotSignedIn);
            }
            let id = InventoryId::new(inventory_id);
            ctx.catalog.refresh().await?;
            let entry = ctx
                .catalog
                .entry(id)
                .ok_or(CartCommandError::UnknownInventory(id))?;
            ctx.cart.add(&entry);
        }
        CartAction::Increment { line_id } => ctx.cart.increment(LineId::from(line_id)),
        CartAction::Decrement { line_id } => ctx.cart.decrement(LineId::from(line_id)),
        CartAction::Remove { line_id } => ctx.cart.remove(LineId::from(line_id)),
        CartAction::Clear => ctx.cart.clear(),
    }
    output::cart(&ctx.cart.lines(), ctx.cart.total());
    Ok(())
}
