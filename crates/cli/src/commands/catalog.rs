//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! mm-cli catalog list
//! mm-cli catalog show 3
//! ```

use clap::Subcommand;
use minimarket_api::ApiError;
use minimarket_core::InventoryId;
use thiserror::Error;

use crate::context::AppContext;
use crate::output;

#[derive(Subcommand)]
pub enum CatalogAction {
    /// Fetch and print the catalog
    List,
    /// Show one catalog entry by inventory id
    Show {
        /// Inventory id from the listing
        inventory_id: i32,
    },
}

#[derive(Debug, Error)]
pub enum CatalogCommandError {
    /// The id is not in the current listing.
    #[error("no catalog entry with inventory id {0}")]
    UnknownInventory(InventoryId),

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub async fn run(ctx: &AppContext, action: CatalogAction) -> Result<(), CatalogCommandError> {
    match action {
        CatalogAction::List => {
            ctx.catalog.refresh().await?;
            output::catalog_listing(&ctx.catalog.entries());
        }
        CatalogAction::Show { inventory_id } => {
            let id = InventoryId::new(inventory_id);
            ctx.catalog.refresh().await?;
            let entry = ctx
                .catalog
                .entry(id)
                .ok_or(CatalogCommandError::UnknownInventory(id))?;
            output::catalog_entry(&entry);
        }
    }
    Ok(())
}
