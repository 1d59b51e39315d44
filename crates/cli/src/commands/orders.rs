//! Order history commands.
//!
//! # Usage
//!
//! ```bash
//! mm-cli orders list
//! ```

use clap::Subcommand;
use minimarket_storefront::{OrderHistory, SessionError};

use crate::context::AppContext;
use crate::output;

#[derive(Subcommand)]
pub enum OrdersAction {
    /// List the signed-in customer's orders
    List,
}

pub async fn run(ctx: &AppContext, action: OrdersAction) -> Result<(), SessionError> {
    match action {
        OrdersAction::List => {
            let history = OrderHistory::new(ctx.client.clone(), ctx.session.clone());
            let orders = history.my_orders().await?;
            output::orders(&orders);
        }
    }
    Ok(())
}
