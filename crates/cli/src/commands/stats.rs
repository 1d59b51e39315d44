//! Dashboard statistics command.
//!
//! # Usage
//!
//! ```bash
//! mm-cli stats
//! ```
//!
//! Staff only; a customer session is denied before any request.

use minimarket_admin::{AdminError, Dashboard};

use super::admin::denial_guidance;
use crate::context::AppContext;
use crate::output;

pub async fn run(ctx: &AppContext) -> Result<(), AdminError> {
    let dashboard = Dashboard::new(ctx.client.clone(), ctx.session.clone());
    let stats = dashboard.load().await.map_err(denial_guidance)?;
    output::dashboard(&stats);
    Ok(())
}
