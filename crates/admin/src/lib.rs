//! Minimarket Roque back office.
//!
//! Everything here runs against the REST client with the signed-in role
//! from the shared session store. The policy module names the permission
//! tiers, the generic resource table applies them to every CRUD screen,
//! and the dashboard, user directory, and report modules cover the rest
//! of the back office.
//!
//! A backend denial (401/403 on an authorized request) invalidates the
//! session through the client's denial hook before any error reaches
//! this crate; callers only see [`AdminError::is_denied`] flip to true.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod dashboard;
pub mod entities;
pub mod error;
pub mod policy;
pub mod reports;
pub mod table;
pub mod users;

pub use dashboard::{Dashboard, DashboardStats};
pub use entities::{
    AdminOrderDraft, AdminOrderDraftLine, CategoryTable, InventoryTable, OrderTable,
    PaymentMethodTable, ProductTable, RoleTable, SupplierTable,
};
pub use error::AdminError;
pub use policy::{RolePredicate, ScreenPolicy};
pub use reports::{INVENTORY_REPORT_FILE_NAME, Reports};
pub use table::{Resource, ResourceTable};
pub use users::UserDirectory;
