//! Per-resource operations on [`ApiClient`](crate::ApiClient).
//!
//! Each module groups the operations of one backend resource. All of them
//! go through the shared dispatch path in `client`, so status mapping and
//! denial notification behave identically everywhere.

pub mod auth;
pub mod categories;
pub mod images;
pub mod inventories;
pub mod orders;
pub mod payment_methods;
pub mod products;
pub mod roles;
pub mod stats;
pub mod suppliers;
pub mod users;
