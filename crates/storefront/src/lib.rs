//! Minimarket storefront library.
//!
//! The stores a visitor interacts with: the product catalog, the shopping
//! cart, the authenticated session, and the checkout flow that ties them
//! together. Each store is a cloneable handle over shared inner state and
//! is the sole mutator of its own data; everything they know comes from
//! the REST backend via `minimarket-api` or from the local storage
//! directory.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod orders;
pub mod receipt;
pub mod session;
pub mod storage;

pub use cart::{CartLine, CartStore};
pub use catalog::{CatalogEntry, CatalogStore};
pub use checkout::{CheckoutError, CheckoutFlow, CheckoutState};
pub use config::StorefrontConfig;
pub use orders::OrderHistory;
pub use receipt::{RECEIPT_FILE_NAME, Receipt, ReceiptError, ReceiptLine};
pub use session::{NewAccount, ProfileEdit, Session, SessionError, SessionStore};
pub use storage::{Storage, StorageError};
