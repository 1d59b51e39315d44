//! Minimarket Core - Shared types library.
//!
//! This crate provides common types used across all Minimarket components:
//! - `api` - Typed client for the minimarket REST backend
//! - `storefront` - Visitor-facing stores (cart, catalog, session, checkout)
//! - `admin` - Back-office management behavior
//! - `cli` - Command-line surface
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and roles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
