//! Minimarket API - Typed client for the minimarket REST backend.
//!
//! Every piece of business logic (authentication, persistence, pricing,
//! stock decrement, order totals) lives behind the backend; this crate is
//! the one place the rest of the workspace talks to it. All requests flow
//! through a single dispatch path on [`ApiClient`], which maps HTTP
//! statuses onto the [`ApiError`] taxonomy and notifies the registered
//! [`DenialHook`] on any authorization denial, so session invalidation
//! happens in exactly one place.
//!
//! # Modules
//!
//! - [`config`] - Environment-driven configuration
//! - [`client`] - The HTTP client and dispatch path
//! - [`error`] - Error taxonomy and the denial hook trait
//! - [`models`] - Wire types (the backend speaks Spanish camelCase)
//! - [`resources`] - One module of client methods per REST resource

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod resources;

pub use client::ApiClient;
pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, DenialHook};
