//! Clementine Store - single-table key-value persistence.
//!
//! Every Clementine entity lives in one table, keyed by an opaque string.
//! This crate owns that boundary: the [`ItemStore`] capability trait
//! (`put`/`get`/`scan`/`delete`), the key scheme, and the two backends -
//! DynamoDB for deployments and an in-memory map for tests and local
//! development.
//!
//! Higher layers depend only on the typed [`Store`] handle, never on a
//! concrete backend, so the backing store can be swapped without touching
//! domain logic.
//!
//! # Key scheme
//!
//! ```text
//! product#<productId>
//! cart#<userId>#<productId>
//! review#<productId>#<reviewId>
//! ```
//!
//! Prefix scans (`cart#<userId>#`, `review#<productId>#`) are how a cart or
//! a product's reviews are listed.

#![cfg_attr(not(test), forbid(unsafe_code))]

mod adapter;
mod dynamo;
mod error;
pub mod keys;
mod memory;

pub use adapter::{ItemStore, Store};
pub use dynamo::DynamoStore;
pub use error::StoreError;
pub use memory::MemoryStore;
