//! Core types for Clementine.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod product;
pub mod review;
pub mod search;

pub use cart::CartItem;
pub use id::*;
pub use product::Product;
pub use review::{MAX_RATING, MIN_RATING, Review};
pub use search::{SearchFilters, SortKey};
