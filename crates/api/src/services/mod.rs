//! Business logic services for the API.
//!
//! # Services
//!
//! - `catalog` - Product creation, lookup, listing, and search
//! - `cart` - Per-user cart lines with merge-by-sum upsert
//! - `review` - Reviews and the derived rating aggregates they drive
//! - `recommend` - Related-product lookup by category/tag overlap
//!
//! Each service owns a [`clementine_store::Store`] handle and nothing
//! else. All state lives in the store and is re-read on every call; no
//! mutable data is cached across requests.

pub mod cart;
pub mod catalog;
pub mod recommend;
pub mod review;

pub use cart::{CartLine, CartService};
pub use catalog::{CatalogService, NewProduct};
pub use recommend::{DEFAULT_RECOMMENDATION_LIMIT, RecommendationService};
pub use review::{NewReview, ReviewService};
