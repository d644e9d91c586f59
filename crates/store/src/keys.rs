//! Single-table key scheme.
//!
//! Keys are `<kind>#<id...>` strings. Composite keys put the scan axis
//! first: carts scan by user, reviews scan by product.

use clementine_core::{ProductId, ReviewId, UserId};

/// Prefix shared by all product records.
pub const PRODUCT_PREFIX: &str = "product#";

/// Key for a product record.
#[must_use]
pub fn product(id: &ProductId) -> String {
    format!("{PRODUCT_PREFIX}{id}")
}

/// Key for one (user, product) cart line.
#[must_use]
pub fn cart_item(user_id: &UserId, product_id: &ProductId) -> String {
    format!("cart#{user_id}#{product_id}")
}

/// Scan prefix covering every cart line of one user.
#[must_use]
pub fn cart_prefix(user_id: &UserId) -> String {
    format!("cart#{user_id}#")
}

/// Key for one review record.
#[must_use]
pub fn review(product_id: &ProductId, review_id: &ReviewId) -> String {
    format!("review#{product_id}#{review_id}")
}

/// Scan prefix covering every review of one product.
#[must_use]
pub fn review_prefix(product_id: &ProductId) -> String {
    format!("review#{product_id}#")
}
