//! Product review entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{ProductId, ReviewId, UserId};

/// Lowest accepted rating value.
pub const MIN_RATING: u8 = 1;
/// Highest accepted rating value.
pub const MAX_RATING: u8 = 5;

/// A product review.
///
/// Created once; `helpful` is the only field that changes afterwards
/// (incremented by the mark-helpful operation, deliberately without
/// idempotency). Rating and comment are immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Product this review belongs to.
    pub product_id: ProductId,
    /// Unique review ID within the product.
    pub review_id: ReviewId,
    /// Author of the review.
    pub user_id: UserId,
    /// Star rating, 1-5 inclusive.
    pub rating: u8,
    /// Short headline.
    pub title: String,
    /// Review body.
    pub comment: String,
    /// Whether the reviewer is a verified purchaser.
    pub verified: bool,
    /// Times this review was marked helpful.
    pub helpful: u64,
    /// When the review was created.
    pub created_at: DateTime<Utc>,
    /// When the review was last updated.
    pub updated_at: DateTime<Utc>,
}
