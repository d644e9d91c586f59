//! Review service.
//!
//! Owns the product rating aggregates: every review insert recomputes the
//! product's `average_rating` and `review_count` from the full review set
//! and writes the product record back before the call returns, so a
//! reader never sees a review without its aggregate update. The mean is
//! stored at full precision; rounding to one decimal happens only in the
//! HTTP view.

use chrono::Utc;
use serde::Deserialize;
use tracing::instrument;

use clementine_core::{MAX_RATING, MIN_RATING, Product, ProductId, Review, ReviewId, UserId};
use clementine_store::{Store, keys};

use crate::error::{AppError, Result};

/// Input for creating a review.
///
/// Derived fields (`reviewId`, `helpful`, timestamps) do not exist here;
/// the rating arrives signed so out-of-range values are rejected with a
/// validation error.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub product_id: ProductId,
    pub user_id: UserId,
    /// Star rating. Must be within 1-5 inclusive.
    pub rating: i64,
    pub title: String,
    pub comment: String,
    #[serde(default)]
    pub verified: bool,
}

/// Review creation, listing, and the helpful counter.
#[derive(Clone)]
pub struct ReviewService {
    store: Store,
}

impl ReviewService {
    /// Create a new review service around a store handle.
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Create a review and synchronously recompute the product's rating
    /// aggregates.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the rating is outside 1-5, a
    /// not-found error when the product does not exist, or a store error.
    #[instrument(skip(self, input), fields(product_id = %input.product_id))]
    pub async fn create_review(&self, input: NewReview) -> Result<Review> {
        let rating = validate_rating(input.rating)?;

        let mut product: Product = self
            .store
            .get_record(&keys::product(&input.product_id))
            .await?
            .ok_or_else(|| AppError::not_found(format!("product {}", input.product_id)))?;

        let now = Utc::now();
        let review = Review {
            product_id: input.product_id,
            review_id: ReviewId::generate(),
            user_id: input.user_id,
            rating,
            title: input.title,
            comment: input.comment,
            verified: input.verified,
            helpful: 0,
            created_at: now,
            updated_at: now,
        };

        self.store
            .put_record(&keys::review(&review.product_id, &review.review_id), &review)
            .await?;

        // Recompute aggregates from the full review set, new review included
        let reviews: Vec<Review> = self
            .store
            .scan_prefix(&keys::review_prefix(&review.product_id))
            .await?;
        let count = reviews.len() as u64;
        let sum: u64 = reviews.iter().map(|r| u64::from(r.rating)).sum();
        #[allow(clippy::cast_precision_loss)] // review counts stay far below 2^52
        let mean = if count == 0 {
            0.0
        } else {
            sum as f64 / count as f64
        };

        product.average_rating = mean;
        product.review_count = count;
        product.updated_at = now;
        self.store
            .put_record(&keys::product(&review.product_id), &product)
            .await?;

        Ok(review)
    }

    /// All reviews for a product, newest first.
    ///
    /// # Errors
    ///
    /// Returns a store error when the scan fails.
    #[instrument(skip(self))]
    pub async fn list_reviews(&self, product_id: &ProductId) -> Result<Vec<Review>> {
        let mut reviews: Vec<Review> = self
            .store
            .scan_prefix(&keys::review_prefix(product_id))
            .await?;
        reviews.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.review_id.cmp(&a.review_id))
        });
        Ok(reviews)
    }

    /// Increment a review's helpful counter by exactly 1.
    ///
    /// Deliberately not idempotent: repeated calls increment repeatedly.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the review does not exist, or a
    /// store error.
    #[instrument(skip(self))]
    pub async fn mark_helpful(
        &self,
        product_id: &ProductId,
        review_id: &ReviewId,
    ) -> Result<Review> {
        let key = keys::review(product_id, review_id);
        let mut review: Review = self
            .store
            .get_record(&key)
            .await?
            .ok_or_else(|| AppError::not_found(format!("review {review_id}")))?;

        review.helpful += 1;
        review.updated_at = Utc::now();
        self.store.put_record(&key, &review).await?;
        Ok(review)
    }
}

/// Ratings are integers within 1-5 inclusive.
fn validate_rating(rating: i64) -> Result<u8> {
    let ok = u8::try_from(rating)
        .ok()
        .filter(|r| (MIN_RATING..=MAX_RATING).contains(r));
    ok.ok_or_else(|| {
        AppError::validation(format!(
            "rating must be between {MIN_RATING} and {MAX_RATING}"
        ))
    })
}
