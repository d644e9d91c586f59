//! Review route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use tracing::instrument;

use clementine_core::{ProductId, Review, ReviewId};

use crate::error::Result;
use crate::services::NewReview;
use crate::state::AppState;

/// `{reviews: [...]}` envelope.
#[derive(Debug, Serialize)]
pub struct ReviewsResponse {
    pub reviews: Vec<Review>,
}

/// `{review: ...}` envelope.
#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub review: Review,
}

/// List a product's reviews, newest first.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ReviewsResponse>> {
    let reviews = state.reviews().list_reviews(&id).await?;
    Ok(Json(ReviewsResponse { reviews }))
}

/// Create a review. Synchronously recomputes the product's aggregates.
#[instrument(skip(state, input))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<NewReview>,
) -> Result<(StatusCode, Json<ReviewResponse>)> {
    let review = state.reviews().create_review(input).await?;
    Ok((StatusCode::CREATED, Json(ReviewResponse { review })))
}

/// Increment a review's helpful counter. Not idempotent by design.
#[instrument(skip(state))]
pub async fn mark_helpful(
    State(state): State<AppState>,
    Path((product_id, review_id)): Path<(ProductId, ReviewId)>,
) -> Result<Json<ReviewResponse>> {
    let review = state.reviews().mark_helpful(&product_id, &review_id).await?;
    Ok(Json(ReviewResponse { review }))
}
