//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                                  - Liveness check
//! GET  /health/ready                            - Readiness check (store probe)
//!
//! # Products
//! GET    /products                              - List all products
//! POST   /products                              - Create a product
//! GET    /products/search                       - Filtered search
//! GET    /products/recommendations/{id}         - Related products
//! GET    /products/{id}                         - Product detail
//!
//! # Carts
//! GET    /carts/{userId}                        - List cart with live product data
//! POST   /carts/{userId}/items                  - Add item (merge-by-sum upsert)
//! PUT    /carts/{userId}/items/{productId}      - Replace item quantity
//! DELETE /carts/{userId}/items/{productId}      - Remove item (idempotent)
//!
//! # Reviews
//! GET    /reviews/product/{id}                  - List reviews, newest first
//! POST   /reviews                               - Create review (recomputes aggregates)
//! POST   /reviews/{productId}/{reviewId}/helpful - Increment helpful counter
//! ```
//!
//! All responses are JSON. Errors use the `{"error": string}` envelope
//! with status 400 (validation), 404 (not found), or 500 (store failure).

pub mod carts;
pub mod products;
pub mod reviews;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route("/search", get(products::search))
        .route("/recommendations/{id}", get(products::recommendations))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    use axum::routing::put;

    Router::new()
        .route("/{user_id}", get(carts::show))
        .route("/{user_id}/items", post(carts::add_item))
        .route(
            "/{user_id}/items/{product_id}",
            put(carts::update_item).delete(carts::remove_item),
        )
}

/// Create the review routes router.
pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(reviews::create))
        .route("/product/{id}", get(reviews::index))
        .route(
            "/{product_id}/{review_id}/helpful",
            post(reviews::mark_helpful),
        )
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/carts", cart_routes())
        .nest("/reviews", review_routes())
}
