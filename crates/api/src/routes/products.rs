//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use clementine_core::{Product, ProductId, SearchFilters};

use crate::error::Result;
use crate::services::{DEFAULT_RECOMMENDATION_LIMIT, NewProduct};
use crate::state::AppState;

/// Product wire representation.
///
/// Identical to the domain record except that `averageRating` is rounded
/// to one decimal - the stored mean keeps full precision.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductBody {
    pub product_id: ProductId,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub stock: u64,
    pub category: String,
    pub image_url: String,
    pub average_rating: f64,
    pub review_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<std::collections::BTreeSet<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Product> for ProductBody {
    fn from(product: Product) -> Self {
        let average_rating = product.display_rating();
        Self {
            product_id: product.product_id,
            name: product.name,
            description: product.description,
            price: product.price,
            stock: product.stock,
            category: product.category,
            image_url: product.image_url,
            average_rating,
            review_count: product.review_count,
            tags: product.tags,
            brand: product.brand,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// `{products: [...]}` envelope.
#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub products: Vec<ProductBody>,
}

/// `{product: ...}` envelope.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub product: ProductBody,
}

/// `{recommendations: [...]}` envelope.
#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<ProductBody>,
}

/// Query parameters for the recommendations route.
#[derive(Debug, Deserialize)]
pub struct RecommendationsQuery {
    pub limit: Option<usize>,
}

fn to_bodies(products: Vec<Product>) -> Vec<ProductBody> {
    products.into_iter().map(Into::into).collect()
}

/// List all products.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<ProductsResponse>> {
    let products = state.catalog().list_products().await?;
    Ok(Json(ProductsResponse {
        products: to_bodies(products),
    }))
}

/// Create a product.
#[instrument(skip(state, input))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<NewProduct>,
) -> Result<(StatusCode, Json<ProductResponse>)> {
    let product = state.catalog().create_product(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ProductResponse {
            product: product.into(),
        }),
    ))
}

/// Search products by composable filters.
#[instrument(skip(state, filters))]
pub async fn search(
    State(state): State<AppState>,
    Query(filters): Query<SearchFilters>,
) -> Result<Json<ProductsResponse>> {
    let products = state.catalog().search_products(&filters).await?;
    Ok(Json(ProductsResponse {
        products: to_bodies(products),
    }))
}

/// Related products for one product.
#[instrument(skip(state))]
pub async fn recommendations(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Query(query): Query<RecommendationsQuery>,
) -> Result<Json<RecommendationsResponse>> {
    let limit = query.limit.unwrap_or(DEFAULT_RECOMMENDATION_LIMIT);
    let products = state.recommendations().recommend(&id, limit).await?;
    Ok(Json(RecommendationsResponse {
        recommendations: to_bodies(products),
    }))
}

/// Fetch one product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductResponse>> {
    let product = state.catalog().get_product(&id).await?;
    Ok(Json(ProductResponse {
        product: product.into(),
    }))
}
