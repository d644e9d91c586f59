//! Cart route handlers.
//!
//! The user identity is an explicit path segment - there is no ambient
//! "current user" anywhere in the service.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use clementine_core::{CartItem, ProductId, UserId};

use crate::error::Result;
use crate::routes::products::ProductBody;
use crate::services::cart::{CartLine, total_of};
use crate::state::AppState;

/// Cart line wire representation: the line plus live product data.
///
/// `product` is `null` when the referenced product no longer exists.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineBody {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub added_at: chrono::DateTime<chrono::Utc>,
    pub product: Option<ProductBody>,
}

impl From<CartLine> for CartLineBody {
    fn from(line: CartLine) -> Self {
        Self {
            user_id: line.item.user_id,
            product_id: line.item.product_id,
            quantity: line.item.quantity,
            added_at: line.item.added_at,
            product: line.product.map(Into::into),
        }
    }
}

/// `{cartItems: [...], total}` envelope. The total is computed at read
/// time from live prices, never persisted.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub cart_items: Vec<CartLineBody>,
    pub total: u64,
}

/// `{cartItem: ...}` envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemResponse {
    pub cart_item: CartItem,
}

/// `{message: ...}` envelope for removals.
#[derive(Debug, Serialize)]
pub struct RemovedResponse {
    pub message: &'static str,
}

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Update-quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub quantity: i64,
}

/// List a user's cart with live product data and total.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<CartResponse>> {
    let lines = state.cart().list_cart(&user_id).await?;
    let total = total_of(&lines);
    Ok(Json(CartResponse {
        cart_items: lines.into_iter().map(Into::into).collect(),
        total,
    }))
}

/// Add an item to a user's cart.
#[instrument(skip(state, body))]
pub async fn add_item(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    Json(body): Json<AddItemRequest>,
) -> Result<(StatusCode, Json<CartItemResponse>)> {
    let cart_item = state
        .cart()
        .add_item(&user_id, &body.product_id, body.quantity)
        .await?;
    Ok((StatusCode::CREATED, Json(CartItemResponse { cart_item })))
}

/// Replace the quantity of an existing cart line.
#[instrument(skip(state, body))]
pub async fn update_item(
    State(state): State<AppState>,
    Path((user_id, product_id)): Path<(UserId, ProductId)>,
    Json(body): Json<UpdateItemRequest>,
) -> Result<Json<CartItemResponse>> {
    let cart_item = state
        .cart()
        .update_quantity(&user_id, &product_id, body.quantity)
        .await?;
    Ok(Json(CartItemResponse { cart_item }))
}

/// Remove an item from a user's cart. Idempotent.
#[instrument(skip(state))]
pub async fn remove_item(
    State(state): State<AppState>,
    Path((user_id, product_id)): Path<(UserId, ProductId)>,
) -> Result<Json<RemovedResponse>> {
    state.cart().remove_item(&user_id, &product_id).await?;
    Ok(Json(RemovedResponse {
        message: "item removed",
    }))
}
