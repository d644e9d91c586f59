//! Integration tests for cart and review endpoints.
//!
//! These tests require a running API server (see `api_catalog.rs` for the
//! setup). Each test uses a unique user ID so runs don't interfere.
//!
//! Run with: cargo test -p clementine-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

/// Base URL for the API (configurable via environment).
fn api_base_url() -> String {
    std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// Test helper: Create a product via API, returning its ID.
async fn create_test_product(client: &Client, price: u64) -> String {
    let base_url = api_base_url();
    let resp = client
        .post(format!("{base_url}/products"))
        .json(&json!({
            "name": format!("Cart fixture {}", uuid::Uuid::new_v4()),
            "description": "fixture",
            "price": price,
            "stock": 5,
            "category": "integration",
        }))
        .send()
        .await
        .expect("Failed to create test product");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.expect("Failed to read response");
    body["product"]["productId"]
        .as_str()
        .expect("productId missing")
        .to_string()
}

#[tokio::test]
#[ignore = "Requires running API server and store"]
async fn test_cart_add_list_remove_roundtrip() {
    let client = Client::new();
    let base_url = api_base_url();
    let user = format!("it-user-{}", uuid::Uuid::new_v4());

    let product = create_test_product(&client, 1500).await;

    // Add 2 units
    let resp = client
        .post(format!("{base_url}/carts/{user}/items"))
        .json(&json!({"productId": product, "quantity": 2}))
        .send()
        .await
        .expect("Failed to add to cart");
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Total reflects live price x quantity
    let resp = client
        .get(format!("{base_url}/carts/{user}"))
        .send()
        .await
        .expect("Failed to list cart");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to read response");
    assert_eq!(body["total"], 3000);
    assert_eq!(body["cartItems"].as_array().expect("cartItems").len(), 1);

    // Remove twice - idempotent
    for _ in 0..2 {
        let resp = client
            .delete(format!("{base_url}/carts/{user}/items/{product}"))
            .send()
            .await
            .expect("Failed to remove from cart");
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = client
        .get(format!("{base_url}/carts/{user}"))
        .send()
        .await
        .expect("Failed to list cart");
    let body: Value = resp.json().await.expect("Failed to read response");
    assert!(body["cartItems"].as_array().expect("cartItems").is_empty());
}

#[tokio::test]
#[ignore = "Requires running API server and store"]
async fn test_review_updates_product_aggregates() {
    let client = Client::new();
    let base_url = api_base_url();

    let product = create_test_product(&client, 1000).await;

    for rating in [5, 4] {
        let resp = client
            .post(format!("{base_url}/reviews"))
            .json(&json!({
                "productId": product,
                "userId": "it-reviewer",
                "rating": rating,
                "title": "Integration",
                "comment": "Round trip",
            }))
            .send()
            .await
            .expect("Failed to create review");
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = client
        .get(format!("{base_url}/products/{product}"))
        .send()
        .await
        .expect("Failed to fetch product");
    let body: Value = resp.json().await.expect("Failed to read response");
    assert_eq!(body["product"]["reviewCount"], 2);
    assert_eq!(body["product"]["averageRating"], 4.5);
}
