//! Seed the catalog with demo products.
//!
//! Writes through the same `CatalogService` the API uses, so seeded
//! records get real IDs, timestamps, and zeroed rating aggregates.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::info;

use clementine_api::services::{CatalogService, NewProduct};
use clementine_store::Store;

fn tags(values: &[&str]) -> Option<BTreeSet<String>> {
    Some(values.iter().map(ToString::to_string).collect())
}

/// The demo catalog.
fn demo_products() -> Vec<NewProduct> {
    vec![
        NewProduct {
            name: "Cast Iron Skillet".to_string(),
            description: "Pre-seasoned 10-inch cast iron skillet.".to_string(),
            price: 3499,
            stock: 24,
            category: "kitchen".to_string(),
            image_url: "https://assets.clementine.shop/skillet.jpg".to_string(),
            tags: tags(&["cookware", "cast-iron"]),
            brand: Some("Hearthline".to_string()),
        },
        NewProduct {
            name: "Chef's Knife".to_string(),
            description: "8-inch high-carbon stainless chef's knife.".to_string(),
            price: 5999,
            stock: 18,
            category: "kitchen".to_string(),
            image_url: "https://assets.clementine.shop/knife.jpg".to_string(),
            tags: tags(&["cookware", "cutlery"]),
            brand: Some("Hearthline".to_string()),
        },
        NewProduct {
            name: "Camping Lantern".to_string(),
            description: "Rechargeable LED lantern, 400 lumens.".to_string(),
            price: 2599,
            stock: 40,
            category: "outdoor".to_string(),
            image_url: "https://assets.clementine.shop/lantern.jpg".to_string(),
            tags: tags(&["camping", "lighting"]),
            brand: Some("Trailhead".to_string()),
        },
        NewProduct {
            name: "Two-Person Tent".to_string(),
            description: "Lightweight three-season backpacking tent.".to_string(),
            price: 12999,
            stock: 12,
            category: "outdoor".to_string(),
            image_url: "https://assets.clementine.shop/tent.jpg".to_string(),
            tags: tags(&["camping", "shelter"]),
            brand: Some("Trailhead".to_string()),
        },
        NewProduct {
            name: "Claw Hammer".to_string(),
            description: "16 oz fiberglass-handle claw hammer.".to_string(),
            price: 1499,
            stock: 60,
            category: "tools".to_string(),
            image_url: "https://assets.clementine.shop/hammer.jpg".to_string(),
            tags: tags(&["hand-tools"]),
            brand: None,
        },
        NewProduct {
            name: "Adjustable Wrench".to_string(),
            description: "10-inch forged steel adjustable wrench.".to_string(),
            price: 1899,
            stock: 45,
            category: "tools".to_string(),
            image_url: "https://assets.clementine.shop/wrench.jpg".to_string(),
            tags: tags(&["hand-tools"]),
            brand: None,
        },
    ]
}

/// Seed demo products.
///
/// # Errors
///
/// Returns an error if configuration is missing or a write fails.
pub async fn catalog() -> Result<(), Box<dyn std::error::Error>> {
    let dynamo = super::connect().await?;
    let catalog = CatalogService::new(Store::new(Arc::new(dynamo)));

    let products = demo_products();
    let total = products.len();
    info!(total, "Seeding demo catalog");

    for product in products {
        let created = catalog.create_product(product).await?;
        info!(product_id = %created.product_id, name = %created.name, "Seeded product");
    }

    info!("Seeding complete!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_products_are_valid_inputs() {
        for product in demo_products() {
            assert!(product.price >= 0);
            assert!(product.stock >= 0);
            assert!(!product.name.is_empty());
            assert!(!product.category.is_empty());
        }
    }
}
