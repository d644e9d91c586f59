//! Product catalog service.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::Utc;
use serde::Deserialize;
use tracing::instrument;

use clementine_core::{Product, ProductId, SearchFilters, SortKey};
use clementine_store::{Store, keys};

use crate::error::{AppError, Result};

/// Input for creating a product.
///
/// Price and stock arrive signed so that out-of-range values are rejected
/// with a validation error instead of a deserialization failure. Aggregate
/// fields (`averageRating`, `reviewCount`) deliberately do not exist here -
/// they are derived state owned by the review service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    /// Price in minor currency units. Must be >= 0.
    pub price: i64,
    /// Units in stock. Must be >= 0.
    pub stock: i64,
    pub category: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub tags: Option<BTreeSet<String>>,
    #[serde(default)]
    pub brand: Option<String>,
}

/// Product creation, lookup, listing, and search.
#[derive(Clone)]
pub struct CatalogService {
    store: Store,
}

impl CatalogService {
    /// Create a new catalog service around a store handle.
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Create a product with a fresh ID and zeroed rating aggregates.
    ///
    /// # Errors
    ///
    /// Returns a validation error when `price` or `stock` is negative, or
    /// a store error when the write fails.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_product(&self, input: NewProduct) -> Result<Product> {
        let price = u64::try_from(input.price)
            .map_err(|_| AppError::validation("price must not be negative"))?;
        let stock = u64::try_from(input.stock)
            .map_err(|_| AppError::validation("stock must not be negative"))?;

        let now = Utc::now();
        let product = Product {
            product_id: ProductId::generate(),
            name: input.name,
            description: input.description,
            price,
            stock,
            category: input.category,
            image_url: input.image_url,
            average_rating: 0.0,
            review_count: 0,
            tags: input.tags.filter(|tags| !tags.is_empty()),
            brand: input.brand,
            created_at: now,
            updated_at: now,
        };

        self.store
            .put_record(&keys::product(&product.product_id), &product)
            .await?;
        Ok(product)
    }

    /// Fetch one product.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the product does not exist.
    #[instrument(skip(self))]
    pub async fn get_product(&self, product_id: &ProductId) -> Result<Product> {
        self.store
            .get_record(&keys::product(product_id))
            .await?
            .ok_or_else(|| AppError::not_found(format!("product {product_id}")))
    }

    /// All products, in store scan order.
    ///
    /// # Errors
    ///
    /// Returns a store error when the scan fails.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>> {
        Ok(self.store.scan_prefix(keys::PRODUCT_PREFIX).await?)
    }

    /// Products matching every present filter, optionally sorted.
    ///
    /// Filters compose with AND; an empty filter set returns all products.
    /// Sorting is ascending on the chosen key with the product ID as the
    /// final tiebreak, so results are deterministic for a fixed data set.
    ///
    /// # Errors
    ///
    /// Returns a store error when the scan fails.
    #[instrument(skip(self, filters))]
    pub async fn search_products(&self, filters: &SearchFilters) -> Result<Vec<Product>> {
        let mut products: Vec<Product> = self
            .list_products()
            .await?
            .into_iter()
            .filter(|product| filters.matches(product))
            .collect();

        if let Some(sort_by) = filters.sort_by {
            products.sort_by(|a, b| compare_products(a, b, sort_by));
        }

        Ok(products)
    }
}

/// Ascending comparison on the sort key, tiebroken by product ID.
fn compare_products(a: &Product, b: &Product, key: SortKey) -> Ordering {
    let primary = match key {
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        SortKey::Price => a.price.cmp(&b.price),
        SortKey::Rating => a
            .average_rating
            .partial_cmp(&b.average_rating)
            .unwrap_or(Ordering::Equal),
    };
    primary.then_with(|| a.product_id.cmp(&b.product_id))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn new_product(name: &str, category: &str, price: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: format!("{name} description"),
            price,
            stock: 10,
            category: category.to_string(),
            image_url: String::new(),
            tags: None,
            brand: None,
        }
    }

    #[tokio::test]
    async fn test_created_product_has_zeroed_aggregates() {
        let catalog = CatalogService::new(Store::in_memory());

        let created = catalog
            .create_product(new_product("Widget", "tools", 1500))
            .await
            .unwrap();
        let fetched = catalog.get_product(&created.product_id).await.unwrap();

        assert_eq!(fetched.review_count, 0);
        assert!((fetched.average_rating - 0.0).abs() < f64::EPSILON);
        assert_eq!(fetched.price, 1500);
        assert_eq!(fetched.name, "Widget");
    }

    #[tokio::test]
    async fn test_negative_price_is_rejected() {
        let catalog = CatalogService::new(Store::in_memory());
        let err = catalog
            .create_product(new_product("Widget", "tools", -1))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_negative_stock_is_rejected() {
        let catalog = CatalogService::new(Store::in_memory());
        let mut input = new_product("Widget", "tools", 100);
        input.stock = -5;
        let err = catalog.create_product(input).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_get_missing_product_is_not_found() {
        let catalog = CatalogService::new(Store::in_memory());
        let err = catalog
            .get_product(&ProductId::new("missing"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_returns_all_products() {
        let catalog = CatalogService::new(Store::in_memory());
        for i in 0..3 {
            catalog
                .create_product(new_product(&format!("P{i}"), "tools", 100))
                .await
                .unwrap();
        }
        assert_eq!(catalog.list_products().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_search_price_range() {
        let catalog = CatalogService::new(Store::in_memory());
        for price in [500, 1000, 1500, 2000, 2500] {
            catalog
                .create_product(new_product(&format!("P{price}"), "tools", price))
                .await
                .unwrap();
        }

        let filters = SearchFilters {
            min_price: Some(1000),
            max_price: Some(2000),
            ..SearchFilters::default()
        };
        let found = catalog.search_products(&filters).await.unwrap();
        assert_eq!(found.len(), 3);
        assert!(found.iter().all(|p| (1000..=2000).contains(&p.price)));
    }

    #[tokio::test]
    async fn test_search_empty_filters_returns_all() {
        let catalog = CatalogService::new(Store::in_memory());
        for i in 0..4 {
            catalog
                .create_product(new_product(&format!("P{i}"), "tools", 100))
                .await
                .unwrap();
        }
        let found = catalog
            .search_products(&SearchFilters::default())
            .await
            .unwrap();
        assert_eq!(found.len(), 4);
    }

    #[tokio::test]
    async fn test_search_no_match_is_empty_not_error() {
        let catalog = CatalogService::new(Store::in_memory());
        catalog
            .create_product(new_product("Widget", "tools", 100))
            .await
            .unwrap();

        let filters = SearchFilters {
            category: Some("outdoor".to_string()),
            ..SearchFilters::default()
        };
        assert!(catalog.search_products(&filters).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_sorts_ascending_by_price() {
        let catalog = CatalogService::new(Store::in_memory());
        for price in [2000, 500, 1500] {
            catalog
                .create_product(new_product(&format!("P{price}"), "tools", price))
                .await
                .unwrap();
        }

        let filters = SearchFilters {
            sort_by: Some(SortKey::Price),
            ..SearchFilters::default()
        };
        let found = catalog.search_products(&filters).await.unwrap();
        let prices: Vec<u64> = found.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![500, 1500, 2000]);
    }

    #[tokio::test]
    async fn test_search_keyword_spans_name_and_description() {
        let catalog = CatalogService::new(Store::in_memory());
        catalog
            .create_product(new_product("Garden Hose", "outdoor", 100))
            .await
            .unwrap();
        catalog
            .create_product(new_product("Wrench", "tools", 100))
            .await
            .unwrap();

        let filters = SearchFilters {
            keyword: Some("garden".to_string()),
            ..SearchFilters::default()
        };
        let found = catalog.search_products(&filters).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found.first().unwrap().name, "Garden Hose");
    }

    #[tokio::test]
    async fn test_empty_tags_are_normalized_to_none() {
        let catalog = CatalogService::new(Store::in_memory());
        let mut input = new_product("Widget", "tools", 100);
        input.tags = Some(BTreeSet::new());
        let created = catalog.create_product(input).await.unwrap();
        assert!(created.tags.is_none());
    }
}
