//! Recommendation service.
//!
//! Related products share a category or overlap on tags. Ordering is
//! deterministic for a fixed data set: rating descending, then creation
//! time ascending, then product ID.

use std::cmp::Ordering;

use tracing::instrument;

use clementine_core::{Product, ProductId};
use clementine_store::{Store, keys};

use crate::error::{AppError, Result};

/// How many recommendations to return when the caller does not say.
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 5;

/// Related-product lookup.
#[derive(Clone)]
pub struct RecommendationService {
    store: Store,
}

impl RecommendationService {
    /// Create a new recommendation service around a store handle.
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Up to `limit` products related to `product_id`, best-rated first.
    ///
    /// The source product is never included. No matches is an empty
    /// result, not an error.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the source product does not exist,
    /// or a store error.
    #[instrument(skip(self))]
    pub async fn recommend(&self, product_id: &ProductId, limit: usize) -> Result<Vec<Product>> {
        let source: Product = self
            .store
            .get_record(&keys::product(product_id))
            .await?
            .ok_or_else(|| AppError::not_found(format!("product {product_id}")))?;

        let mut related: Vec<Product> = self
            .store
            .scan_prefix(keys::PRODUCT_PREFIX)
            .await?
            .into_iter()
            .filter(|candidate: &Product| source.related_to(candidate))
            .collect();

        related.sort_by(rank);
        related.truncate(limit);
        Ok(related)
    }
}

/// Rating descending, then creation time ascending, then product ID.
fn rank(a: &Product, b: &Product) -> Ordering {
    b.average_rating
        .partial_cmp(&a.average_rating)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.product_id.cmp(&b.product_id))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::services::catalog::{CatalogService, tests::new_product};

    async fn setup() -> (RecommendationService, CatalogService, Store) {
        let store = Store::in_memory();
        (
            RecommendationService::new(store.clone()),
            CatalogService::new(store.clone()),
            store,
        )
    }

    fn with_tags(mut input: crate::services::catalog::NewProduct, tags: &[&str]) -> crate::services::catalog::NewProduct {
        input.tags = Some(tags.iter().map(ToString::to_string).collect::<BTreeSet<_>>());
        input
    }

    #[tokio::test]
    async fn test_recommends_same_category() {
        let (recommend, catalog, _) = setup().await;
        let source = catalog
            .create_product(new_product("Hammer", "tools", 100))
            .await
            .unwrap();
        let peer = catalog
            .create_product(new_product("Wrench", "tools", 100))
            .await
            .unwrap();
        catalog
            .create_product(new_product("Tent", "outdoor", 100))
            .await
            .unwrap();

        let found = recommend
            .recommend(&source.product_id, DEFAULT_RECOMMENDATION_LIMIT)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found.first().unwrap().product_id, peer.product_id);
    }

    #[tokio::test]
    async fn test_recommends_tag_overlap_across_categories() {
        let (recommend, catalog, _) = setup().await;
        let source = catalog
            .create_product(with_tags(new_product("Hammer", "tools", 100), &["steel"]))
            .await
            .unwrap();
        let peer = catalog
            .create_product(with_tags(new_product("Pan", "kitchen", 100), &["steel"]))
            .await
            .unwrap();

        let found = recommend
            .recommend(&source.product_id, DEFAULT_RECOMMENDATION_LIMIT)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found.first().unwrap().product_id, peer.product_id);
    }

    #[tokio::test]
    async fn test_no_overlap_is_empty_not_error() {
        let (recommend, catalog, _) = setup().await;
        let source = catalog
            .create_product(new_product("Hammer", "tools", 100))
            .await
            .unwrap();
        catalog
            .create_product(new_product("Tent", "outdoor", 100))
            .await
            .unwrap();

        let found = recommend.recommend(&source.product_id, 5).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_excludes_source_product() {
        let (recommend, catalog, _) = setup().await;
        let source = catalog
            .create_product(new_product("Hammer", "tools", 100))
            .await
            .unwrap();

        let found = recommend.recommend(&source.product_id, 5).await.unwrap();
        assert!(found.iter().all(|p| p.product_id != source.product_id));
    }

    #[tokio::test]
    async fn test_respects_limit_and_ranks_by_rating() {
        let (recommend, catalog, store) = setup().await;
        let source = catalog
            .create_product(new_product("Hammer", "tools", 100))
            .await
            .unwrap();

        let mut peers = Vec::new();
        for i in 0..4 {
            let mut peer = catalog
                .create_product(new_product(&format!("Peer{i}"), "tools", 100))
                .await
                .unwrap();
            peer.average_rating = f64::from(i);
            store
                .put_record(&keys::product(&peer.product_id), &peer)
                .await
                .unwrap();
            peers.push(peer);
        }

        let found = recommend.recommend(&source.product_id, 2).await.unwrap();
        assert_eq!(found.len(), 2);
        // Best-rated first
        assert!((found[0].average_rating - 3.0).abs() < f64::EPSILON);
        assert!((found[1].average_rating - 2.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_unknown_source_is_not_found() {
        let (recommend, _, _) = setup().await;
        let err = recommend
            .recommend(&ProductId::new("missing"), 5)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_order_is_deterministic() {
        let (recommend, catalog, _) = setup().await;
        let source = catalog
            .create_product(new_product("Hammer", "tools", 100))
            .await
            .unwrap();
        for i in 0..5 {
            catalog
                .create_product(new_product(&format!("Peer{i}"), "tools", 100))
                .await
                .unwrap();
        }

        let first = recommend.recommend(&source.product_id, 5).await.unwrap();
        let second = recommend.recommend(&source.product_id, 5).await.unwrap();
        let ids = |v: &[Product]| v.iter().map(|p| p.product_id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&first), ids(&second));
    }
}
