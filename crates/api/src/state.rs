//! Application state shared across handlers.

use std::sync::Arc;

use clementine_store::Store;

use crate::config::ApiConfig;
use crate::services::{CartService, CatalogService, RecommendationService, ReviewService};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// store handle and the domain services. Services are stateless beyond the
/// store handle - every request re-reads the store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    store: Store,
    catalog: CatalogService,
    cart: CartService,
    reviews: ReviewService,
    recommendations: RecommendationService,
}

impl AppState {
    /// Create a new application state around a store handle.
    #[must_use]
    pub fn new(config: ApiConfig, store: Store) -> Self {
        let catalog = CatalogService::new(store.clone());
        let cart = CartService::new(store.clone());
        let reviews = ReviewService::new(store.clone());
        let recommendations = RecommendationService::new(store.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                catalog,
                cart,
                reviews,
                recommendations,
            }),
        }
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the store handle.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.inner.store
    }

    /// Get a reference to the product catalog service.
    #[must_use]
    pub fn catalog(&self) -> &CatalogService {
        &self.inner.catalog
    }

    /// Get a reference to the cart service.
    #[must_use]
    pub fn cart(&self) -> &CartService {
        &self.inner.cart
    }

    /// Get a reference to the review service.
    #[must_use]
    pub fn reviews(&self) -> &ReviewService {
        &self.inner.reviews
    }

    /// Get a reference to the recommendation service.
    #[must_use]
    pub fn recommendations(&self) -> &RecommendationService {
        &self.inner.recommendations
    }
}
