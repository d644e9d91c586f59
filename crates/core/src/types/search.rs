//! Product search filters.
//!
//! Filters compose with logical AND. An empty filter set matches every
//! product. Field names are camelCase so the struct deserializes directly
//! from the search query string (`?category=...&minPrice=...`).

use serde::{Deserialize, Serialize};

use super::product::Product;

/// Sort key for search results. Always ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Oldest first.
    CreatedAt,
    /// Cheapest first.
    Price,
    /// Lowest-rated first.
    Rating,
}

/// Composable product search filters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    /// Exact category match.
    pub category: Option<String>,
    /// Inclusive lower price bound, minor currency units.
    pub min_price: Option<u64>,
    /// Inclusive upper price bound, minor currency units.
    pub max_price: Option<u64>,
    /// Inclusive lower bound on the average rating.
    pub min_rating: Option<f64>,
    /// Sort order for the result set.
    pub sort_by: Option<SortKey>,
    /// Case-insensitive substring match against name or description.
    pub keyword: Option<String>,
}

impl SearchFilters {
    /// Whether `product` satisfies every present filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category
            && product.category != *category
        {
            return false;
        }
        if let Some(min) = self.min_price
            && product.price < min
        {
            return false;
        }
        if let Some(max) = self.max_price
            && product.price > max
        {
            return false;
        }
        if let Some(min) = self.min_rating
            && product.average_rating < min
        {
            return false;
        }
        if let Some(keyword) = &self.keyword {
            let needle = keyword.to_lowercase();
            let in_name = product.name.to_lowercase().contains(&needle);
            let in_description = product.description.to_lowercase().contains(&needle);
            if !in_name && !in_description {
                return false;
            }
        }
        true
    }
}
