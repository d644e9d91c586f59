//! Product entity.
//!
//! `average_rating` and `review_count` are derived from the product's
//! reviews and are rewritten by the review service on every review insert.
//! Clients can never set them directly.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A catalog product.
///
/// Prices are integer minor currency units (e.g. cents for USD).
/// Wire names are camelCase to match the public JSON contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique, immutable product ID.
    pub product_id: ProductId,
    /// Display name.
    pub name: String,
    /// Long-form description.
    pub description: String,
    /// Price in minor currency units.
    pub price: u64,
    /// Units in stock.
    pub stock: u64,
    /// Category name (exact-match filter key).
    pub category: String,
    /// URL of the product image.
    pub image_url: String,
    /// Derived: full-precision arithmetic mean of all review ratings,
    /// 0.0 when the product has no reviews. Rounded to one decimal only
    /// for display.
    pub average_rating: f64,
    /// Derived: number of reviews.
    pub review_count: u64,
    /// Optional tag set. `BTreeSet` keeps iteration deterministic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeSet<String>>,
    /// Optional brand name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Average rating rounded to one decimal, for display.
    #[must_use]
    pub fn display_rating(&self) -> f64 {
        (self.average_rating * 10.0).round() / 10.0
    }

    /// Whether this product is related to `other`: same category, or at
    /// least one shared tag. A product is never related to itself.
    #[must_use]
    pub fn related_to(&self, other: &Self) -> bool {
        if self.product_id == other.product_id {
            return false;
        }
        if self.category == other.category {
            return true;
        }
        match (&self.tags, &other.tags) {
            (Some(mine), Some(theirs)) => mine.intersection(theirs).next().is_some(),
            _ => false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: &str, category: &str, tags: &[&str]) -> Product {
        Product {
            product_id: ProductId::new(id),
            name: "Widget".to_string(),
            description: "A widget".to_string(),
            price: 1500,
            stock: 10,
            category: category.to_string(),
            image_url: String::new(),
            average_rating: 0.0,
            review_count: 0,
            tags: if tags.is_empty() {
                None
            } else {
                Some(tags.iter().map(ToString::to_string).collect())
            },
            brand: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_display_rating_rounds_to_one_decimal() {
        let mut p = product("p1", "tools", &[]);
        p.average_rating = 11.0 / 3.0; // 3.666...
        assert!((p.display_rating() - 3.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_related_by_category() {
        let a = product("p1", "tools", &[]);
        let b = product("p2", "tools", &[]);
        assert!(a.related_to(&b));
    }

    #[test]
    fn test_related_by_tag_overlap() {
        let a = product("p1", "tools", &["metal", "garden"]);
        let b = product("p2", "outdoor", &["garden"]);
        assert!(a.related_to(&b));
    }

    #[test]
    fn test_unrelated_products() {
        let a = product("p1", "tools", &["metal"]);
        let b = product("p2", "outdoor", &["fabric"]);
        assert!(!a.related_to(&b));
    }

    #[test]
    fn test_never_related_to_self() {
        let a = product("p1", "tools", &[]);
        assert!(!a.related_to(&a));
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let p = product("p1", "tools", &[]);
        let json = serde_json::to_value(&p).unwrap();
        assert!(json.get("productId").is_some());
        assert!(json.get("imageUrl").is_some());
        assert!(json.get("averageRating").is_some());
        assert!(json.get("reviewCount").is_some());
        assert!(json.get("createdAt").is_some());
        // Optional fields are omitted when unset
        assert!(json.get("tags").is_none());
        assert!(json.get("brand").is_none());
    }
}
