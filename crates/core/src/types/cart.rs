//! Cart line item entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{ProductId, UserId};

/// A single cart line for one (user, product) pair.
///
/// At most one line exists per pair - the store key scheme enforces this.
/// Quantity is always >= 1; an absent line, not a zero quantity, represents
/// "not in the cart". Prices are not stored on the line: totals are joined
/// against the live product record at read time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Owner of the cart.
    pub user_id: UserId,
    /// Product in the cart.
    pub product_id: ProductId,
    /// Units of the product, always >= 1.
    pub quantity: u32,
    /// When the line was first added. Preserved across quantity merges.
    pub added_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_are_camel_case() {
        let item = CartItem {
            user_id: UserId::new("u1"),
            product_id: ProductId::new("p1"),
            quantity: 2,
            added_at: Utc::now(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("userId").is_some());
        assert!(json.get("productId").is_some());
        assert!(json.get("addedAt").is_some());
    }
}
