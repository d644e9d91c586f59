//! Cart service.
//!
//! One record per (user, product) pair; absence, not a zero quantity,
//! means "not in the cart". Repeated adds merge by summing quantities.
//! Prices are never stored on a line - totals join against the live
//! product record at read time, so price changes apply retroactively.

use chrono::Utc;
use tracing::instrument;

use clementine_core::{CartItem, Product, ProductId, UserId};
use clementine_store::{Store, keys};

use crate::error::{AppError, Result};

/// A cart line joined with its live product data.
///
/// `product` is `None` when the referenced product has been deleted since
/// the line was added - the line is still surfaced so the client can show
/// and clear it, but it contributes nothing to the total.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub item: CartItem,
    pub product: Option<Product>,
}

/// Per-user cart operations.
#[derive(Clone)]
pub struct CartService {
    store: Store,
}

impl CartService {
    /// Create a new cart service around a store handle.
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Add a product to a user's cart.
    ///
    /// If the pair already has a line, its quantity is incremented by
    /// `quantity` and `added_at` is preserved; otherwise a fresh line is
    /// created.
    ///
    /// # Errors
    ///
    /// Returns a validation error when `quantity < 1`, a not-found error
    /// when the product does not exist, or a store error.
    #[instrument(skip(self))]
    pub async fn add_item(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<CartItem> {
        let quantity = validate_quantity(quantity)?;

        // Product must exist before anything lands in a cart
        let product: Option<Product> = self.store.get_record(&keys::product(product_id)).await?;
        if product.is_none() {
            return Err(AppError::not_found(format!("product {product_id}")));
        }

        let key = keys::cart_item(user_id, product_id);
        let existing: Option<CartItem> = self.store.get_record(&key).await?;

        let item = match existing {
            Some(mut item) => {
                item.quantity = item.quantity.saturating_add(quantity);
                item
            }
            None => CartItem {
                user_id: user_id.clone(),
                product_id: product_id.clone(),
                quantity,
                added_at: Utc::now(),
            },
        };

        self.store.put_record(&key, &item).await?;
        Ok(item)
    }

    /// Replace the quantity of an existing cart line.
    ///
    /// # Errors
    ///
    /// Returns a validation error when `quantity < 1` (the line is left
    /// unchanged), or a not-found error when the pair has no line.
    #[instrument(skip(self))]
    pub async fn update_quantity(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<CartItem> {
        let quantity = validate_quantity(quantity)?;

        let key = keys::cart_item(user_id, product_id);
        let mut item: CartItem = self
            .store
            .get_record(&key)
            .await?
            .ok_or_else(|| AppError::not_found(format!("cart item {product_id}")))?;

        item.quantity = quantity;
        self.store.put_record(&key, &item).await?;
        Ok(item)
    }

    /// Remove a product from a user's cart. Idempotent: removing an
    /// absent pair is a successful no-op.
    ///
    /// # Errors
    ///
    /// Returns a store error when the delete fails.
    #[instrument(skip(self))]
    pub async fn remove_item(&self, user_id: &UserId, product_id: &ProductId) -> Result<()> {
        self.store
            .delete_record(&keys::cart_item(user_id, product_id))
            .await?;
        Ok(())
    }

    /// All cart lines for a user, each joined with live product data.
    ///
    /// # Errors
    ///
    /// Returns a store error when the scan or a product read fails.
    #[instrument(skip(self))]
    pub async fn list_cart(&self, user_id: &UserId) -> Result<Vec<CartLine>> {
        let items: Vec<CartItem> = self
            .store
            .scan_prefix(&keys::cart_prefix(user_id))
            .await?;

        let mut lines = Vec::with_capacity(items.len());
        for item in items {
            let product = self
                .store
                .get_record(&keys::product(&item.product_id))
                .await?;
            lines.push(CartLine { item, product });
        }
        Ok(lines)
    }

    /// Cart total in minor currency units: sum over lines of current
    /// price x quantity. Computed at read time, never persisted. Lines
    /// whose product has been deleted contribute nothing.
    ///
    /// # Errors
    ///
    /// Returns a store error when reads fail.
    #[instrument(skip(self))]
    pub async fn cart_total(&self, user_id: &UserId) -> Result<u64> {
        let lines = self.list_cart(user_id).await?;
        Ok(total_of(&lines))
    }
}

/// Sum of current price x quantity over lines with a live product.
#[must_use]
pub fn total_of(lines: &[CartLine]) -> u64 {
    lines
        .iter()
        .filter_map(|line| {
            line.product
                .as_ref()
                .map(|product| product.price * u64::from(line.item.quantity))
        })
        .sum()
}

/// Quantities are positive integers; zero means "remove" and is rejected.
fn validate_quantity(quantity: i64) -> Result<u32> {
    if quantity < 1 {
        return Err(AppError::validation("quantity must be at least 1"));
    }
    u32::try_from(quantity).map_err(|_| AppError::validation("quantity is too large"))
}
