//! Wishlist: a keyed product set with toggle semantics.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// An ordered set of saved products.
///
/// Keyed by product id only; size and color are chosen again when the
/// product moves back to the cart.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Wishlist {
    items: Vec<ProductId>,
}

impl Wishlist {
    /// Create an empty wishlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a wishlist from a saved id list, dropping duplicates.
    pub fn from_ids(ids: impl IntoIterator<Item = ProductId>) -> Self {
        let mut wishlist = Self::new();
        for id in ids {
            if !wishlist.contains(&id) {
                wishlist.items.push(id);
            }
        }
        wishlist
    }

    /// Add the product if absent, remove it if present.
    ///
    /// Returns whether the product is in the wishlist afterwards.
    pub fn toggle(&mut self, product_id: ProductId) -> bool {
        if let Some(pos) = self.items.iter().position(|id| id == &product_id) {
            self.items.remove(pos);
            false
        } else {
            self.items.push(product_id);
            true
        }
    }

    /// Check if a product is saved.
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|id| id == product_id)
    }

    /// Saved products in insertion order.
    pub fn items(&self) -> &[ProductId] {
        &self.items
    }

    /// Number of saved products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the wishlist is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
