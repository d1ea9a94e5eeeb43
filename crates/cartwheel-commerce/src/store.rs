//! Persistence-backed cart store.
//!
//! The store owns the cart and wishlist for one session and writes a
//! snapshot to the key-value slot after every mutation. It is an
//! explicitly constructed instance, not process-wide state: the
//! application root builds one and hands it down, and tests construct
//! isolated stores over in-memory backends.

use crate::cart::{AppliedCoupon, Cart, CartTotals, CouponValidator, LineKey};
use crate::catalog::Product;
use crate::error::CartError;
use crate::ids::ProductId;
use crate::wishlist::Wishlist;
use cartwheel_kv::KvStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Serialized cart state, one blob per storage key.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    items: Vec<crate::cart::LineItem>,
    applied_coupon: Option<AppliedCoupon>,
    #[serde(default)]
    wishlist: Vec<ProductId>,
}

/// The session cart store.
///
/// All mutations run through this type so every change lands in the
/// persistence slot. Writes are fire-and-forget: a failed write is
/// logged and ignored, since the slot is session convenience state,
/// not a system of record.
pub struct CartStore {
    cart: Cart,
    wishlist: Wishlist,
    kv: KvStore,
    key: String,
}

impl CartStore {
    /// Open a store, hydrating from the persisted snapshot.
    ///
    /// Absent or corrupt data falls back to an empty cart; hydration
    /// failure is recoverable, never fatal.
    pub fn open(kv: KvStore, key: impl Into<String>) -> Self {
        let key = key.into();
        let (cart, wishlist) = match kv.get::<Snapshot>(&key) {
            Ok(Some(snapshot)) => {
                debug!(key = %key, items = snapshot.items.len(), "hydrated cart");
                let mut cart = Cart::new();
                cart.items = snapshot.items;
                cart.applied_coupon = snapshot.applied_coupon;
                (cart, Wishlist::from_ids(snapshot.wishlist))
            }
            Ok(None) => (Cart::new(), Wishlist::new()),
            Err(e) => {
                warn!(key = %key, error = %e, "cart hydration failed, starting empty");
                (Cart::new(), Wishlist::new())
            }
        };
        Self {
            cart,
            wishlist,
            kv,
            key,
        }
    }

    /// Read access to the cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Read access to the wishlist.
    pub fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    /// Pricing breakdown for the current cart.
    pub fn totals(&self) -> Result<CartTotals, CartError> {
        self.cart.totals()
    }

    /// Add a product to the cart and persist.
    pub fn add_item(
        &mut self,
        product: &Product,
        size: impl Into<String>,
        color: impl Into<String>,
        quantity: i64,
    ) -> Result<(), CartError> {
        self.cart.add_item(product, size, color, quantity)?;
        self.persist();
        Ok(())
    }

    /// Set a line's quantity and persist. Zero or less removes the line.
    pub fn update_quantity(&mut self, key: &LineKey, quantity: i64) {
        self.cart.update_quantity(key, quantity);
        self.persist();
    }

    /// Remove a line and persist. Returns whether a line was removed.
    pub fn remove_item(&mut self, key: &LineKey) -> bool {
        let removed = self.cart.remove_item(key);
        if removed {
            self.persist();
        }
        removed
    }

    /// Empty the cart, drop the coupon, and persist. The wishlist is
    /// untouched.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.persist();
    }

    /// Validate and apply a coupon, replacing any previous one.
    ///
    /// Returns whether the code was accepted. The `&mut self` receiver
    /// keeps a second apply from racing the first on the same store.
    pub async fn apply_coupon(&mut self, code: &str, validator: &dyn CouponValidator) -> bool {
        match validator.validate(code).await {
            Some(coupon) => {
                self.cart.apply_coupon(coupon);
                self.persist();
                true
            }
            None => false,
        }
    }

    /// Drop the applied coupon, if any, and persist.
    pub fn remove_coupon(&mut self) {
        self.cart.remove_coupon();
        self.persist();
    }

    /// Toggle a product on the wishlist and persist.
    ///
    /// Returns whether the product is saved afterwards.
    pub fn toggle_wishlist(&mut self, product_id: ProductId) -> bool {
        let saved = self.wishlist.toggle(product_id);
        self.persist();
        saved
    }

    /// Check if a product is on the wishlist.
    pub fn is_in_wishlist(&self, product_id: &ProductId) -> bool {
        self.wishlist.contains(product_id)
    }

    /// Move a cart line to the wishlist: save the product, then remove
    /// the line. Saving happens even if the line is already gone.
    pub fn move_to_wishlist(&mut self, key: &LineKey) {
        if !self.wishlist.contains(&key.product_id) {
            self.wishlist.toggle(key.product_id.clone());
        }
        self.cart.remove_item(key);
        self.persist();
    }

    fn persist(&self) {
        let snapshot = Snapshot {
            items: self.cart.items.clone(),
            applied_coupon: self.cart.applied_coupon.clone(),
            wishlist: self.wishlist.items().to_vec(),
        };
        if let Err(e) = self.kv.set(&self.key, &snapshot) {
            warn!(key = %self.key, error = %e, "failed to persist cart");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::AllowListValidator;
    use crate::money::{Currency, Money};
    use cartwheel_kv::{Backend, MemoryBackend};
    use std::sync::Arc;

    const KEY: &str = "cart:test-session";

    fn boots() -> Product {
        let mut product = Product::new("prod-1", "Trail Boots", Money::new(12_900, Currency::USD));
        product.brand = "Northwind".to_string();
        product.sizes = vec!["9".to_string(), "10".to_string()];
        product.colors = vec!["Brown".to_string()];
        product.max_quantity = 4;
        product
    }

    fn store() -> CartStore {
        CartStore::open(KvStore::new(MemoryBackend::new()), KEY)
    }

    #[test]
    fn test_mutations_flow_through() {
        let mut store = store();
        store.add_item(&boots(), "9", "Brown", 2).unwrap();

        assert_eq!(store.cart().item_count(), 2);
        let totals = store.totals().unwrap();
        assert_eq!(totals.subtotal.amount_cents, 25_800);

        store.clear_cart();
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_persistence_roundtrip() {
        let backend = Arc::new(MemoryBackend::new());

        let mut store = CartStore::open(KvStore::new(backend.clone()), KEY);
        store.add_item(&boots(), "10", "Brown", 1).unwrap();
        store.toggle_wishlist(ProductId::new("prod-9"));

        // Simulate reload against the same backing slot.
        let restored = CartStore::open(KvStore::new(backend), KEY);
        assert_eq!(restored.cart().items, store.cart().items);
        assert_eq!(
            restored.cart().applied_coupon,
            store.cart().applied_coupon
        );
        assert!(restored.is_in_wishlist(&ProductId::new("prod-9")));
    }

    #[tokio::test]
    async fn test_coupon_roundtrip_survives_reload() {
        let backend = Arc::new(MemoryBackend::new());
        let validator = AllowListValidator::new();

        let mut store = CartStore::open(KvStore::new(backend.clone()), KEY);
        store.add_item(&boots(), "9", "Brown", 1).unwrap();
        assert!(store.apply_coupon("welcome10", &validator).await);

        let restored = CartStore::open(KvStore::new(backend), KEY);
        assert_eq!(
            restored.cart().applied_coupon.as_ref().unwrap().code,
            "WELCOME10"
        );
    }

    #[tokio::test]
    async fn test_rejected_coupon_leaves_state_unchanged() {
        let mut store = store();
        let validator = AllowListValidator::new();

        assert!(!store.apply_coupon("BOGUS", &validator).await);
        assert!(store.cart().applied_coupon.is_none());
    }

    #[test]
    fn test_corrupt_snapshot_falls_back_to_empty() {
        let backend = MemoryBackend::new();
        backend.set_raw(KEY, b"{ not json").unwrap();

        let store = CartStore::open(KvStore::new(backend), KEY);
        assert!(store.cart().is_empty());
        assert!(store.wishlist().is_empty());
    }

    #[test]
    fn test_move_to_wishlist() {
        let mut store = store();
        store.add_item(&boots(), "9", "Brown", 1).unwrap();

        let key = LineKey::new("prod-1", "9", "Brown");
        store.move_to_wishlist(&key);

        assert!(!store.cart().contains(&key));
        assert!(store.is_in_wishlist(&ProductId::new("prod-1")));
    }

    #[test]
    fn test_move_to_wishlist_does_not_unsave_on_repeat() {
        let mut store = store();
        store.toggle_wishlist(ProductId::new("prod-1"));

        store.move_to_wishlist(&LineKey::new("prod-1", "9", "Brown"));
        assert!(store.is_in_wishlist(&ProductId::new("prod-1")));
    }

    #[test]
    fn test_file_backed_roundtrip() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = CartStore::open(
            KvStore::new(cartwheel_kv::FileBackend::open(dir.path()).unwrap()),
            KEY,
        );
        store.add_item(&boots(), "9", "Brown", 3).unwrap();

        let restored = CartStore::open(
            KvStore::new(cartwheel_kv::FileBackend::open(dir.path()).unwrap()),
            KEY,
        );
        assert_eq!(restored.cart().item_count(), 3);
    }
}
