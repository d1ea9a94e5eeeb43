//! Shopping cart domain types and logic for Cartwheel.
//!
//! This crate provides the storefront's cart state container and its
//! collaborators:
//!
//! - **Catalog**: static product list with per-product options and stock ceilings
//! - **Cart**: line items keyed by product + size + color, quantity clamping, coupons
//! - **Pricing**: pure totals computation (discount, shipping threshold, tax)
//! - **Store**: persistence-backed session store with wishlist
//!
//! # Example
//!
//! ```rust,ignore
//! use cartwheel_commerce::prelude::*;
//! use cartwheel_kv::{KvStore, MemoryBackend};
//!
//! let mut store = CartStore::open(KvStore::new(MemoryBackend::new()), "cart:session-1");
//!
//! // Add a product selected from the catalog
//! store.add_item(&product, "M", "Black", 1)?;
//!
//! // Apply a promo code through the validation boundary
//! let validator = AllowListValidator::new();
//! let accepted = store.apply_coupon("WELCOME10", &validator).await;
//!
//! // Totals are computed fresh on every read
//! let totals = store.totals()?;
//! println!("Total: {}", totals.grand_total.display());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod store;
pub mod wishlist;

pub use error::CartError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CartError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Catalog, Product};

    // Cart
    pub use crate::cart::{
        compute_totals, AllowListValidator, AppliedCoupon, Cart, CartTotals, CouponValidator,
        DelayedValidator, LineItem, LineKey,
    };

    // Store
    pub use crate::store::CartStore;
    pub use crate::wishlist::Wishlist;
}
