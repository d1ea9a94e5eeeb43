//! Cart and line item types.

use crate::cart::AppliedCoupon;
use crate::catalog::Product;
use crate::error::CartError;
use crate::ids::{CartId, ProductId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Identity of a cart line: product plus selected options.
///
/// Two additions with the same key merge into one line item; different
/// size/color combinations stay distinct even for the same product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    /// Product identifier.
    pub product_id: ProductId,
    /// Selected size.
    pub size: String,
    /// Selected color.
    pub color: String,
}

impl LineKey {
    /// Create a line key.
    pub fn new(
        product_id: impl Into<ProductId>,
        size: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            size: size.into(),
            color: color.into(),
        }
    }
}

/// A line item in the cart.
///
/// Display fields are snapshotted from the catalog at add time so the
/// cart renders without further catalog lookups.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Brand name (denormalized for display).
    pub brand: String,
    /// Listing image URL.
    pub image: Option<String>,
    /// Unit price at time of add.
    pub price: Money,
    /// Pre-discount price, display only.
    pub original_price: Option<Money>,
    /// Selected size.
    pub size: String,
    /// Selected color.
    pub color: String,
    /// Quantity, always within `[1, max_quantity]`.
    pub quantity: i64,
    /// Stock ceiling for this line.
    pub max_quantity: i64,
    /// Stock display flag.
    pub in_stock: bool,
}

impl LineItem {
    /// Snapshot a product into a new line item with a clamped quantity.
    fn from_product(product: &Product, size: String, color: String, quantity: i64) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            brand: product.brand.clone(),
            image: product.primary_image().map(str::to_string),
            price: product.price,
            original_price: product.original_price,
            size,
            color,
            quantity: quantity.min(product.max_quantity).max(1),
            max_quantity: product.max_quantity,
            in_stock: product.in_stock,
        }
    }

    /// The identity key for this line.
    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product_id.clone(),
            size: self.size.clone(),
            color: self.color.clone(),
        }
    }

    /// Check whether this line matches a key.
    pub fn matches(&self, key: &LineKey) -> bool {
        self.product_id == key.product_id && self.size == key.size && self.color == key.color
    }

    /// Line total (unit price times quantity), checked.
    pub fn line_total(&self) -> Result<Money, CartError> {
        self.price
            .try_multiply(self.quantity)
            .ok_or(CartError::Overflow)
    }

    /// Whether this line sits at its stock ceiling.
    pub fn at_max(&self) -> bool {
        self.quantity >= self.max_quantity
    }
}

/// A shopping cart.
///
/// Owns the ordered line item list and the applied coupon. Totals are
/// never stored; see [`crate::cart::compute_totals`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Unique cart identifier.
    pub id: CartId,
    /// Items in insertion order (insertion order = display order).
    pub items: Vec<LineItem>,
    /// Applied coupon, at most one at a time.
    pub applied_coupon: Option<AppliedCoupon>,
    /// Cart currency.
    pub currency: Currency,
}

impl Cart {
    /// Create a new empty cart.
    pub fn new() -> Self {
        Self {
            id: CartId::generate(),
            items: Vec::new(),
            applied_coupon: None,
            currency: Currency::USD,
        }
    }

    /// Add a product to the cart.
    ///
    /// Validates the selected size and color against the product's
    /// declared options. If a line with the same `(product, size,
    /// color)` key exists, its quantity is incremented; otherwise a new
    /// line is appended. Quantities are silently clamped to the
    /// product's `max_quantity`, never rejected.
    pub fn add_item(
        &mut self,
        product: &Product,
        size: impl Into<String>,
        color: impl Into<String>,
        quantity: i64,
    ) -> Result<(), CartError> {
        if quantity <= 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }

        let size = size.into();
        let color = color.into();

        if !product.has_size(&size) {
            return Err(CartError::UnknownSize {
                product_id: product.id.to_string(),
                size,
            });
        }
        if !product.has_color(&color) {
            return Err(CartError::UnknownColor {
                product_id: product.id.to_string(),
                color,
            });
        }

        let key = LineKey::new(product.id.clone(), size.clone(), color.clone());
        if let Some(existing) = self.items.iter_mut().find(|i| i.matches(&key)) {
            existing.quantity = existing
                .quantity
                .saturating_add(quantity)
                .min(existing.max_quantity);
            return Ok(());
        }

        self.items
            .push(LineItem::from_product(product, size, color, quantity));
        Ok(())
    }

    /// Set a line's quantity.
    ///
    /// A target of zero or less removes the line. Quantities above the
    /// line's stock ceiling are clamped. Missing keys are a silent
    /// no-op; cart mutations always originate from a rendered line, so
    /// a stale key is not worth an error.
    pub fn update_quantity(&mut self, key: &LineKey, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(key);
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.matches(key)) {
            item.quantity = quantity.min(item.max_quantity);
        }
    }

    /// Remove a line from the cart. Returns whether a line was removed.
    pub fn remove_item(&mut self, key: &LineKey) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| !i.matches(key));
        self.items.len() < len_before
    }

    /// Empty the cart and drop any applied coupon. Idempotent.
    pub fn clear(&mut self) {
        self.items.clear();
        self.applied_coupon = None;
    }

    /// Apply a validated coupon, replacing any previous one.
    pub fn apply_coupon(&mut self, coupon: AppliedCoupon) {
        self.applied_coupon = Some(coupon);
    }

    /// Remove the applied coupon, if any.
    pub fn remove_coupon(&mut self) {
        self.applied_coupon = None;
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Number of distinct lines.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get a line by key.
    pub fn get(&self, key: &LineKey) -> Option<&LineItem> {
        self.items.iter().find(|i| i.matches(key))
    }

    /// Check if a line with this key exists.
    pub fn contains(&self, key: &LineKey) -> bool {
        self.get(key).is_some()
    }

    /// Subtotal before discount, shipping, and tax.
    pub fn subtotal(&self) -> Result<Money, CartError> {
        let mut subtotal = Money::zero(self.currency);
        for item in &self.items {
            let line = item.line_total()?;
            subtotal = subtotal.try_add(&line).ok_or(CartError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: line.currency.code().to_string(),
            })?;
        }
        Ok(subtotal)
    }

    /// Full pricing breakdown, computed fresh from items and coupon.
    pub fn totals(&self) -> Result<crate::cart::CartTotals, CartError> {
        crate::cart::compute_totals(&self.items, self.applied_coupon.as_ref(), self.currency)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}
