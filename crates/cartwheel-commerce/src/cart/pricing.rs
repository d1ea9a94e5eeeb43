//! Cart pricing calculations.
//!
//! Totals are pure functions of the item list and applied coupon,
//! computed fresh on every read and never stored, so they cannot drift
//! from the items they describe.

use crate::cart::{AppliedCoupon, LineItem};
use crate::error::CartError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Orders with a subtotal strictly above this ship free.
pub const FREE_SHIPPING_THRESHOLD_CENTS: i64 = 7_500;

/// Flat shipping rate below the free-shipping threshold.
pub const FLAT_SHIPPING_CENTS: i64 = 999;

/// Sales tax rate, applied to the discounted subtotal.
pub const TAX_RATE: f64 = 0.08;

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CartTotals {
    /// Subtotal before discounts.
    pub subtotal: Money,
    /// Coupon discount amount.
    pub discount_total: Money,
    /// Shipping cost.
    pub shipping_total: Money,
    /// Tax amount.
    pub tax_total: Money,
    /// Final total (subtotal - discount + shipping + tax).
    pub grand_total: Money,
}

impl CartTotals {
    /// Zeroed totals for an empty cart.
    pub fn zero(currency: Currency) -> Self {
        Self {
            subtotal: Money::zero(currency),
            discount_total: Money::zero(currency),
            shipping_total: Money::zero(currency),
            tax_total: Money::zero(currency),
            grand_total: Money::zero(currency),
        }
    }

    /// Check if a discount is applied.
    pub fn has_discount(&self) -> bool {
        self.discount_total.is_positive()
    }

    /// Check if the order ships free.
    pub fn has_free_shipping(&self) -> bool {
        self.shipping_total.is_zero()
    }

    /// How much more subtotal is needed to ship free, if any.
    pub fn amount_to_free_shipping(&self) -> Option<Money> {
        if self.has_free_shipping() {
            return None;
        }
        let threshold = Money::new(FREE_SHIPPING_THRESHOLD_CENTS, self.subtotal.currency);
        threshold.try_subtract(&self.subtotal).filter(Money::is_positive)
    }
}

/// Compute the full pricing breakdown for a set of cart lines.
///
/// Business rules, in order:
/// 1. `discount` is a flat percentage of the subtotal when a coupon is
///    applied, taken before tax.
/// 2. `shipping` is tested against the raw subtotal, not the discounted
///    amount, and the threshold is strict (`>`): a subtotal of exactly
///    $75.00 still pays flat-rate shipping.
/// 3. `tax` applies to the discounted subtotal.
pub fn compute_totals(
    items: &[LineItem],
    coupon: Option<&AppliedCoupon>,
    currency: Currency,
) -> Result<CartTotals, CartError> {
    let mut subtotal = Money::zero(currency);
    for item in items {
        let line = item.line_total()?;
        subtotal = subtotal.try_add(&line).ok_or(CartError::CurrencyMismatch {
            expected: currency.code().to_string(),
            got: line.currency.code().to_string(),
        })?;
    }

    let discount_total = match coupon {
        Some(coupon) => subtotal.percentage(coupon.percent_off),
        None => Money::zero(currency),
    };

    let shipping_total = if subtotal.amount_cents > FREE_SHIPPING_THRESHOLD_CENTS {
        Money::zero(currency)
    } else {
        Money::new(FLAT_SHIPPING_CENTS, currency)
    };

    let discounted = subtotal
        .try_subtract(&discount_total)
        .ok_or(CartError::Overflow)?;
    let tax_total = discounted.multiply_decimal(TAX_RATE);

    let grand_total = discounted
        .try_add(&shipping_total)
        .and_then(|m| m.try_add(&tax_total))
        .ok_or(CartError::Overflow)?;

    Ok(CartTotals {
        subtotal,
        discount_total,
        shipping_total,
        tax_total,
        grand_total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Cart;
    use crate::catalog::Product;

    fn cart_with(prices_and_quantities: &[(i64, i64)]) -> Cart {
        let mut cart = Cart::new();
        for (index, (price, quantity)) in prices_and_quantities.iter().enumerate() {
            let mut product = Product::new(
                format!("prod-{index}"),
                format!("Product {index}"),
                Money::new(*price, Currency::USD),
            );
            product.max_quantity = 99;
            cart.add_item(&product, "One Size", "Default", *quantity)
                .unwrap();
        }
        cart
    }

    #[test]
    fn test_totals_without_coupon() {
        // $100 x1 + $50 x2 = $200 subtotal, free shipping, 8% tax.
        let cart = cart_with(&[(10_000, 1), (5_000, 2)]);
        let totals = cart.totals().unwrap();

        assert_eq!(totals.subtotal.amount_cents, 20_000);
        assert_eq!(totals.discount_total.amount_cents, 0);
        assert_eq!(totals.shipping_total.amount_cents, 0);
        assert_eq!(totals.tax_total.amount_cents, 1_600);
        assert_eq!(totals.grand_total.amount_cents, 21_600);
    }

    #[test]
    fn test_totals_with_coupon() {
        // Same cart, 10% coupon: $20 off, tax on $180.
        let mut cart = cart_with(&[(10_000, 1), (5_000, 2)]);
        cart.apply_coupon(AppliedCoupon::new("WELCOME10"));
        let totals = cart.totals().unwrap();

        assert_eq!(totals.discount_total.amount_cents, 2_000);
        assert_eq!(totals.tax_total.amount_cents, 1_440);
        assert_eq!(totals.grand_total.amount_cents, 19_440);
        assert!(totals.has_discount());
    }

    #[test]
    fn test_free_shipping_threshold_is_strict() {
        // Exactly $75.00 still pays flat shipping.
        let cart = cart_with(&[(7_500, 1)]);
        let totals = cart.totals().unwrap();
        assert_eq!(totals.shipping_total.amount_cents, FLAT_SHIPPING_CENTS);

        // One cent over ships free.
        let cart = cart_with(&[(7_501, 1)]);
        let totals = cart.totals().unwrap();
        assert!(totals.has_free_shipping());
    }

    #[test]
    fn test_shipping_tested_on_raw_subtotal() {
        // $80 subtotal ships free even though the discounted amount
        // ($72) falls below the threshold.
        let mut cart = cart_with(&[(8_000, 1)]);
        cart.apply_coupon(AppliedCoupon::new("SAVE20"));
        let totals = cart.totals().unwrap();

        assert_eq!(totals.discount_total.amount_cents, 800);
        assert!(totals.has_free_shipping());
    }

    #[test]
    fn test_empty_cart_still_charges_shipping_constant() {
        // Matches the storefront behavior: the shipping line renders
        // from the same rule regardless of item count.
        let totals = compute_totals(&[], None, Currency::USD).unwrap();
        assert_eq!(totals.subtotal.amount_cents, 0);
        assert_eq!(totals.shipping_total.amount_cents, FLAT_SHIPPING_CENTS);
    }

    #[test]
    fn test_amount_to_free_shipping() {
        let cart = cart_with(&[(5_000, 1)]);
        let totals = cart.totals().unwrap();
        assert_eq!(
            totals.amount_to_free_shipping().unwrap().amount_cents,
            2_500
        );

        let cart = cart_with(&[(9_000, 1)]);
        let totals = cart.totals().unwrap();
        assert!(totals.amount_to_free_shipping().is_none());
    }

    #[test]
    fn test_tax_rounds_to_nearest_cent() {
        // $1.27 subtotal, 8% tax = 10.16 cents, rounds to 10.
        let cart = cart_with(&[(127, 1)]);
        let totals = cart.totals().unwrap();
        assert_eq!(totals.tax_total.amount_cents, 10);
    }
}
