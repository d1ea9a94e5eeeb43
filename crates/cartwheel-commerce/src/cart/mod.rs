//! Shopping cart module.
//!
//! Contains types for the cart, line items, coupons, and pricing.

mod cart;
mod coupon;
mod pricing;

pub use cart::{Cart, LineItem, LineKey};
pub use coupon::{
    AllowListValidator, AppliedCoupon, CouponValidator, DelayedValidator, COUPON_PERCENT_OFF,
};
pub use pricing::{
    compute_totals, CartTotals, FLAT_SHIPPING_CENTS, FREE_SHIPPING_THRESHOLD_CENTS, TAX_RATE,
};
