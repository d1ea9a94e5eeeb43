//! Coupon types and the validation boundary.
//!
//! Validation is modeled as an async trait so callers treat it as a
//! network round-trip, while tests inject the allow-list validator and
//! resolve immediately.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Flat discount applied by any valid coupon, as a percentage.
pub const COUPON_PERCENT_OFF: f64 = 10.0;

/// Built-in promo codes accepted by the allow-list validator.
const KNOWN_CODES: &[&str] = &["WELCOME10", "SAVE20", "FREESHIP"];

/// A coupon that has been validated and applied to a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppliedCoupon {
    /// Normalized (uppercase) coupon code.
    pub code: String,
    /// Percentage taken off the subtotal.
    pub percent_off: f64,
}

impl AppliedCoupon {
    /// Create an applied coupon with the flat discount rate, normalizing
    /// the code to uppercase.
    pub fn new(code: impl AsRef<str>) -> Self {
        Self {
            code: code.as_ref().trim().to_uppercase(),
            percent_off: COUPON_PERCENT_OFF,
        }
    }
}

/// Asynchronous coupon validation boundary.
///
/// Implementations decide whether a user-entered code is valid and, if
/// so, what discount it carries. Failure is `None`, never an error;
/// the caller surfaces the messaging.
#[async_trait]
pub trait CouponValidator: Send + Sync {
    /// Validate a user-entered code.
    async fn validate(&self, code: &str) -> Option<AppliedCoupon>;
}

/// Validator backed by a fixed allow-list of known codes.
///
/// Comparison is case-insensitive; accepted codes are normalized to
/// uppercase.
#[derive(Debug, Clone)]
pub struct AllowListValidator {
    codes: Vec<String>,
}

impl AllowListValidator {
    /// Validator with the built-in promo codes.
    pub fn new() -> Self {
        Self::with_codes(KNOWN_CODES.iter().map(|c| c.to_string()))
    }

    /// Validator with a custom code list.
    pub fn with_codes(codes: impl IntoIterator<Item = String>) -> Self {
        Self {
            codes: codes.into_iter().map(|c| c.to_uppercase()).collect(),
        }
    }
}

impl Default for AllowListValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CouponValidator for AllowListValidator {
    async fn validate(&self, code: &str) -> Option<AppliedCoupon> {
        let normalized = code.trim().to_uppercase();
        if normalized.is_empty() {
            return None;
        }
        self.codes
            .iter()
            .any(|c| c == &normalized)
            .then(|| AppliedCoupon::new(normalized))
    }
}

/// Decorator adding a fixed artificial delay before delegating,
/// modeling the gateway round-trip. The delay always resolves; no
/// cancellation path exists.
pub struct DelayedValidator<V> {
    inner: V,
    delay: Duration,
}

impl<V> DelayedValidator<V> {
    /// Wrap a validator with a fixed delay.
    pub fn new(inner: V, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

#[async_trait]
impl<V: CouponValidator> CouponValidator for DelayedValidator<V> {
    async fn validate(&self, code: &str) -> Option<AppliedCoupon> {
        tokio::time::sleep(self.delay).await;
        self.inner.validate(code).await
    }
}
