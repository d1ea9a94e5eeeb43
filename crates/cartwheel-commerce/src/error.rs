//! Cart error types.

use thiserror::Error;

/// Errors that can occur in cart operations.
#[derive(Error, Debug)]
pub enum CartError {
    /// Product not found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Size is not one of the product's declared sizes.
    #[error("Unknown size {size:?} for product {product_id}")]
    UnknownSize { product_id: String, size: String },

    /// Color is not one of the product's declared colors.
    #[error("Unknown color {color:?} for product {product_id}")]
    UnknownColor { product_id: String, color: String },

    /// Requested quantity must be at least one.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Currency mismatch in a money calculation.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow in a money calculation.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Persistence error.
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl From<serde_json::Error> for CartError {
    fn from(e: serde_json::Error) -> Self {
        CartError::SerializationError(e.to_string())
    }
}

impl From<cartwheel_kv::KvError> for CartError {
    fn from(e: cartwheel_kv::KvError) -> Self {
        CartError::StorageError(e.to_string())
    }
}
