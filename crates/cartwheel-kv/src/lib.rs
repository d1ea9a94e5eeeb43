//! Type-safe key-value persistence layer for Cartwheel.
//!
//! Provides a simple, ergonomic API for persisting small state blobs
//! (carts, sessions, preferences) with automatic JSON serialization.
//!
//! # Example
//!
//! ```rust,ignore
//! use cartwheel_kv::{KvStore, MemoryBackend};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Snapshot {
//!     items: Vec<String>,
//! }
//!
//! let store = KvStore::new(MemoryBackend::new());
//!
//! // Store a value
//! store.set("cart:session123", &snapshot)?;
//!
//! // Retrieve a value
//! let snapshot: Option<Snapshot> = store.get("cart:session123")?;
//!
//! // Delete a value
//! store.delete("cart:session123")?;
//! ```

mod backend;
mod error;
mod kv;

pub use backend::{Backend, FileBackend, MemoryBackend};
pub use error::KvError;
pub use kv::KvStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Backend, FileBackend, KvError, KvStore, MemoryBackend};
}
