//! Product catalog module.
//!
//! A static, read-only product list. The cart reads from it only at
//! add time to snapshot display fields and validate the selected
//! options and stock ceiling.

mod product;

pub use product::{Catalog, Product};
