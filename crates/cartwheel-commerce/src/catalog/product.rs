//! Product types.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Brand name.
    pub brand: String,
    /// Current unit price.
    pub price: Money,
    /// Pre-discount price, shown as a strikethrough when on sale.
    pub original_price: Option<Money>,
    /// Image URLs, first one is the listing image.
    pub images: Vec<String>,
    /// Declared sizes (e.g., "S", "M", "L").
    pub sizes: Vec<String>,
    /// Declared colors.
    pub colors: Vec<String>,
    /// Stock ceiling per cart line.
    pub max_quantity: i64,
    /// Whether the product is currently purchasable.
    pub in_stock: bool,
    /// Category slug for listings.
    pub category: String,
}

impl Product {
    /// Create a product with a single implicit size and color.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            brand: String::new(),
            price,
            original_price: None,
            images: Vec::new(),
            sizes: vec!["One Size".to_string()],
            colors: vec!["Default".to_string()],
            max_quantity: 10,
            in_stock: true,
            category: String::new(),
        }
    }

    /// Check if `size` is one of the declared sizes.
    pub fn has_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    /// Check if `color` is one of the declared colors.
    pub fn has_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }

    /// Check if this product is on sale (has a higher original price).
    pub fn is_on_sale(&self) -> bool {
        self.original_price
            .map(|op| op.amount_cents > self.price.amount_cents)
            .unwrap_or(false)
    }

    /// Savings per unit when on sale.
    pub fn savings(&self) -> Option<Money> {
        self.original_price
            .and_then(|op| op.try_subtract(&self.price))
            .filter(|m| m.is_positive())
    }

    /// First image URL, if any.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// A read-only product list with id lookup.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from a product list.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Look up a product by id.
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// All products, in listing order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Products in a given category.
    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Product> {
        self.products.iter().filter(move |p| p.category == category)
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
