//! Catalog
//!
//! The static, read-only list of products a cart can reference.

use std::{fs, path::Path};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::iso::USD;
use thiserror::Error;
use tracing::debug;

use crate::products::{Product, ProductId};

pub mod fixture;

/// Upper bound on a unit price, in cents.
///
/// Stored carts keep prices as JSON numbers; whole-cent amounts below 2^53
/// cents survive that encoding exactly.
pub const MAX_PRICE_CENTS: i64 = 1_000_000_000_000_000;

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading a catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Recognised currency that carts cannot hold
    #[error("Unsupported currency {0}, only USD prices are accepted")]
    UnsupportedCurrency(String),

    /// Price below zero
    #[error("Product {0} has a negative price")]
    NegativePrice(ProductId),

    /// Two products share an id
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(ProductId),
}

/// Catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: FxHashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog from products in display order.
    ///
    /// Prices are kept at two decimal places.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateProduct`] if two products share an id,
    /// [`CatalogError::NegativePrice`] for prices below zero and
    /// [`CatalogError::InvalidPrice`] for fractional cents or prices above
    /// [`MAX_PRICE_CENTS`].
    pub fn with_products(products: impl Into<Vec<Product>>) -> Result<Self, CatalogError> {
        let mut products = products.into();
        let mut index = FxHashMap::default();

        for (position, product) in products.iter_mut().enumerate() {
            check_price(product.id, product.price)?;
            product.price.rescale(USD.exponent);

            if index.insert(product.id, position).is_some() {
                return Err(CatalogError::DuplicateProduct(product.id));
            }
        }

        Ok(Self { products, index })
    }

    /// The demo storefront catalog.
    pub fn demo() -> Self {
        let products = vec![
            Product::new(1, "Premium Laptop", Decimal::new(120_000, 2)),
            Product::new(2, "Wireless Headphones", Decimal::new(15_000, 2)),
            Product::new(3, "Ergonomic Mouse", Decimal::new(4_500, 2)),
            Product::new(4, "4K Monitor", Decimal::new(45_000, 2)),
        ];

        let index = products
            .iter()
            .enumerate()
            .map(|(position, product)| (product.id, position))
            .collect();

        Self { products, index }
    }

    /// Parse a catalog from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or any product fails validation.
    pub fn from_yaml(contents: &str) -> Result<Self, CatalogError> {
        let fixture: fixture::CatalogFixture = serde_norway::from_str(contents)?;

        let products = fixture
            .products
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Self::with_products(products)
    }

    /// Load a catalog from a YAML fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let catalog = Self::from_yaml(&contents)?;

        debug!(path = %path.display(), products = catalog.len(), "loaded catalog");

        Ok(catalog)
    }

    /// Find a product by id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.index
            .get(&id)
            .and_then(|position| self.products.get(*position))
    }

    /// Iterate over products in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Check that `price` is a non-negative whole number of cents no larger than
/// [`MAX_PRICE_CENTS`].
///
/// # Errors
///
/// Returns [`CatalogError::NegativePrice`] or [`CatalogError::InvalidPrice`].
pub fn check_price(id: ProductId, price: Decimal) -> Result<(), CatalogError> {
    if price < Decimal::ZERO {
        return Err(CatalogError::NegativePrice(id));
    }

    let in_range = price
        .checked_mul(Decimal::ONE_HUNDRED)
        .filter(|cents| cents.fract().is_zero())
        .and_then(|cents| cents.to_i64())
        .is_some_and(|cents| cents <= MAX_PRICE_CENTS);

    if !in_range {
        return Err(CatalogError::InvalidPrice(format!(
            "product {id}: {price} is not a whole number of cents up to {MAX_PRICE_CENTS}"
        )));
    }

    Ok(())
}
