//! Cart
//!
//! An ordered collection of [`CartEntry`] values, unique by product id.
//! Entries keep first-added order; quantities are always at least one.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::products::{Product, ProductId};

pub mod snapshot;

pub use snapshot::SnapshotError;

/// A product line in the cart.
///
/// Name and price are copied from the catalog when the entry is created, so
/// an entry stays meaningful even if the catalog changes between sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    /// Product id
    pub id: ProductId,

    /// Product name at the time it was added
    pub name: String,

    /// Unit price at the time it was added
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Units in the cart, never zero
    pub quantity: u32,
}

impl CartEntry {
    /// Create a single-unit entry for a product.
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            quantity: 1,
        }
    }

    /// Price multiplied by quantity, saturating at [`Decimal::MAX`].
    pub fn line_total(&self) -> Decimal {
        self.price
            .checked_mul(Decimal::from(self.quantity))
            .unwrap_or(Decimal::MAX)
    }
}

/// Result of setting a quantity on the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// No entry exists for the product.
    Missing,

    /// The entry now holds exactly this many units.
    Updated(u32),

    /// The entry was removed.
    Removed,
}

/// Cart
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a product, returning its new quantity.
    ///
    /// Returns `None` and leaves the cart unchanged if the entry already
    /// holds `u32::MAX` units.
    pub fn add(&mut self, product: &Product) -> Option<u32> {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.id == product.id) {
            entry.quantity = entry.quantity.checked_add(1)?;

            return Some(entry.quantity);
        }

        self.entries.push(CartEntry::from_product(product));

        Some(1)
    }

    /// Set the quantity for a product already in the cart.
    ///
    /// Positive quantities replace the current one; zero or negative
    /// quantities remove the entry.
    pub fn set_quantity(&mut self, id: ProductId, quantity: i64) -> QuantityChange {
        let Some(position) = self.position(id) else {
            return QuantityChange::Missing;
        };

        if quantity <= 0 {
            self.entries.remove(position);

            return QuantityChange::Removed;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        if let Some(entry) = self.entries.get_mut(position) {
            entry.quantity = quantity;
        }

        QuantityChange::Updated(quantity)
    }

    /// Sum of price multiplied by quantity over all entries.
    ///
    /// No rounding is applied. Saturates at [`Decimal::MAX`].
    pub fn subtotal(&self) -> Decimal {
        self.entries
            .iter()
            .map(CartEntry::line_total)
            .fold(Decimal::ZERO, |total, line| {
                total.checked_add(line).unwrap_or(Decimal::MAX)
            })
    }

    /// Total number of units across all entries.
    pub fn item_count(&self) -> u64 {
        self.entries
            .iter()
            .map(|entry| u64::from(entry.quantity))
            .sum()
    }

    /// Find the entry for a product.
    pub fn get(&self, id: ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Entries in first-added order.
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Iterate over the entries in the cart.
    pub fn iter(&self) -> impl Iterator<Item = &CartEntry> {
        self.entries.iter()
    }

    /// Number of distinct products in the cart.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry, returning what the cart held.
    pub fn take(&mut self) -> Vec<CartEntry> {
        std::mem::take(&mut self.entries)
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }
}
