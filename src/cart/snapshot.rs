//! Cart Snapshots
//!
//! The stored form of a cart is a JSON array of `{id, name, price, quantity}`
//! objects in cart order, with `price` as a JSON number.

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::{
    cart::{Cart, CartEntry},
    products::ProductId,
};

/// Errors decoding a stored cart.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The stored value is not a JSON array of cart entries.
    #[error("Malformed cart snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// An entry with a quantity of zero.
    #[error("Cart entry {0} has a quantity of zero")]
    ZeroQuantity(ProductId),

    /// An entry with a price below zero.
    #[error("Cart entry {0} has a negative price")]
    NegativePrice(ProductId),

    /// Two entries for the same product.
    #[error("Cart snapshot contains product {0} more than once")]
    DuplicateEntry(ProductId),
}

impl Cart {
    /// Serialize the cart to its stored JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Json`] if serialization fails.
    pub fn to_snapshot(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self.entries())?)
    }

    /// Rebuild a cart from its stored JSON form.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] if the JSON is malformed or any entry
    /// breaks a cart invariant (zero quantity, negative price, duplicate id).
    pub fn from_snapshot(snapshot: &str) -> Result<Self, SnapshotError> {
        let entries: Vec<CartEntry> = serde_json::from_str(snapshot)?;
        let mut seen = FxHashSet::default();

        for entry in &entries {
            if entry.quantity == 0 {
                return Err(SnapshotError::ZeroQuantity(entry.id));
            }

            if entry.price < Decimal::ZERO {
                return Err(SnapshotError::NegativePrice(entry.id));
            }

            if !seen.insert(entry.id) {
                return Err(SnapshotError::DuplicateEntry(entry.id));
            }
        }

        Ok(Self { entries })
    }
}
