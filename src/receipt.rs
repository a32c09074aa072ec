//! Receipt

use std::io;

use rust_decimal::Decimal;

use crate::{
    analytics::TransactionId,
    cart::CartEntry,
    presentation::{format_price, line_items_table},
};

/// Record of a completed checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// Transaction id reported with the purchase event
    transaction_id: TransactionId,

    /// Cart contents at checkout time
    items: Vec<CartEntry>,

    /// Sum of line totals, unrounded
    subtotal: Decimal,
}

impl Receipt {
    /// Create a new receipt with the given details.
    pub fn new(transaction_id: TransactionId, items: Vec<CartEntry>, subtotal: Decimal) -> Self {
        Self {
            transaction_id,
            items,
            subtotal,
        }
    }

    /// Transaction id reported with the purchase event
    pub fn transaction_id(&self) -> &TransactionId {
        &self.transaction_id
    }

    /// Purchased lines, in cart order
    pub fn items(&self) -> &[CartEntry] {
        &self.items
    }

    /// Total cost of the purchase
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    /// Total units purchased
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Prints the receipt.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_to(&self, mut out: impl io::Write) -> io::Result<()> {
        writeln!(out, "Transaction {}", self.transaction_id)?;
        writeln!(out, "{}", line_items_table(&self.items))?;
        writeln!(
            out,
            " Items: {}  \x1b[1mTotal: {}\x1b[0m",
            self.item_count(),
            format_price(self.subtotal)
        )
    }
}
