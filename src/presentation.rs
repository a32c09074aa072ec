//! Presentation
//!
//! Terminal rendering for the catalog, the cart and checkout notices.

use std::{fmt::Write, io};

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso::USD};
use tabled::{
    Table,
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};

use crate::{
    cart::{Cart, CartEntry},
    catalog::Catalog,
    manager::CheckoutOutcome,
};

/// Which list is on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    /// Product list with add controls
    #[default]
    Catalog,

    /// Cart contents with quantity controls
    Cart,
}

impl View {
    /// Switch to the other view.
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            View::Catalog => View::Cart,
            View::Cart => View::Catalog,
        }
    }
}

/// Format an amount as USD with two decimal places.
pub fn format_price(amount: Decimal) -> String {
    let mut amount = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    amount.rescale(2);

    Money::from_decimal(amount, USD).to_string()
}

/// Render the catalog as a table.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_catalog(mut out: impl io::Write, catalog: &Catalog) -> io::Result<()> {
    let mut builder = Builder::default();

    builder.push_record(["#", "Product", "Price"]);

    for product in catalog.iter() {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            format_price(product.price),
        ]);
    }

    writeln!(out, "{}", styled(builder.build(), 2))
}

/// Render the cart as a table followed by item count and subtotal.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_cart(mut out: impl io::Write, cart: &Cart) -> io::Result<()> {
    if cart.is_empty() {
        writeln!(out, "Your cart is empty.")?;
    } else {
        writeln!(out, "{}", line_items_table(cart.entries()))?;
    }

    writeln!(
        out,
        "Items: {}  Subtotal: {}",
        cart.item_count(),
        format_price(cart.subtotal())
    )
}

/// Render the user notice for a checkout attempt.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_checkout_notice(mut out: impl io::Write, outcome: &CheckoutOutcome) -> io::Result<()> {
    match outcome {
        CheckoutOutcome::EmptyCart => writeln!(out, "Your cart is empty!"),
        CheckoutOutcome::Completed(receipt) => writeln!(
            out,
            "Checkout initiated! Total amount: {}.",
            format_price(receipt.subtotal())
        ),
    }
}

/// Build the line item table shared by the cart and receipts.
pub(crate) fn line_items_table(entries: &[CartEntry]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["#", "Product", "Price", "Qty", "Line Total"]);

    for entry in entries {
        builder.push_record([
            entry.id.to_string(),
            entry.name.clone(),
            format_price(entry.price),
            entry.quantity.to_string(),
            format_price(entry.line_total()),
        ]);
    }

    styled(builder.build(), 2)
}

fn styled(mut table: Table, first_numeric_column: usize) -> String {
    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(first_numeric_column..), Alignment::right());

    colorize_borders(&table.to_string())
}

/// Wraps runs of box-drawing characters (U+2500..U+257F) in ANSI dark grey.
fn colorize_borders(table: &str) -> String {
    let mut out = String::with_capacity(table.len() + 256);
    let mut in_run = false;

    for ch in table.chars() {
        let box_char = ('\u{2500}'..='\u{257F}').contains(&ch);

        if box_char && !in_run {
            _ = out.write_str("\x1b[90m");
            in_run = true;
        } else if !box_char && in_run {
            _ = out.write_str("\x1b[0m");
            in_run = false;
        }

        out.push(ch);
    }

    if in_run {
        _ = out.write_str("\x1b[0m");
    }

    out
}
