//! Session
//!
//! A line-driven front end: each input line is one user intent, handled to
//! completion before the next line is read.

use std::{
    io::{self, BufRead},
    str::FromStr,
};

use thiserror::Error;
use tracing::debug;

use crate::{
    cart::QuantityChange,
    manager::{CartManager, CheckoutOutcome},
    presentation::{View, format_price, write_cart, write_catalog, write_checkout_notice},
    products::ProductId,
    storage::KeyValueStore,
};

const HELP: &str = "\
Commands:
  products          list the catalog
  add <id>          add one unit of a product
  qty <id> <n>      set a quantity (0 or less removes the item)
  remove <id>       remove a product from the cart
  cart              toggle between the cart and the catalog
  checkout          check out the cart
  help              show this message
  quit              leave the session";

/// Errors parsing a session command.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseCommandError {
    /// The line held no command.
    #[error("empty command")]
    Empty,

    /// The command word is not recognised.
    #[error("unknown command {0:?}, try `help`")]
    Unknown(String),

    /// A required argument is missing.
    #[error("`{command}` needs a {argument}")]
    MissingArgument {
        /// Command word
        command: &'static str,

        /// Missing argument name
        argument: &'static str,
    },

    /// More arguments than the command takes.
    #[error("unexpected argument {0:?}")]
    UnexpectedArgument(String),

    /// A product id that is not a non-negative integer.
    #[error("invalid product id {0:?}")]
    InvalidProductId(String),

    /// A quantity that is not an integer.
    #[error("invalid quantity {0:?}")]
    InvalidQuantity(String),
}

/// A user intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// List the catalog.
    Products,

    /// Add one unit of a product.
    Add(ProductId),

    /// Set the quantity of a product in the cart.
    Quantity(ProductId, i64),

    /// Remove a product from the cart.
    Remove(ProductId),

    /// Toggle the cart view.
    ToggleCart,

    /// Check out.
    Checkout,

    /// Show usage.
    Help,

    /// End the session.
    Quit,
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();

        let word = words.next().ok_or(ParseCommandError::Empty)?;

        let command = match word.to_ascii_lowercase().as_str() {
            "products" | "list" => Command::Products,
            "add" => Command::Add(product_id(words.next(), "add")?),
            "qty" | "quantity" | "update" => {
                let id = product_id(words.next(), "qty")?;
                let quantity = words.next().ok_or(ParseCommandError::MissingArgument {
                    command: "qty",
                    argument: "quantity",
                })?;
                let quantity = quantity
                    .parse()
                    .map_err(|_err| ParseCommandError::InvalidQuantity(quantity.to_string()))?;

                Command::Quantity(id, quantity)
            }
            "remove" | "rm" => Command::Remove(product_id(words.next(), "remove")?),
            "cart" => Command::ToggleCart,
            "checkout" => Command::Checkout,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(ParseCommandError::Unknown(word.to_string())),
        };

        if let Some(extra) = words.next() {
            return Err(ParseCommandError::UnexpectedArgument(extra.to_string()));
        }

        Ok(command)
    }
}

fn product_id(word: Option<&str>, command: &'static str) -> Result<ProductId, ParseCommandError> {
    let word = word.ok_or(ParseCommandError::MissingArgument {
        command,
        argument: "product id",
    })?;

    word.parse()
        .map_err(|_err| ParseCommandError::InvalidProductId(word.to_string()))
}

/// Whether the session should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next command.
    Continue,

    /// Stop.
    Quit,
}

/// Interactive session over a [`CartManager`].
#[derive(Debug)]
pub struct Session<'c, S> {
    manager: CartManager<'c, S>,
    view: View,
}

impl<'c, S: KeyValueStore> Session<'c, S> {
    /// Start a session showing the catalog.
    pub fn new(manager: CartManager<'c, S>) -> Self {
        Self {
            manager,
            view: View::Catalog,
        }
    }

    /// Currently visible view.
    pub fn view(&self) -> View {
        self.view
    }

    /// The underlying manager.
    pub fn manager(&self) -> &CartManager<'c, S> {
        &self.manager
    }

    /// End the session, returning the manager.
    pub fn into_manager(self) -> CartManager<'c, S> {
        self.manager
    }

    /// Read commands from `input` until it ends or `quit` is entered.
    ///
    /// Unparseable lines are reported to `out` and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub fn run(&mut self, input: impl BufRead, mut out: impl io::Write) -> io::Result<()> {
        write_catalog(&mut out, self.manager.catalog())?;
        self.write_badge(&mut out)?;

        for line in input.lines() {
            let line = line?;

            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<Command>() {
                Ok(command) => {
                    if self.handle(command, &mut out)? == Flow::Quit {
                        break;
                    }
                }
                Err(err) => writeln!(out, "error: {err}")?,
            }
        }

        Ok(())
    }

    /// Apply one command and render its result.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn handle(&mut self, command: Command, mut out: impl io::Write) -> io::Result<Flow> {
        debug!(?command, view = ?self.view, "handling command");

        match command {
            Command::Products => write_catalog(&mut out, self.manager.catalog())?,
            Command::Add(id) => {
                match self.manager.add_item(id) {
                    Some(entry) => writeln!(out, "Added {} (x{})", entry.name, entry.quantity)?,
                    None => writeln!(out, "No product with id {id}")?,
                }

                self.refresh(&mut out)?;
            }
            Command::Quantity(id, quantity) => {
                let change = self.manager.update_quantity(id, quantity);
                write_change(&mut out, id, change)?;
                self.refresh(&mut out)?;
            }
            Command::Remove(id) => {
                let change = self.manager.remove_item(id);
                write_change(&mut out, id, change)?;
                self.refresh(&mut out)?;
            }
            Command::ToggleCart => {
                self.view = self.view.toggle();
                self.render_view(&mut out)?;
            }
            Command::Checkout => {
                let outcome = self.manager.checkout();
                write_checkout_notice(&mut out, &outcome)?;

                if let CheckoutOutcome::Completed(receipt) = &outcome {
                    receipt.write_to(&mut out)?;
                    self.view = View::Catalog;
                    self.render_view(&mut out)?;
                }
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn refresh(&self, out: &mut impl io::Write) -> io::Result<()> {
        match self.view {
            View::Cart => write_cart(out, self.manager.cart()),
            View::Catalog => self.write_badge(out),
        }
    }

    fn render_view(&self, out: &mut impl io::Write) -> io::Result<()> {
        match self.view {
            View::Cart => write_cart(out, self.manager.cart()),
            View::Catalog => {
                write_catalog(&mut *out, self.manager.catalog())?;
                self.write_badge(out)
            }
        }
    }

    fn write_badge(&self, out: &mut impl io::Write) -> io::Result<()> {
        writeln!(
            out,
            "Cart: {} items, {}",
            self.manager.item_count(),
            format_price(self.manager.subtotal())
        )
    }
}

fn write_change(out: &mut impl io::Write, id: ProductId, change: QuantityChange) -> io::Result<()> {
    match change {
        QuantityChange::Missing => writeln!(out, "Product {id} is not in the cart"),
        QuantityChange::Updated(quantity) => writeln!(out, "Product {id} quantity set to {quantity}"),
        QuantityChange::Removed => writeln!(out, "Removed product {id}"),
    }
}
