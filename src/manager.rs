//! Cart Manager
//!
//! Owns a [`Cart`], applies user intents to it, and keeps durable storage
//! and the analytics sink in step with every change.
//!
//! Operations never fail from the caller's point of view: an unknown product
//! is ignored, an empty checkout is reported as [`CheckoutOutcome::EmptyCart`],
//! and storage problems are logged and otherwise absorbed.

use std::fmt;

use jiff::Timestamp;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::{
    analytics::{AddToCartEvent, AnalyticsEvent, AnalyticsSink, PurchaseEvent, TransactionId},
    cart::{Cart, CartEntry, QuantityChange, SnapshotError},
    catalog::Catalog,
    products::ProductId,
    receipt::Receipt,
    storage::{KeyValueStore, StorageError},
};

/// Storage slot holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "shoppingCart";

/// What [`CartManager::restore`] found in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// Nothing was stored; the cart is empty.
    Missing,

    /// A stored cart with this many entries was loaded.
    Restored(usize),

    /// The stored value could not be used and was discarded; the cart is empty.
    Discarded,
}

/// Result of [`CartManager::checkout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// The cart was empty; nothing happened.
    EmptyCart,

    /// The purchase was reported and the cart cleared.
    Completed(Receipt),
}

/// Cart Manager
pub struct CartManager<'c, S> {
    catalog: &'c Catalog,
    cart: Cart,
    store: S,
    analytics: Option<Box<dyn AnalyticsSink + 'c>>,
}

impl<S: fmt::Debug> fmt::Debug for CartManager<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartManager")
            .field("catalog", &self.catalog)
            .field("cart", &self.cart)
            .field("store", &self.store)
            .field("analytics", &self.analytics.is_some())
            .finish()
    }
}

impl<'c, S: KeyValueStore> CartManager<'c, S> {
    /// Create a manager with an empty cart, without reading storage.
    pub fn new(catalog: &'c Catalog, store: S) -> Self {
        Self {
            catalog,
            cart: Cart::new(),
            store,
            analytics: None,
        }
    }

    /// Create a manager and restore the cart from storage.
    pub fn open(catalog: &'c Catalog, store: S) -> Self {
        let mut manager = Self::new(catalog, store);
        manager.restore();

        manager
    }

    /// Report events to `sink`.
    #[must_use]
    pub fn with_analytics(mut self, sink: impl AnalyticsSink + 'c) -> Self {
        self.analytics = Some(Box::new(sink));
        self
    }

    /// Replace the in-memory cart with the stored one.
    ///
    /// Malformed or invalid stored data is discarded and the cart starts empty.
    pub fn restore(&mut self) -> RestoreOutcome {
        let stored = match self.store.get(CART_STORAGE_KEY) {
            Ok(stored) => stored,
            Err(err) => {
                warn!(%err, "could not read stored cart; starting empty");
                self.cart = Cart::new();

                return RestoreOutcome::Discarded;
            }
        };

        let Some(snapshot) = stored else {
            self.cart = Cart::new();

            return RestoreOutcome::Missing;
        };

        match Cart::from_snapshot(&snapshot) {
            Ok(cart) => {
                debug!(entries = cart.len(), "restored cart");
                self.cart = cart;

                RestoreOutcome::Restored(self.cart.len())
            }
            Err(err) => {
                warn!(%err, "discarding unreadable stored cart");
                self.cart = Cart::new();

                RestoreOutcome::Discarded
            }
        }
    }

    /// Write the current cart to storage.
    ///
    /// Best effort: failures are logged, not returned.
    pub fn persist(&mut self) {
        if let Err(err) = self.try_persist() {
            warn!(%err, "could not persist cart");
        }
    }

    fn try_persist(&mut self) -> Result<(), PersistError> {
        let snapshot = self.cart.to_snapshot()?;
        self.store.set(CART_STORAGE_KEY, &snapshot)?;

        Ok(())
    }

    /// Add one unit of a catalog product.
    ///
    /// Returns the updated entry, or `None` if the product is not in the
    /// catalog (in which case nothing changes). An entry already holding
    /// `u32::MAX` units is returned as is, without persisting or reporting.
    pub fn add_item(&mut self, id: ProductId) -> Option<&CartEntry> {
        let catalog = self.catalog;

        let Some(product) = catalog.get(id) else {
            debug!(%id, "ignoring unknown product");

            return None;
        };

        let Some(quantity) = self.cart.add(product) else {
            debug!(%id, "quantity already at its maximum; nothing added");

            return self.cart.get(id);
        };

        debug!(%id, quantity, "added item");

        self.persist();
        self.report(AnalyticsEvent::AddToCart(AddToCartEvent::for_product(
            product,
        )));

        self.cart.get(id)
    }

    /// Set the quantity of a product already in the cart.
    ///
    /// Zero or negative quantities remove the entry. Missing products are
    /// left alone and nothing is persisted.
    pub fn update_quantity(&mut self, id: ProductId, quantity: i64) -> QuantityChange {
        let change = self.cart.set_quantity(id, quantity);

        match change {
            QuantityChange::Missing => debug!(%id, "ignoring quantity change for product not in cart"),
            QuantityChange::Updated(quantity) => debug!(%id, quantity, "updated quantity"),
            QuantityChange::Removed => debug!(%id, "removed item"),
        }

        if change != QuantityChange::Missing {
            self.persist();
        }

        change
    }

    /// Remove a product from the cart.
    pub fn remove_item(&mut self, id: ProductId) -> QuantityChange {
        self.update_quantity(id, 0)
    }

    /// Sum of price multiplied by quantity over the cart.
    pub fn subtotal(&self) -> Decimal {
        self.cart.subtotal()
    }

    /// Total units in the cart.
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// Simulate a checkout at the current time.
    pub fn checkout(&mut self) -> CheckoutOutcome {
        self.checkout_at(Timestamp::now())
    }

    /// Simulate a checkout, deriving the transaction id from `timestamp`.
    ///
    /// An empty cart is left untouched. Otherwise the purchase is reported,
    /// the cart is cleared and the empty cart is persisted.
    pub fn checkout_at(&mut self, timestamp: Timestamp) -> CheckoutOutcome {
        if self.cart.is_empty() {
            debug!("checkout requested with an empty cart");

            return CheckoutOutcome::EmptyCart;
        }

        let subtotal = self.cart.subtotal();
        let transaction_id = TransactionId::from_timestamp(timestamp);

        self.report(AnalyticsEvent::Purchase(PurchaseEvent::new(
            transaction_id.clone(),
            self.cart.entries(),
            subtotal,
        )));

        let entries = self.cart.take();
        self.persist();

        info!(%transaction_id, %subtotal, lines = entries.len(), "checkout completed");

        CheckoutOutcome::Completed(Receipt::new(transaction_id, entries, subtotal))
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The catalog products are looked up in.
    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the manager, returning the backing store.
    pub fn into_store(self) -> S {
        self.store
    }

    fn report(&mut self, event: AnalyticsEvent) {
        if let Some(sink) = self.analytics.as_mut() {
            sink.record(&event);
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum PersistError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
