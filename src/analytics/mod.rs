//! Analytics
//!
//! Events reported to an optional [`AnalyticsSink`] when units are added to
//! the cart and when a checkout completes. Field names follow the
//! e-commerce event schema used by common web analytics tags.

use std::fmt;

use jiff::Timestamp;
use rust_decimal::Decimal;
use rusty_money::iso::USD;
use serde::Serialize;
use smallvec::{SmallVec, smallvec};

use crate::{cart::CartEntry, products::Product};

mod sinks;

pub use sinks::{JsonLinesSink, RecordingSink, TracingSink};

/// Receiver for analytics events.
///
/// Recording an event cannot fail from the cart's point of view; sinks that
/// talk to fallible outputs handle their own errors.
pub trait AnalyticsSink {
    /// Called once per event, in the order events occur.
    fn record(&mut self, event: &AnalyticsEvent);
}

impl<S: AnalyticsSink + ?Sized> AnalyticsSink for &mut S {
    fn record(&mut self, event: &AnalyticsEvent) {
        (**self).record(event);
    }
}

/// Best-effort checkout identifier, `T-` followed by unix milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Derive an id from a point in time.
    pub fn from_timestamp(timestamp: Timestamp) -> Self {
        Self(format!("T-{}", timestamp.as_millisecond()))
    }

    /// The id as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A product line within an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventItem {
    /// Product id rendered as a string
    pub item_id: String,

    /// Product name
    pub item_name: String,

    /// Unit price
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Units
    pub quantity: u32,
}

impl From<&CartEntry> for EventItem {
    fn from(entry: &CartEntry) -> Self {
        Self {
            item_id: entry.id.to_string(),
            item_name: entry.name.clone(),
            price: entry.price,
            quantity: entry.quantity,
        }
    }
}

/// One unit of a product was added to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddToCartEvent {
    /// ISO currency code
    pub currency: &'static str,

    /// Unit price of the added product
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,

    /// The single added item, with a quantity of one
    pub items: SmallVec<[EventItem; 1]>,
}

impl AddToCartEvent {
    /// Build the event for adding one unit of `product`.
    pub fn for_product(product: &Product) -> Self {
        Self {
            currency: USD.iso_alpha_code,
            value: product.price,
            items: smallvec![EventItem {
                item_id: product.id.to_string(),
                item_name: product.name.clone(),
                price: product.price,
                quantity: 1,
            }],
        }
    }
}

/// A simulated checkout completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseEvent {
    /// Synthesized transaction id
    pub transaction_id: TransactionId,

    /// Cart subtotal
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,

    /// ISO currency code
    pub currency: &'static str,

    /// Always zero
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,

    /// Always zero
    #[serde(with = "rust_decimal::serde::float")]
    pub shipping: Decimal,

    /// Cart contents at checkout time
    pub items: Vec<EventItem>,
}

impl PurchaseEvent {
    /// Build the event for checking out `entries`.
    pub fn new(transaction_id: TransactionId, entries: &[CartEntry], subtotal: Decimal) -> Self {
        Self {
            transaction_id,
            value: subtotal,
            currency: USD.iso_alpha_code,
            tax: Decimal::ZERO,
            shipping: Decimal::ZERO,
            items: entries.iter().map(EventItem::from).collect(),
        }
    }
}

/// Analytics event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AnalyticsEvent {
    /// See [`AddToCartEvent`]
    AddToCart(AddToCartEvent),

    /// See [`PurchaseEvent`]
    Purchase(PurchaseEvent),
}

impl AnalyticsEvent {
    /// Event name as reported to analytics.
    pub fn name(&self) -> &'static str {
        match self {
            AnalyticsEvent::AddToCart(_) => "add_to_cart",
            AnalyticsEvent::Purchase(_) => "purchase",
        }
    }
}
