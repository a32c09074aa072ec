//! Trolley prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    analytics::{
        AddToCartEvent, AnalyticsEvent, AnalyticsSink, EventItem, JsonLinesSink, PurchaseEvent,
        RecordingSink, TracingSink, TransactionId,
    },
    cart::{Cart, CartEntry, QuantityChange, SnapshotError},
    catalog::{Catalog, CatalogError},
    manager::{CART_STORAGE_KEY, CartManager, CheckoutOutcome, RestoreOutcome},
    presentation::{View, format_price},
    products::{Product, ProductId},
    receipt::Receipt,
    session::{Command, Session},
    storage::{FileStore, KeyValueStore, MemoryStore, StorageError},
};
