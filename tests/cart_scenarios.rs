//! End-to-end cart scenarios against the demo catalog.
//!
//! Demo catalog prices: laptop $1,200.00, headphones $150.00, mouse $45.00,
//! monitor $450.00.

use jiff::Timestamp;
use rust_decimal::Decimal;
use testresult::TestResult;

use trolley::prelude::*;

#[test]
fn adding_laptop_twice_and_headphones_once() -> TestResult {
    let catalog = Catalog::demo();
    let mut manager = CartManager::new(&catalog, MemoryStore::new());

    manager.add_item(ProductId::new(1));
    manager.add_item(ProductId::new(1));
    manager.add_item(ProductId::new(2));

    let cart = manager.cart();

    assert_eq!(cart.len(), 2);
    assert_eq!(cart.get(ProductId::new(1)).map(|entry| entry.quantity), Some(2));
    assert_eq!(cart.get(ProductId::new(2)).map(|entry| entry.quantity), Some(1));
    assert_eq!(manager.subtotal(), Decimal::new(2_550, 0));
    assert_eq!(manager.item_count(), 3);
    assert_eq!(format_price(manager.subtotal()), "$2,550.00");

    Ok(())
}

#[test]
fn zero_quantity_removes_entry() -> TestResult {
    let catalog = Catalog::demo();
    let mut manager = CartManager::new(&catalog, MemoryStore::new());

    manager.add_item(ProductId::new(3));

    assert_eq!(
        manager.update_quantity(ProductId::new(3), 0),
        QuantityChange::Removed
    );
    assert!(manager.cart().is_empty());
    assert_eq!(manager.subtotal(), Decimal::ZERO);

    let stored = manager.store().get(CART_STORAGE_KEY)?;

    assert_eq!(stored.as_deref(), Some("[]"));

    Ok(())
}

#[test]
fn checkout_reports_purchase_and_clears_cart() -> TestResult {
    let catalog = Catalog::demo();
    let mut events = RecordingSink::new();

    let outcome = {
        let mut manager =
            CartManager::new(&catalog, MemoryStore::new()).with_analytics(&mut events);

        manager.add_item(ProductId::new(4));

        let outcome = manager.checkout_at(Timestamp::from_millisecond(1_700_000_000_000)?);

        assert!(manager.cart().is_empty());
        assert_eq!(manager.store().get(CART_STORAGE_KEY)?.as_deref(), Some("[]"));

        outcome
    };

    let CheckoutOutcome::Completed(receipt) = outcome else {
        return Err("expected a completed checkout".into());
    };

    assert_eq!(receipt.subtotal(), Decimal::new(450, 0));
    assert_eq!(receipt.transaction_id().as_str(), "T-1700000000000");

    let [AnalyticsEvent::AddToCart(_), AnalyticsEvent::Purchase(purchase)] = events.events() else {
        return Err(format!("unexpected events: {:?}", events.events()).into());
    };

    assert_eq!(purchase.value, Decimal::new(450, 0));
    assert_eq!(purchase.currency, "USD");
    assert_eq!(purchase.tax, Decimal::ZERO);
    assert_eq!(purchase.shipping, Decimal::ZERO);
    assert_eq!(purchase.items.len(), 1);

    Ok(())
}

#[test]
fn empty_checkout_changes_nothing() -> TestResult {
    let catalog = Catalog::demo();
    let mut events = RecordingSink::new();

    {
        let mut manager =
            CartManager::new(&catalog, MemoryStore::new()).with_analytics(&mut events);

        assert!(matches!(manager.checkout(), CheckoutOutcome::EmptyCart));
        assert!(manager.cart().is_empty());
        assert_eq!(manager.store().get(CART_STORAGE_KEY)?, None);
    }

    assert!(events.events().is_empty());

    Ok(())
}

#[test]
fn unknown_products_are_ignored() -> TestResult {
    let catalog = Catalog::demo();
    let mut manager = CartManager::new(&catalog, MemoryStore::new());

    assert!(manager.add_item(ProductId::new(99)).is_none());
    assert_eq!(
        manager.update_quantity(ProductId::new(2), 5),
        QuantityChange::Missing
    );
    assert!(manager.cart().is_empty());
    assert_eq!(manager.store().get(CART_STORAGE_KEY)?, None);

    Ok(())
}

#[test]
fn loaded_catalog_drives_the_cart() -> TestResult {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/catalogs/office.yml");
    let catalog = Catalog::load(path)?;
    let mut manager = CartManager::new(&catalog, MemoryStore::new());

    manager.add_item(ProductId::new(5));
    manager.add_item(ProductId::new(5));
    manager.add_item(ProductId::new(3));

    assert_eq!(catalog.len(), 5);
    assert_eq!(manager.subtotal(), Decimal::new(22_498, 2));
    assert_eq!(format_price(manager.subtotal()), "$224.98");

    Ok(())
}
