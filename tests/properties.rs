//! Property tests for cart arithmetic and snapshots.

use proptest::prelude::*;
use rust_decimal::Decimal;

use trolley::{catalog::MAX_PRICE_CENTS, prelude::*};

fn demo_ids() -> impl Strategy<Value = Vec<u32>> {
    proptest::collection::vec(1_u32..=4, 0..40)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// Adding a product N times yields one entry with quantity N.
    #[test]
    fn repeated_adds_accumulate(id in 1_u32..=4, times in 1_u32..50) {
        let catalog = Catalog::demo();
        let mut manager = CartManager::new(&catalog, MemoryStore::new());

        for _ in 0..times {
            manager.add_item(ProductId::new(id));
        }

        prop_assert_eq!(manager.cart().len(), 1);
        prop_assert_eq!(
            manager.cart().get(ProductId::new(id)).map(|entry| entry.quantity),
            Some(times)
        );
    }

    /// The subtotal equals the sum of the prices of every added unit.
    #[test]
    fn subtotal_matches_added_prices(ids in demo_ids()) {
        let catalog = Catalog::demo();
        let mut manager = CartManager::new(&catalog, MemoryStore::new());
        let mut expected = Decimal::ZERO;

        for id in &ids {
            manager.add_item(ProductId::new(*id));

            if let Some(product) = catalog.get(ProductId::new(*id)) {
                expected += product.price;
            }
        }

        prop_assert_eq!(manager.subtotal(), expected);
        prop_assert_eq!(Some(manager.item_count()), u64::try_from(ids.len()).ok());
    }

    /// A positive quantity is stored exactly; anything else removes the entry.
    #[test]
    fn set_quantity_is_exact(quantity in -5_i64..100) {
        let catalog = Catalog::demo();
        let mut manager = CartManager::new(&catalog, MemoryStore::new());

        manager.add_item(ProductId::new(2));
        manager.update_quantity(ProductId::new(2), quantity);

        let stored = manager.cart().get(ProductId::new(2)).map(|entry| i64::from(entry.quantity));

        if quantity > 0 {
            prop_assert_eq!(stored, Some(quantity));
        } else {
            prop_assert_eq!(stored, None);
        }
    }

    /// A persisted cart restores with the same entries in the same order.
    #[test]
    fn snapshot_restores_same_cart(ids in demo_ids()) {
        let catalog = Catalog::demo();
        let mut manager = CartManager::new(&catalog, MemoryStore::new());

        for id in &ids {
            manager.add_item(ProductId::new(*id));
        }

        let original = manager.cart().clone();
        let restored = CartManager::open(&catalog, manager.into_store());

        prop_assert_eq!(restored.cart(), &original);
    }

    /// Any price the catalog accepts is restored exactly from storage.
    #[test]
    fn accepted_prices_restore_exactly(
        cents in 0..=MAX_PRICE_CENTS,
        quantity in 1_i64..=i64::from(u32::MAX)
    ) {
        let price = Decimal::new(cents, 2);
        let catalog = Catalog::with_products([Product::new(1, "Anything", price)])
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        let mut manager = CartManager::new(&catalog, MemoryStore::new());

        manager.add_item(ProductId::new(1));
        manager.update_quantity(ProductId::new(1), quantity);

        let original = manager.cart().clone();
        let restored = CartManager::open(&catalog, manager.into_store());

        prop_assert_eq!(restored.cart(), &original);
        prop_assert_eq!(restored.subtotal(), price * Decimal::from(quantity));
    }
}
