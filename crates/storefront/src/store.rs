//! Catalog & cart store: the single owner of storefront state.
//!
//! Every view reads and mutates catalog and cart through a [`Store`]. The
//! store applies the pure transitions from [`crate::catalog`] and
//! [`crate::cart`], then performs the effects: persisting the catalog through
//! a [`KeyValueStore`] and reporting through a [`Notifier`].
//!
//! There is no global instance. Whoever hosts a session constructs one with
//! [`Store::initialize`] and passes it down.

use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

use luxelane_core::{Price, Product, ProductId, Quantity};

use crate::cart::{AddOutcome, Cart, CartError, RemoveOutcome, UpdateOutcome};
use crate::catalog::{Catalog, CatalogError};
use crate::notify::{Notification, Notifier};
use crate::storage::{CATALOG_KEY, KeyValueStore, StorageError};

/// Errors returned by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The catalog rejected the change.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The cart rejected the change.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The catalog could not be persisted.
    #[error("failed to persist catalog: {0}")]
    Storage(#[from] StorageError),
}

/// Where the catalog came from when the store was initialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    /// Read from storage.
    Loaded,
    /// Storage was empty; the default catalog was seeded.
    Seeded,
    /// Storage held unreadable data; the default catalog replaced it.
    Recovered,
}

/// Owns the catalog, the cart, and the ports they depend on.
#[derive(Debug)]
pub struct Store<S, N> {
    catalog: Catalog,
    cart: Cart,
    source: CatalogSource,
    storage: S,
    notifier: N,
}

impl<S: KeyValueStore, N: Notifier> Store<S, N> {
    /// Load the catalog from `storage`, seeding and persisting the default
    /// catalog if nothing usable is stored. The cart starts empty.
    ///
    /// Calling this again on populated storage loads the same catalog and
    /// writes nothing.
    #[instrument(skip_all)]
    pub fn initialize(mut storage: S, mut notifier: N) -> Self {
        let (catalog, source) = match storage.get(CATALOG_KEY) {
            Ok(Some(json)) => match Catalog::decode(&json) {
                Ok((catalog, dropped)) => {
                    if !dropped.is_empty() {
                        warn!(?dropped, "Stored catalog has repeated ids; keeping the first of each");
                    }
                    (catalog, CatalogSource::Loaded)
                }
                Err(e) => {
                    warn!(error = %e, "Stored catalog is malformed; falling back to defaults");
                    (Catalog::defaults(), CatalogSource::Recovered)
                }
            },
            Ok(None) => (Catalog::defaults(), CatalogSource::Seeded),
            Err(e) => {
                warn!(error = %e, "Stored catalog is unreadable; falling back to defaults");
                (Catalog::defaults(), CatalogSource::Recovered)
            }
        };

        if source != CatalogSource::Loaded {
            if let Err(e) = persist(&mut storage, &catalog) {
                error!(error = %e, "Failed to persist default catalog");
                notifier.notify(Notification::error("Could not save the product catalog"));
            }
        }

        info!(products = catalog.len(), ?source, "Store initialized");

        Self {
            catalog,
            cart: Cart::new(),
            source,
            storage,
            notifier,
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// All catalog products in insertion order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        self.catalog.products()
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Look up a catalog product by id.
    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.catalog.get(id)
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Sum of `price × quantity` over the cart.
    #[must_use]
    pub fn cart_total(&self) -> Price {
        self.cart.total()
    }

    /// Sum of quantities over the cart.
    #[must_use]
    pub fn cart_count(&self) -> u64 {
        self.cart.count()
    }

    /// How the catalog was obtained at initialization.
    #[must_use]
    pub const fn catalog_source(&self) -> CatalogSource {
        self.source
    }

    /// An unused id for a new product.
    #[must_use]
    pub fn next_product_id(&self) -> ProductId {
        self.catalog.next_id()
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    pub const fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Tear the store down, keeping its storage (e.g. to re-initialize).
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    // =========================================================================
    // Cart operations
    // =========================================================================

    /// Add `requested` units of `product` to the cart.
    ///
    /// Requests below 1 are treated as 1. An existing line for the same
    /// product id has its quantity increased.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Cart`] if `requested` or the merged quantity
    /// does not fit in a `u32`; the cart is unchanged.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_to_cart(&mut self, product: Product, requested: i64) -> Result<AddOutcome, StoreError> {
        let name = product.name.clone();

        let added = match Quantity::at_least_one(requested) {
            Some(quantity) => self.cart.add(product, quantity),
            None => Err(CartError::QuantityOverflow(product.id)),
        };

        match added {
            Ok(outcome) => {
                let message = match outcome {
                    AddOutcome::Merged(_) => format!("Updated quantity for {name}"),
                    AddOutcome::Added => format!("Added {name} to cart"),
                };
                debug!(?outcome, count = self.cart.count(), "Cart updated");
                self.notifier.notify(Notification::success(message));
                Ok(outcome)
            }
            Err(e) => {
                self.notifier.notify(Notification::error(format!(
                    "Could not add {name}: quantity too large"
                )));
                Err(e.into())
            }
        }
    }

    /// Remove the line for `id`. Absent ids are a silent no-op.
    #[instrument(skip(self))]
    pub fn remove_from_cart(&mut self, id: &ProductId) -> RemoveOutcome {
        let outcome = self.cart.remove(id);
        if let RemoveOutcome::Removed(line) = &outcome {
            self.notifier.notify(Notification::info(format!(
                "Removed {} from cart",
                line.product.name
            )));
        }
        outcome
    }

    /// Set the quantity of the line for `id` to exactly `requested`.
    ///
    /// Zero or negative requests behave exactly like
    /// [`Store::remove_from_cart`]. Absent ids are a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Cart`] if `requested` exceeds `u32::MAX`.
    #[instrument(skip(self))]
    pub fn update_quantity(
        &mut self,
        id: &ProductId,
        requested: i64,
    ) -> Result<UpdateOutcome, StoreError> {
        if requested <= 0 {
            return Ok(match self.remove_from_cart(id) {
                RemoveOutcome::Removed(line) => UpdateOutcome::Removed(line),
                RemoveOutcome::NotInCart => UpdateOutcome::NotInCart,
            });
        }

        self.cart.set_quantity(id, requested).map_err(|e| {
            self.notifier
                .notify(Notification::error("Could not update quantity: too large"));
            e.into()
        })
    }

    /// Empty the cart. Safe to call on an empty cart.
    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.notifier.notify(Notification::info("Cart cleared"));
    }

    // =========================================================================
    // Catalog operations
    // =========================================================================

    /// Append `product` to the catalog and persist the whole catalog.
    ///
    /// The in-memory catalog only changes once the write has succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Catalog`] for a duplicate id and
    /// [`StoreError::Storage`] if persisting fails.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_product(&mut self, product: Product) -> Result<(), StoreError> {
        let name = product.name.clone();

        let next = match self.catalog.with_product(product) {
            Ok(next) => next,
            Err(e) => {
                self.notifier.notify(Notification::error(e.to_string()));
                return Err(e.into());
            }
        };

        if let Err(e) = persist(&mut self.storage, &next) {
            error!(error = %e, "Failed to persist catalog");
            self.notifier
                .notify(Notification::error("Failed to add product"));
            return Err(e.into());
        }

        self.catalog = next;
        info!(products = self.catalog.len(), "Product added");
        self.notifier
            .notify(Notification::success(format!("Added new product: {name}")));
        Ok(())
    }
}

fn persist<S: KeyValueStore>(storage: &mut S, catalog: &Catalog) -> Result<(), StorageError> {
    let json = catalog
        .encode()
        .map_err(|source| StorageError::Serialization {
            key: CATALOG_KEY.to_owned(),
            source,
        })?;
    storage.set(CATALOG_KEY, &json)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::notify::{NotificationLevel, NotificationQueue};
    use crate::storage::MemoryStore;

    type TestStore = Store<MemoryStore, NotificationQueue>;

    fn fresh() -> TestStore {
        let mut store = Store::initialize(MemoryStore::new(), NotificationQueue::new());
        store.notifier_mut().drain();
        store
    }

    fn catalog_product(store: &TestStore, id: u64) -> Product {
        store.product(&ProductId::from_number(id)).unwrap().clone()
    }

    fn new_product(id: &str) -> Product {
        Product {
            id: ProductId::parse(id).unwrap(),
            name: "Travel Adapter".to_string(),
            description: "Universal travel adapter with USB-C.".to_string(),
            price: Price::from_cents(2499),
            image: String::new(),
            category: "accessories".to_string(),
            features: vec!["USB-C".to_string()],
        }
    }

    fn messages<S: KeyValueStore>(store: &mut Store<S, NotificationQueue>) -> Vec<String> {
        store
            .notifier_mut()
            .drain()
            .into_iter()
            .map(|n| n.message)
            .collect()
    }

    /// Storage that always fails, for exercising error paths.
    struct BrokenStorage;

    impl KeyValueStore for BrokenStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::InvalidKey(key.to_owned()))
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::InvalidKey(key.to_owned()))
        }
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    #[test]
    fn test_initialize_seeds_and_persists_once() {
        let store = Store::initialize(MemoryStore::new(), NotificationQueue::new());
        assert_eq!(store.catalog_source(), CatalogSource::Seeded);
        assert_eq!(store.products().len(), 8);
        assert!(store.cart().is_empty());
        assert_eq!(store.storage().writes(), 1);

        let again = Store::initialize(store.into_storage(), NotificationQueue::new());
        assert_eq!(again.catalog_source(), CatalogSource::Loaded);
        assert_eq!(again.products().len(), 8);
        assert_eq!(again.storage().writes(), 1);
    }

    #[test]
    fn test_initialize_recovers_from_corrupt_storage() {
        let storage = MemoryStore::with_entry(CATALOG_KEY, "{definitely not a catalog");
        let store = Store::initialize(storage, NotificationQueue::new());

        assert_eq!(store.catalog_source(), CatalogSource::Recovered);
        assert_eq!(store.catalog(), &Catalog::defaults());

        let reloaded = Store::initialize(store.into_storage(), NotificationQueue::new());
        assert_eq!(reloaded.catalog_source(), CatalogSource::Loaded);
    }

    #[test]
    fn test_initialize_with_broken_storage_still_serves_defaults() {
        let mut store = Store::initialize(BrokenStorage, NotificationQueue::new());
        assert_eq!(store.catalog_source(), CatalogSource::Recovered);
        assert_eq!(store.products().len(), 8);

        let pending = store.notifier_mut().drain();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].level, NotificationLevel::Error);
    }

    #[test]
    fn test_initialize_loads_legacy_number_prices() {
        let json = r#"[{"id":"1","name":"Lamp","description":"A lamp","price":129.99,"image":"","category":"home"}]"#;
        let store = Store::initialize(MemoryStore::with_entry(CATALOG_KEY, json), NotificationQueue::new());
        assert_eq!(store.catalog_source(), CatalogSource::Loaded);
        assert_eq!(store.products().len(), 1);
        assert_eq!(store.products()[0].price, Price::from_cents(12999));
        assert_eq!(store.storage().writes(), 0);
    }

    // =========================================================================
    // Cart operations
    // =========================================================================

    #[test]
    fn test_example_scenario() {
        let mut store = fresh();
        let a = catalog_product(&store, 1);
        let price = a.price;

        store.add_to_cart(a.clone(), 2).unwrap();
        assert_eq!(store.cart().len(), 1);
        assert_eq!(store.cart().lines()[0].quantity, 2);
        assert_eq!(store.cart_total(), price.times(2));

        store.add_to_cart(a.clone(), 3).unwrap();
        assert_eq!(store.cart().len(), 1);
        assert_eq!(store.cart().lines()[0].quantity, 5);
        assert_eq!(store.cart_total(), price.times(5));

        store.update_quantity(&a.id, 1).unwrap();
        assert_eq!(store.cart().lines()[0].quantity, 1);
        assert_eq!(store.cart_total(), price);

        store.remove_from_cart(&a.id);
        assert!(store.cart().is_empty());
        assert_eq!(store.cart_total(), Price::ZERO);
        assert_eq!(store.cart_count(), 0);
    }

    #[test]
    fn test_add_notifications_distinguish_merge() {
        let mut store = fresh();
        let lamp = catalog_product(&store, 4);

        store.add_to_cart(lamp.clone(), 1).unwrap();
        store.add_to_cart(lamp, 1).unwrap();

        assert_eq!(
            messages(&mut store),
            [
                "Added Minimalist Desk Lamp to cart",
                "Updated quantity for Minimalist Desk Lamp"
            ]
        );
    }

    #[test]
    fn test_add_clamps_non_positive_quantity() {
        let mut store = fresh();
        let lamp = catalog_product(&store, 4);

        store.add_to_cart(lamp.clone(), 0).unwrap();
        store.add_to_cart(lamp, -7).unwrap();
        assert_eq!(store.cart_count(), 2);
    }

    #[test]
    fn test_add_overflow_reports_error() {
        let mut store = fresh();
        let lamp = catalog_product(&store, 4);

        store.add_to_cart(lamp.clone(), i64::from(u32::MAX)).unwrap();
        store.notifier_mut().drain();

        let err = store.add_to_cart(lamp, 1).unwrap_err();
        assert!(matches!(err, StoreError::Cart(CartError::QuantityOverflow(_))));
        assert_eq!(store.cart_count(), u64::from(u32::MAX));

        let pending = store.notifier_mut().drain();
        assert_eq!(pending[0].level, NotificationLevel::Error);
    }

    #[test]
    fn test_add_rejects_request_beyond_u32() {
        let mut store = fresh();
        let lamp = catalog_product(&store, 4);

        let err = store
            .add_to_cart(lamp.clone(), i64::from(u32::MAX) + 1)
            .unwrap_err();
        assert!(matches!(err, StoreError::Cart(CartError::QuantityOverflow(_))));
        assert!(store.cart().is_empty());
        assert_eq!(
            messages(&mut store),
            ["Could not add Minimalist Desk Lamp: quantity too large"]
        );

        store.add_to_cart(lamp.clone(), 2).unwrap();
        store.notifier_mut().drain();
        let before = store.cart().clone();
        assert!(store.add_to_cart(lamp, 5_000_000_000).is_err());
        assert_eq!(store.cart(), &before);
    }

    #[test]
    fn test_remove_notifies_only_when_found() {
        let mut store = fresh();
        let lamp = catalog_product(&store, 4);
        store.add_to_cart(lamp.clone(), 1).unwrap();
        store.notifier_mut().drain();

        let before = store.cart().clone();
        assert_eq!(
            store.remove_from_cart(&ProductId::from_number(99)),
            RemoveOutcome::NotInCart
        );
        assert_eq!(store.cart(), &before);
        assert!(messages(&mut store).is_empty());

        store.remove_from_cart(&lamp.id);
        assert_eq!(messages(&mut store), ["Removed Minimalist Desk Lamp from cart"]);
    }

    #[test]
    fn test_update_to_zero_or_negative_equals_remove() {
        for requested in [0, -1] {
            let mut via_update = fresh();
            let mut via_remove = fresh();
            for store in [&mut via_update, &mut via_remove] {
                let a = catalog_product(store, 1);
                let b = catalog_product(store, 2);
                store.add_to_cart(a, 2).unwrap();
                store.add_to_cart(b, 1).unwrap();
                store.notifier_mut().drain();
            }

            let id = ProductId::from_number(1);
            via_update.update_quantity(&id, requested).unwrap();
            via_remove.remove_from_cart(&id);

            assert_eq!(via_update.cart(), via_remove.cart());
            assert_eq!(via_update.cart_total(), via_remove.cart_total());
            assert_eq!(messages(&mut via_update), messages(&mut via_remove));
        }
    }

    #[test]
    fn test_update_absent_is_noop() {
        let mut store = fresh();
        let before = store.cart().clone();
        let outcome = store.update_quantity(&ProductId::from_number(3), 4).unwrap();
        assert_eq!(outcome, UpdateOutcome::NotInCart);
        assert_eq!(store.cart(), &before);
    }

    #[test]
    fn test_clear_cart_is_idempotent() {
        let mut store = fresh();
        store.clear_cart();
        assert!(store.cart().is_empty());

        let a = catalog_product(&store, 1);
        let b = catalog_product(&store, 3);
        store.add_to_cart(a, 1).unwrap();
        store.add_to_cart(b, 4).unwrap();
        store.notifier_mut().drain();

        store.clear_cart();
        store.clear_cart();
        assert!(store.cart().is_empty());
        assert_eq!(store.cart_total(), Price::ZERO);
        assert_eq!(store.cart_count(), 0);
        assert_eq!(messages(&mut store), ["Cart cleared", "Cart cleared"]);
    }

    // =========================================================================
    // Catalog operations
    // =========================================================================

    #[test]
    fn test_add_product_persists() {
        let mut store = fresh();
        store.add_product(new_product("9")).unwrap();
        assert_eq!(store.products().len(), 9);
        assert_eq!(messages(&mut store), ["Added new product: Travel Adapter"]);

        let reloaded = Store::initialize(store.into_storage(), NotificationQueue::new());
        assert_eq!(reloaded.catalog_source(), CatalogSource::Loaded);
        assert_eq!(reloaded.products().len(), 9);
        assert_eq!(
            reloaded.product(&ProductId::from_number(9)),
            Some(&new_product("9"))
        );
    }

    #[test]
    fn test_add_product_rejects_duplicate_without_writing() {
        let mut store = fresh();
        let writes = store.storage().writes();

        let err = store.add_product(new_product("1")).unwrap_err();
        assert!(matches!(err, StoreError::Catalog(CatalogError::DuplicateId(_))));
        assert_eq!(store.products().len(), 8);
        assert_eq!(store.storage().writes(), writes);
    }

    #[test]
    fn test_add_product_storage_failure_leaves_catalog() {
        let mut store = Store::initialize(BrokenStorage, NotificationQueue::new());
        store.notifier_mut().drain();

        let err = store.add_product(new_product("9")).unwrap_err();
        assert!(matches!(err, StoreError::Storage(_)));
        assert_eq!(store.products().len(), 8);
        assert_eq!(messages(&mut store), ["Failed to add product"]);
    }

    #[test]
    fn test_cart_snapshot_survives_catalog_growth() {
        let mut store = fresh();
        let a = catalog_product(&store, 1);
        store.add_to_cart(a.clone(), 1).unwrap();
        store.add_product(new_product("9")).unwrap();
        assert_eq!(store.cart().lines()[0].product, a);
    }

    proptest! {
        #[test]
        fn prop_repeated_adds_merge_into_one_line(quantities in prop::collection::vec(1_i64..50, 1..20)) {
            let mut store = fresh();
            let a = catalog_product(&store, 2);

            for q in &quantities {
                store.add_to_cart(a.clone(), *q).unwrap();
            }

            let expected: i64 = quantities.iter().sum();
            prop_assert_eq!(store.cart().len(), 1);
            prop_assert_eq!(i64::from(store.cart().lines()[0].quantity.get()), expected);
            prop_assert_eq!(store.cart_count(), u64::try_from(expected).unwrap());
        }

        #[test]
        fn prop_aggregates_track_every_mutation(ops in prop::collection::vec((0_u8..4, 1_u64..9, -2_i64..6), 0..40)) {
            let mut store = fresh();
            for (op, id, qty) in ops {
                let product = catalog_product(&store, id);
                match op {
                    0 => { store.add_to_cart(product, qty).unwrap(); }
                    1 => { store.remove_from_cart(&product.id); }
                    2 => { store.update_quantity(&product.id, qty).unwrap(); }
                    _ => store.clear_cart(),
                }

                let lines = store.cart().lines();
                let total: Price = lines.iter().map(|l| l.product.price.times(l.quantity.get())).sum();
                let count: u64 = lines.iter().map(|l| u64::from(l.quantity.get())).sum();
                prop_assert_eq!(store.cart_total(), total);
                prop_assert_eq!(store.cart_count(), count);

                let mut ids: Vec<&ProductId> = lines.iter().map(|l| &l.product.id).collect();
                ids.sort();
                ids.dedup();
                prop_assert_eq!(ids.len(), lines.len());
            }
        }
    }
}
