//! Write-through cart store.
//!
//! [`CartStore`] owns the in-memory [`Cart`] and mirrors every change to a
//! [`KeyValueStorage`] under one key. Nothing it does returns an error:
//!
//! - a missing or unreadable persisted cart becomes an empty cart and the
//!   stored value is reset to `[]`
//! - a failed write is logged and ignored, the in-memory change stands, and
//!   storage catches up on the next successful write
//! - removing or updating a row that does not exist is a no-op
//!
//! Observers registered with [`CartStore::subscribe`] receive the total item
//! count after `init()` and after every mutation.

use std::fmt;

use tracing::{debug, error, instrument, warn};

use crate::cart::{Cart, QuantityUpdate};
use crate::config::CartConfig;
use crate::storage::KeyValueStorage;
use crate::types::{CartKey, LineItem, NewLineItem, ProductId, Size};

const EMPTY_CART: &str = "[]";

/// Receives the cart's total item count whenever it may have changed.
pub trait CartObserver {
    fn cart_count_changed(&self, count: u64);
}

impl<F: Fn(u64)> CartObserver for F {
    fn cart_count_changed(&self, count: u64) {
        self(count);
    }
}

/// The cart for one page context.
pub struct CartStore<S> {
    storage: S,
    config: CartConfig,
    cart: Cart,
    hydrated: bool,
    observers: Vec<Box<dyn CartObserver>>,
}

impl<S: fmt::Debug> fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("storage", &self.storage)
            .field("config", &self.config)
            .field("cart", &self.cart)
            .field("hydrated", &self.hydrated)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl<S: KeyValueStorage> CartStore<S> {
    /// Create a store without reading storage. The first mutation (or an
    /// explicit [`init`](Self::init)) hydrates it.
    #[must_use]
    pub fn new(storage: S, config: CartConfig) -> Self {
        Self {
            storage,
            config,
            cart: Cart::new(),
            hydrated: false,
            observers: Vec::new(),
        }
    }

    /// Create a store and hydrate it from storage.
    #[must_use]
    pub fn open(storage: S, config: CartConfig) -> Self {
        let mut store = Self::new(storage, config);
        store.init();
        store
    }

    /// Register an observer. It is not called until the next refresh.
    pub fn subscribe(&mut self, observer: impl CartObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Load the persisted cart, repairing storage if it is missing or
    /// unreadable, then refresh observers. Safe to call repeatedly.
    #[instrument(skip(self), fields(key = %self.config.storage_key()))]
    pub fn init(&mut self) {
        self.cart = self.load();
        self.hydrated = true;
        debug!(rows = self.cart.len(), count = self.cart.count(), "Cart hydrated");
        self.notify();
    }

    fn load(&mut self) -> Cart {
        let stored = self.storage.get_item(self.config.storage_key());
        match stored {
            Ok(None) => {
                debug!("No persisted cart, initializing empty");
                self.write_raw(EMPTY_CART);
                Cart::new()
            }
            Ok(Some(raw)) => match serde_json::from_str::<Vec<LineItem>>(&raw) {
                Ok(items) => {
                    let rows = items.len();
                    let cart = Cart::from_items(items);
                    if cart.len() != rows {
                        warn!(
                            rows,
                            merged = cart.len(),
                            "Persisted cart had duplicate rows, merging"
                        );
                        self.write_cart(&cart);
                    }
                    cart
                }
                Err(e) => {
                    warn!(error = %e, "Persisted cart is unreadable, resetting");
                    self.write_raw(EMPTY_CART);
                    Cart::new()
                }
            },
            Err(e) => {
                warn!(error = %e, "Failed to read persisted cart, starting empty");
                self.write_raw(EMPTY_CART);
                Cart::new()
            }
        }
    }

    fn ensure_hydrated(&mut self) {
        if !self.hydrated {
            self.init();
        }
    }

    /// The current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Total number of units in the cart.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.cart.count()
    }

    #[must_use]
    pub const fn config(&self) -> &CartConfig {
        &self.config
    }

    #[must_use]
    pub const fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Give back the storage backend.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Add a product, merging into an existing `(id, size)` row.
    #[instrument(skip(self, item), fields(key = %CartKey::new(&item.id, &item.size)))]
    pub fn add_to_cart(&mut self, item: NewLineItem) {
        self.ensure_hydrated();
        self.cart.add(item);
        self.save();
    }

    /// Remove the `(id, size)` row. Returns whether a row was removed.
    #[instrument(skip(self, id, size), fields(key = %CartKey::new(id, size)))]
    pub fn remove_from_cart(&mut self, id: &ProductId, size: &Size) -> bool {
        self.ensure_hydrated();
        let removed = self.cart.remove(id, size);
        if !removed {
            debug!("No matching row to remove");
        }
        self.save();
        removed
    }

    /// Set the `(id, size)` row's quantity. Zero or negative removes the row;
    /// values above `u32::MAX` saturate.
    #[instrument(skip(self, id, size), fields(key = %CartKey::new(id, size)))]
    pub fn update_quantity(&mut self, id: &ProductId, size: &Size, quantity: i64) -> QuantityUpdate {
        self.ensure_hydrated();
        let outcome = self.cart.set_quantity(id, size, quantity);
        match outcome {
            QuantityUpdate::Updated | QuantityUpdate::Removed => self.save(),
            QuantityUpdate::NotFound => debug!("No matching row to update"),
        }
        outcome
    }

    /// Empty the cart.
    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.hydrated = true;
        self.save();
    }

    fn save(&mut self) {
        let cart = std::mem::take(&mut self.cart);
        self.write_cart(&cart);
        self.cart = cart;
        self.notify();
    }

    fn write_cart(&mut self, cart: &Cart) {
        match serde_json::to_string(cart) {
            Ok(raw) => self.write_raw(&raw),
            Err(e) => error!(error = %e, "Failed to serialize cart"),
        }
    }

    fn write_raw(&mut self, raw: &str) {
        if let Err(e) = self.storage.set_item(self.config.storage_key(), raw) {
            error!(
                error = %e,
                key = %self.config.storage_key(),
                "Failed to persist cart"
            );
        }
    }

    fn notify(&self) {
        let count = self.cart.count();
        for observer in &self.observers {
            observer.cart_count_changed(count);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::storage::MemoryStorage;
    use crate::types::Price;

    fn jersey(size: &str) -> NewLineItem {
        NewLineItem::new("1", "Home Jersey", Price::new(25_000), size)
    }

    fn persisted(store: &CartStore<MemoryStorage>) -> Option<String> {
        store.storage().peek("eketar_cart").map(str::to_owned)
    }

    #[test]
    fn test_init_on_empty_storage_writes_empty_array() {
        let store = CartStore::open(MemoryStorage::new(), CartConfig::default());
        assert!(store.cart().is_empty());
        assert_eq!(persisted(&store).as_deref(), Some("[]"));
    }

    #[test]
    fn test_init_is_idempotent() {
        let mut store = CartStore::open(MemoryStorage::new(), CartConfig::default());
        store.add_to_cart(jersey("M").with_quantity(2));
        store.init();
        let once = store.cart().clone();
        store.init();
        assert_eq!(store.cart(), &once);
        assert_eq!(once.count(), 2);
    }

    #[test]
    fn test_init_resets_non_json() {
        let storage = MemoryStorage::new().with_item("eketar_cart", "{not json");
        let store = CartStore::open(storage, CartConfig::default());
        assert!(store.cart().is_empty());
        assert_eq!(persisted(&store).as_deref(), Some("[]"));
    }

    #[test]
    fn test_init_resets_schema_mismatch() {
        for raw in [
            r#"{"id":"1"}"#,
            r#"[{"id":"1","name":"x","price":1,"size":"M","quantity":0}]"#,
            r#"[{"name":"x"}]"#,
            "42",
        ] {
            let storage = MemoryStorage::new().with_item("eketar_cart", raw);
            let store = CartStore::open(storage, CartConfig::default());
            assert!(store.cart().is_empty(), "expected reset for {raw}");
            assert_eq!(persisted(&store).as_deref(), Some("[]"));
        }
    }

    #[test]
    fn test_init_merges_duplicate_rows() {
        let raw = r#"[
            {"id":"1","name":"Home Jersey","price":25000,"size":"M","quantity":1},
            {"id":"1","name":"Home Jersey","price":25000,"size":"M","quantity":2}
        ]"#;
        let storage = MemoryStorage::new().with_item("eketar_cart", raw);
        let store = CartStore::open(storage, CartConfig::default());

        assert_eq!(store.cart().len(), 1);
        assert_eq!(store.count(), 3);
        let reloaded: Vec<LineItem> = serde_json::from_str(&persisted(&store).unwrap()).unwrap();
        assert_eq!(reloaded.len(), 1);
    }

    #[test]
    fn test_round_trip_through_storage() {
        let mut store = CartStore::open(MemoryStorage::new(), CartConfig::default());
        store.add_to_cart(jersey("M").with_quantity(2).with_customization("ADE", "9"));
        store.add_to_cart(NewLineItem::new("7", "Away Jersey", Price::new(30_000), "L"));
        let before = store.cart().clone();

        let reopened = CartStore::open(store.into_storage(), CartConfig::default());
        assert_eq!(reopened.cart(), &before);
        assert_eq!(reopened.cart().items()[0].id.as_str(), "1");
        assert_eq!(reopened.cart().items()[1].id.as_str(), "7");
    }

    #[test]
    fn test_mutations_before_init_hydrate_first() {
        let raw = r#"[{"id":"1","name":"Home Jersey","price":25000,"size":"M","quantity":1}]"#;
        let storage = MemoryStorage::new().with_item("eketar_cart", raw);
        let mut store = CartStore::new(storage, CartConfig::default());
        assert!(!store.is_hydrated());

        store.add_to_cart(jersey("M"));
        assert!(store.is_hydrated());
        assert_eq!(store.count(), 2);
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let mut store = CartStore::open(MemoryStorage::new(), CartConfig::default());
        store.add_to_cart(jersey("M"));

        let outcome = store.update_quantity(&ProductId::new("1"), &Size::new("M"), 0);
        assert_eq!(outcome, QuantityUpdate::Removed);
        assert!(store.cart().is_empty());
        assert_eq!(persisted(&store).as_deref(), Some("[]"));
    }

    #[test]
    fn test_update_quantity_sets_value() {
        let mut store = CartStore::open(MemoryStorage::new(), CartConfig::default());
        store.add_to_cart(jersey("M").with_quantity(3));

        let outcome = store.update_quantity(&ProductId::new("1"), &Size::new("M"), 1);
        assert_eq!(outcome, QuantityUpdate::Updated);
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_update_quantity_above_u32_keeps_row() {
        let mut store = CartStore::open(MemoryStorage::new(), CartConfig::default());
        store.add_to_cart(jersey("M"));

        let outcome = store.update_quantity(&ProductId::new("1"), &Size::new("M"), 5_000_000_000);
        assert_eq!(outcome, QuantityUpdate::Updated);
        assert_eq!(store.cart().len(), 1);
        assert_eq!(store.count(), u64::from(u32::MAX));

        let saved: Vec<LineItem> = serde_json::from_str(&persisted(&store).unwrap()).unwrap();
        assert_eq!(saved[0].quantity.get(), u32::MAX);
    }

    #[test]
    fn test_remove_missing_on_empty_cart() {
        let mut store = CartStore::open(MemoryStorage::new(), CartConfig::default());
        assert!(!store.remove_from_cart(&ProductId::new("9"), &Size::new("XL")));
        assert!(store.cart().is_empty());
        assert_eq!(persisted(&store).as_deref(), Some("[]"));
    }

    #[test]
    fn test_clear_cart() {
        let mut store = CartStore::open(MemoryStorage::new(), CartConfig::default());
        store.add_to_cart(jersey("M"));
        store.add_to_cart(jersey("L"));
        store.clear_cart();
        assert_eq!(store.count(), 0);
        assert_eq!(persisted(&store).as_deref(), Some("[]"));
    }

    #[test]
    fn test_write_failure_keeps_in_memory_change() {
        let mut store = CartStore::open(MemoryStorage::with_quota(16), CartConfig::default());
        assert_eq!(persisted(&store).as_deref(), Some("[]"));

        store.add_to_cart(jersey("M"));
        assert_eq!(store.count(), 1);
        // The quota rejected the write, so storage still holds the old value.
        assert_eq!(persisted(&store).as_deref(), Some("[]"));
    }

    #[test]
    fn test_disabled_storage_never_fails_callers() {
        let mut store = CartStore::open(MemoryStorage::disabled(), CartConfig::default());
        assert!(store.cart().is_empty());
        store.add_to_cart(jersey("M").with_quantity(2));
        store.update_quantity(&ProductId::new("1"), &Size::new("M"), 4);
        assert_eq!(store.count(), 4);
        store.clear_cart();
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_custom_storage_key() {
        let config = CartConfig::new("preview_cart").unwrap();
        let mut store = CartStore::open(MemoryStorage::new(), config);
        store.add_to_cart(jersey("M"));
        assert!(store.storage().peek("preview_cart").is_some());
        assert!(store.storage().peek("eketar_cart").is_none());
    }

    #[test]
    fn test_observers_receive_counts() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut store = CartStore::new(MemoryStorage::new(), CartConfig::default());
        store.subscribe(move |count: u64| sink.borrow_mut().push(count));

        store.init();
        store.add_to_cart(jersey("M").with_quantity(2));
        store.add_to_cart(jersey("L"));
        store.update_quantity(&ProductId::new("1"), &Size::new("M"), 0);
        store.clear_cart();

        assert_eq!(*seen.borrow(), vec![0, 2, 3, 1, 0]);
    }
}
