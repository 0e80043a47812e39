//! # Cart/Wishlist Store
//!
//! The shopper's two persisted collections, with merge-by-identity semantics
//! and change notification.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Store Operations                                     │
//! │                                                                         │
//! │  Page Action            Store Call                Persisted Change      │
//! │  ───────────            ──────────                ────────────────      │
//! │                                                                         │
//! │  Add to cart ──────────► add_to_cart() ─────────► qty += n  or  push    │
//! │                                                                         │
//! │  Quantity stepper ─────► update_cart_quantity() ► qty = n  or  remove   │
//! │                                                                         │
//! │  Remove link ──────────► remove_from_cart() ────► retain(key ≠ id)      │
//! │                                                                         │
//! │  Heart icon ───────────► toggle_wishlist_item() ► remove  or  push      │
//! │                                                                         │
//! │  Header counters ──────► cart_count() / wishlist_count()  (read only)   │
//! │                                                                         │
//! │  NOTE: every mutation reads the full collection from the backend,       │
//! │        changes it, writes it back whole, then notifies listeners.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Handling
//! - Missing or unparseable data reads as an empty collection (`warn!`).
//! - Stored entries no operation could have written (quantity < 1, negative
//!   price) are dropped on load (`warn!`).
//! - Invalid input is dropped before any read or write (`warn!`).
//! - A failed write is logged (`error!`) and no notification fires.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, error, warn};

use aurum_core::validation::{merge_quantity, validate_cart_input, validate_wishlist_input};
use aurum_core::{CartItem, CartItemInput, CartSummary, Catalog, WishlistItem, WishlistItemInput};

use crate::backend::{FileStorage, StorageBackend};
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::events::{Collection, Notifier, SubscriptionId};

/// Default storage key for the cart.
pub const DEFAULT_CART_KEY: &str = "cart";

/// Default storage key for the wishlist.
pub const DEFAULT_WISHLIST_KEY: &str = "wishlist";

/// A persisted entry that is checked after it is loaded.
trait StoredEntry: Serialize + DeserializeOwned {
    /// False for an entry no store operation could have written.
    fn is_well_formed(&self) -> bool;
}

impl StoredEntry for CartItem {
    fn is_well_formed(&self) -> bool {
        self.quantity >= 1 && !self.final_price.is_negative()
    }
}

impl StoredEntry for WishlistItem {
    fn is_well_formed(&self) -> bool {
        !self.final_price.is_negative()
    }
}

/// Backend keys the two collections live under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub cart: String,
    pub wishlist: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        StorageKeys {
            cart: DEFAULT_CART_KEY.to_string(),
            wishlist: DEFAULT_WISHLIST_KEY.to_string(),
        }
    }
}

/// Cart and wishlist over an injected storage backend.
///
/// ## Thread Safety
/// `ShopStore<B>` is `Send + Sync` whenever `B` is. Mutations are serialized
/// by an internal guard, so concurrent `add_to_cart` calls from one process
/// never lose an update. Listeners run after the guard is released.
pub struct ShopStore<B> {
    backend: B,
    keys: StorageKeys,
    notifier: Notifier,
    write_guard: Mutex<()>,
}

impl<B> std::fmt::Debug for ShopStore<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopStore")
            .field("keys", &self.keys)
            .field("notifier", &self.notifier)
            .finish_non_exhaustive()
    }
}

impl ShopStore<FileStorage> {
    /// Opens a file-backed store from configuration.
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        config.validate()?;
        debug!(data_dir = ?config.data_dir, "Opening file-backed store");
        Ok(ShopStore::with_keys(
            FileStorage::new(&config.data_dir),
            config.storage_keys(),
        ))
    }
}

impl<B: StorageBackend> ShopStore<B> {
    /// Creates a store using the default `cart` / `wishlist` keys.
    pub fn new(backend: B) -> Self {
        Self::with_keys(backend, StorageKeys::default())
    }

    pub fn with_keys(backend: B, keys: StorageKeys) -> Self {
        ShopStore {
            backend,
            keys,
            notifier: Notifier::new(),
            write_guard: Mutex::new(()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Current cart in insertion order.
    pub fn get_cart(&self) -> Vec<CartItem> {
        self.load(&self.keys.cart, Collection::Cart)
    }

    /// Adds `input` to the cart, merging into an existing line with the same
    /// composite key.
    ///
    /// An existing line keeps its original `finalPrice`, customizations and
    /// `addedAt`; only the quantity grows. A sum that overflows `i64` is the
    /// only merge that is rejected.
    pub fn add_to_cart(&self, input: CartItemInput) {
        if let Err(e) = validate_cart_input(&input) {
            warn!(product_id = %input.product_id, error = %e, "Rejected add to cart");
            return;
        }

        let key = input.key();
        debug!(%key, quantity = input.quantity, "add_to_cart");

        self.mutate_cart(|items| {
            match items.iter_mut().find(|i| i.cart_item_id == key) {
                Some(existing) => match merge_quantity(existing.quantity, input.quantity) {
                    Ok(merged) => existing.quantity = merged,
                    Err(e) => {
                        warn!(
                            %key,
                            existing = existing.quantity,
                            added = input.quantity,
                            error = %e,
                            "Rejected merge"
                        );
                        return false;
                    }
                },
                None => items.push(CartItem::from_input(input, Utc::now())),
            }
            true
        });
    }

    /// Removes the line with `cart_item_id`.
    ///
    /// A missing key leaves the lines unchanged but the cart is still
    /// rewritten and listeners still run.
    pub fn remove_from_cart(&self, cart_item_id: &str) {
        debug!(key = cart_item_id, "remove_from_cart");
        self.mutate_cart(|items| {
            items.retain(|i| i.cart_item_id.as_str() != cart_item_id);
            true
        });
    }

    /// Sets a line's quantity. Zero or below removes the line.
    ///
    /// A missing key is persisted and notified like [`Self::remove_from_cart`].
    pub fn update_cart_quantity(&self, cart_item_id: &str, new_quantity: i64) {
        debug!(key = cart_item_id, new_quantity, "update_cart_quantity");
        self.mutate_cart(|items| {
            if let Some(pos) = items
                .iter()
                .position(|i| i.cart_item_id.as_str() == cart_item_id)
            {
                if new_quantity > 0 {
                    items[pos].quantity = new_quantity;
                } else {
                    items.remove(pos);
                }
            }
            true
        });
    }

    pub fn clear_cart(&self) {
        debug!("clear_cart");
        self.mutate_cart(|items| {
            items.clear();
            true
        });
    }

    /// Sum of quantities, as shown on the header cart badge.
    pub fn cart_count(&self) -> i64 {
        self.get_cart()
            .iter()
            .fold(0, |n, i| n.saturating_add(i.quantity))
    }

    /// Joins the cart against `catalog` for the cart page.
    pub fn cart_summary(&self, catalog: &Catalog) -> CartSummary {
        let summary = catalog.summarize(&self.get_cart());
        if summary.skipped > 0 {
            debug!(skipped = summary.skipped, "Cart lines without a catalog product");
        }
        summary
    }

    // =========================================================================
    // Wishlist
    // =========================================================================

    /// Current wishlist in insertion order.
    pub fn get_wishlist(&self) -> Vec<WishlistItem> {
        self.load(&self.keys.wishlist, Collection::Wishlist)
    }

    /// Removes the entry if present, adds it otherwise.
    pub fn toggle_wishlist_item(&self, input: WishlistItemInput) {
        if let Err(e) = validate_wishlist_input(&input) {
            warn!(product_id = %input.product_id, error = %e, "Rejected wishlist toggle");
            return;
        }

        let key = input.key();
        debug!(%key, "toggle_wishlist_item");

        self.mutate(&self.keys.wishlist, Collection::Wishlist, |items: &mut Vec<WishlistItem>| {
            match items.iter().position(|i| i.wishlist_item_id == key) {
                Some(pos) => {
                    items.remove(pos);
                }
                None => items.push(WishlistItem::from(input)),
            }
            true
        });
    }

    pub fn is_item_in_wishlist(&self, wishlist_item_id: &str) -> bool {
        self.get_wishlist()
            .iter()
            .any(|i| i.wishlist_item_id.as_str() == wishlist_item_id)
    }

    /// Number of entries, as shown on the header wishlist badge.
    pub fn wishlist_count(&self) -> usize {
        self.get_wishlist().len()
    }

    // =========================================================================
    // Notification
    // =========================================================================

    /// Registers `listener` to run after every successful write to `collection`.
    pub fn subscribe<F>(&self, collection: Collection, listener: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.notifier.subscribe(collection, Arc::new(listener))
    }

    /// Returns true if the subscription existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn mutate_cart<F>(&self, f: F)
    where
        F: FnOnce(&mut Vec<CartItem>) -> bool,
    {
        self.mutate(&self.keys.cart, Collection::Cart, f)
    }

    /// Read-modify-write under the write guard, then notify.
    ///
    /// `f` returns false to abandon the mutation without writing.
    fn mutate<T, F>(&self, key: &str, collection: Collection, f: F)
    where
        T: StoredEntry,
        F: FnOnce(&mut Vec<T>) -> bool,
    {
        let written = {
            let _guard = self
                .write_guard
                .lock()
                .unwrap_or_else(PoisonError::into_inner);

            let mut items: Vec<T> = self.load(key, collection);
            if !f(&mut items) {
                return;
            }
            self.persist(key, collection, &items)
        };

        if written {
            self.notifier.notify(collection);
        }
    }

    fn load<T: StoredEntry>(&self, key: &str, collection: Collection) -> Vec<T> {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(%collection, key, error = %e, "Storage read failed, using empty collection");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Option<Vec<T>>>(&raw) {
            Ok(items) => {
                let mut items = items.unwrap_or_default();
                let total = items.len();
                items.retain(StoredEntry::is_well_formed);
                if items.len() < total {
                    warn!(
                        %collection,
                        key,
                        dropped = total - items.len(),
                        "Dropped malformed entries"
                    );
                }
                items
            }
            Err(e) => {
                warn!(%collection, key, error = %e, "Corrupt data in storage, using empty collection");
                Vec::new()
            }
        }
    }

    fn persist<T: Serialize>(&self, key: &str, collection: Collection, items: &[T]) -> bool {
        let result = serde_json::to_string(items)
            .map_err(StoreError::from)
            .and_then(|json| self.backend.set(key, &json));

        match result {
            Ok(()) => {
                debug!(%collection, key, entries = items.len(), "Persisted");
                true
            }
            Err(e) => {
                error!(%collection, key, error = %e, "Failed to persist, change dropped");
                false
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryStorage;
    use aurum_core::{Customizations, Money, Product};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    fn store() -> ShopStore<Arc<MemoryStorage>> {
        ShopStore::new(Arc::new(MemoryStorage::new()))
    }

    fn gold() -> Customizations {
        Customizations::new("Gold", "18K", "None")
    }

    fn cart_input(product_id: &str, quantity: i64, rupees: i64) -> CartItemInput {
        CartItemInput::new(product_id, quantity, gold(), Money::from_rupees(rupees))
    }

    fn product(id: &str, rupees: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Piece {id}"),
            description: None,
            images: vec![],
            price: Money::from_rupees(rupees),
            default_specs: gold(),
        }
    }

    fn e2() -> WishlistItemInput {
        WishlistItemInput::new(
            "E2",
            Customizations::new("Platinum", "22K", "Diamond"),
            Money::from_rupees(12_000),
        )
    }

    fn counter(store: &ShopStore<impl StorageBackend>, collection: Collection) -> Arc<AtomicUsize> {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        store.subscribe(collection, move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        count
    }

    /// Backend whose writes can be switched off.
    #[derive(Default)]
    struct FlakyStorage {
        inner: MemoryStorage,
        fail_writes: AtomicBool,
    }

    impl StorageBackend for FlakyStorage {
        fn get(&self, key: &str) -> StoreResult<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> StoreResult<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StoreError::Storage("quota exceeded".to_string()));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> StoreResult<()> {
            self.inner.remove(key)
        }
    }

    // -------------------------------------------------------------------------
    // Cart
    // -------------------------------------------------------------------------

    #[test]
    fn test_add_same_item_merges_quantity() {
        let store = store();
        store.add_to_cart(cart_input("R1", 1, 5000));
        store.add_to_cart(cart_input("R1", 2, 5000));

        let cart = store.get_cart();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].cart_item_id, "R1-Gold-18K-None");
        assert_eq!(cart[0].quantity, 3);
        assert_eq!(cart[0].final_price, Money::from_rupees(5000));
    }

    #[test]
    fn test_merge_keeps_first_price() {
        let store = store();
        store.add_to_cart(cart_input("R1", 1, 5000));
        store.add_to_cart(cart_input("R1", 1, 7000));

        let cart = store.get_cart();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].final_price, Money::from_rupees(5000));
    }

    #[test]
    fn test_different_customizations_are_separate_lines() {
        let store = store();
        store.add_to_cart(cart_input("R1", 1, 5000));
        store.add_to_cart(CartItemInput::new(
            "R1",
            1,
            Customizations::new("Gold", "22K", "None"),
            Money::from_rupees(5750),
        ));

        let cart = store.get_cart();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart[0].cart_item_id, "R1-Gold-18K-None");
        assert_eq!(cart[1].cart_item_id, "R1-Gold-22K-None");
    }

    #[test]
    fn test_hyphenated_values_do_not_collide() {
        let store = store();
        store.add_to_cart(CartItemInput::new(
            "A-B",
            1,
            Customizations::new("C", "18K", "None"),
            Money::from_rupees(100),
        ));
        store.add_to_cart(CartItemInput::new(
            "A",
            1,
            Customizations::new("B-C", "18K", "None"),
            Money::from_rupees(100),
        ));

        assert_eq!(store.get_cart().len(), 2);
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let store = store();
        for id in ["N3", "R1", "E2"] {
            store.add_to_cart(cart_input(id, 1, 1000));
        }
        store.add_to_cart(cart_input("R1", 1, 1000));

        let ids: Vec<String> = store.get_cart().into_iter().map(|i| i.product_id).collect();
        assert_eq!(ids, vec!["N3", "R1", "E2"]);
    }

    #[test]
    fn test_add_then_remove_restores_cart() {
        let store = store();
        store.add_to_cart(cart_input("R1", 1, 5000));
        let before = store.get_cart();

        let input = cart_input("E2", 1, 12_000);
        let key = input.key();
        store.add_to_cart(input);
        store.remove_from_cart(key.as_str());

        assert_eq!(store.get_cart(), before);
    }

    #[test]
    fn test_remove_missing_key_is_noop() {
        let store = store();
        store.add_to_cart(cart_input("R1", 1, 5000));
        store.remove_from_cart("NOPE-Gold-18K-None");
        assert_eq!(store.get_cart().len(), 1);
    }

    #[test]
    fn test_update_quantity_sets_value() {
        let store = store();
        store.add_to_cart(cart_input("R1", 1, 5000));
        store.update_cart_quantity("R1-Gold-18K-None", 4);
        assert_eq!(store.get_cart()[0].quantity, 4);
        assert_eq!(store.cart_count(), 4);
    }

    #[test]
    fn test_update_quantity_zero_or_negative_removes() {
        for qty in [0, -1] {
            let store = store();
            store.add_to_cart(cart_input("R1", 1, 5000));
            store.update_cart_quantity("R1-Gold-18K-None", qty);
            assert!(store.get_cart().is_empty(), "quantity {qty} should remove");
        }
    }

    #[test]
    fn test_update_missing_key_is_noop() {
        let store = store();
        store.add_to_cart(cart_input("R1", 2, 5000));
        store.update_cart_quantity("X-Gold-18K-None", 9);
        assert_eq!(store.cart_count(), 2);
    }

    #[test]
    fn test_update_to_large_quantity() {
        let store = store();
        store.add_to_cart(cart_input("R1", 2, 5000));
        let hits = counter(&store, Collection::Cart);

        store.update_cart_quantity("R1-Gold-18K-None", 1000);

        assert_eq!(store.get_cart()[0].quantity, 1000);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_invalid_add_is_rejected_without_write() {
        let backend = Arc::new(MemoryStorage::new());
        let store = ShopStore::new(Arc::clone(&backend));
        let hits = counter(&store, Collection::Cart);

        store.add_to_cart(cart_input("R1", 0, 5000));
        store.add_to_cart(cart_input("", 1, 5000));
        store.add_to_cart(cart_input("R1", 1, -5));

        assert!(backend.is_empty());
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_large_quantities_add_and_merge() {
        let single = store();
        single.add_to_cart(cart_input("R1", 1000, 10));
        assert_eq!(single.cart_count(), 1000);

        let merged = store();
        merged.add_to_cart(cart_input("R1", 600, 10));
        merged.add_to_cart(cart_input("R1", 600, 10));

        let cart = merged.get_cart();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].quantity, 1200);
    }

    #[test]
    fn test_merge_overflow_is_rejected() {
        let store = store();
        store.add_to_cart(cart_input("R1", i64::MAX, 10));
        let hits = counter(&store, Collection::Cart);

        store.add_to_cart(cart_input("R1", 1, 10));

        assert_eq!(store.get_cart()[0].quantity, i64::MAX);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_clear_cart() {
        let store = store();
        store.add_to_cart(cart_input("R1", 1, 5000));
        store.add_to_cart(cart_input("E2", 3, 5000));
        assert_eq!(store.cart_count(), 4);

        store.clear_cart();
        assert!(store.get_cart().is_empty());
        assert_eq!(store.cart_count(), 0);
    }

    #[test]
    fn test_cart_summary_uses_catalog() {
        let store = store();
        store.add_to_cart(cart_input("R1", 2, 5000));
        store.add_to_cart(cart_input("RETIRED", 1, 100));

        let catalog = Catalog::new(vec![product("R1", 5000)]);

        let summary = store.cart_summary(&catalog);
        assert_eq!(summary.lines.len(), 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.total, Money::from_rupees(10_000));
    }

    // -------------------------------------------------------------------------
    // Wishlist
    // -------------------------------------------------------------------------

    #[test]
    fn test_toggle_three_times() {
        let store = store();
        let key = e2().key();

        store.toggle_wishlist_item(e2());
        assert!(store.is_item_in_wishlist(key.as_str()));
        assert_eq!(store.wishlist_count(), 1);

        store.toggle_wishlist_item(e2());
        assert!(!store.is_item_in_wishlist(key.as_str()));
        assert_eq!(store.wishlist_count(), 0);

        store.toggle_wishlist_item(e2());
        assert!(store.is_item_in_wishlist("E2-Platinum-22K-Diamond"));
        assert_eq!(store.wishlist_count(), 1);
    }

    #[test]
    fn test_toggle_twice_restores_prior_wishlist() {
        let store = store();
        store.toggle_wishlist_item(WishlistItemInput::new("R1", gold(), Money::from_rupees(5000)));
        let before = store.get_wishlist();

        store.toggle_wishlist_item(e2());
        store.toggle_wishlist_item(e2());

        assert_eq!(store.get_wishlist(), before);
    }

    #[test]
    fn test_wishlist_persists_objects() {
        let backend = Arc::new(MemoryStorage::new());
        let store = ShopStore::new(Arc::clone(&backend));
        store.toggle_wishlist_item(e2());

        let raw = backend.get("wishlist").unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json[0]["wishlistItemId"], "E2-Platinum-22K-Diamond");
        assert_eq!(json[0]["finalPrice"], 12_000);
    }

    #[test]
    fn test_legacy_string_wishlist_reads_as_empty() {
        let backend = Arc::new(MemoryStorage::new());
        backend.set("wishlist", r#"["R1", "E2"]"#).unwrap();
        let store = ShopStore::new(Arc::clone(&backend));

        assert!(store.get_wishlist().is_empty());
        assert!(!store.is_item_in_wishlist("R1"));
    }

    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------

    #[test]
    fn test_missing_and_corrupt_data_read_as_empty() {
        let backend = Arc::new(MemoryStorage::new());
        let store = ShopStore::new(Arc::clone(&backend));
        assert!(store.get_cart().is_empty());
        assert!(store.get_wishlist().is_empty());

        backend.set("cart", "{not json").unwrap();
        backend.set("wishlist", "null").unwrap();
        assert!(store.get_cart().is_empty());
        assert!(store.get_wishlist().is_empty());
    }

    #[test]
    fn test_out_of_range_stored_quantities() {
        let line = |id: &str, quantity: i64| {
            serde_json::json!({
                "cartItemId": format!("{id}-Gold-18K-None"),
                "productId": id,
                "quantity": quantity,
                "customizations": {"metal": "Gold", "purity": "18K", "stone": "None"},
                "finalPrice": 5000
            })
        };
        let huge = i64::MAX / 2 + 1;
        let raw = serde_json::json!([
            line("A", huge),
            line("B", huge),
            line("C", 0),
            line("D", -3),
        ]);

        let backend = Arc::new(MemoryStorage::new());
        backend.set("cart", &raw.to_string()).unwrap();
        let store = ShopStore::new(Arc::clone(&backend));

        let ids: Vec<_> = store.get_cart().into_iter().map(|i| i.product_id).collect();
        assert_eq!(ids, vec!["A", "B"]);
        assert_eq!(store.cart_count(), i64::MAX);

        let catalog = Catalog::new(vec![product("A", 5000), product("B", 5000)]);
        let summary = store.cart_summary(&catalog);
        assert_eq!(summary.item_count, i64::MAX);
        assert_eq!(summary.total, Money::from_paise(i64::MAX));
    }

    #[test]
    fn test_mutation_over_corrupt_data_starts_fresh() {
        let backend = Arc::new(MemoryStorage::new());
        backend.set("cart", "garbage").unwrap();
        let store = ShopStore::new(Arc::clone(&backend));

        store.add_to_cart(cart_input("R1", 1, 5000));

        assert_eq!(store.get_cart().len(), 1);
    }

    #[test]
    fn test_custom_keys() {
        let backend = Arc::new(MemoryStorage::new());
        let store = ShopStore::with_keys(
            Arc::clone(&backend),
            StorageKeys {
                cart: "bag".to_string(),
                wishlist: "saved".to_string(),
            },
        );

        store.add_to_cart(cart_input("R1", 1, 5000));
        store.toggle_wishlist_item(e2());

        assert!(backend.get("bag").unwrap().is_some());
        assert!(backend.get("saved").unwrap().is_some());
        assert!(backend.get("cart").unwrap().is_none());
    }

    #[test]
    fn test_state_survives_a_new_store_instance() {
        let backend = Arc::new(MemoryStorage::new());
        ShopStore::new(Arc::clone(&backend)).add_to_cart(cart_input("R1", 2, 5000));

        let reopened = ShopStore::new(Arc::clone(&backend));
        assert_eq!(reopened.cart_count(), 2);
    }

    #[test]
    fn test_file_backed_store() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = StoreConfig {
            data_dir: dir.path().to_path_buf(),
            ..StoreConfig::default()
        };

        let store = ShopStore::open(&config).unwrap();
        store.add_to_cart(cart_input("R1", 1, 5000));
        store.toggle_wishlist_item(e2());

        assert!(dir.path().join("cart.json").exists());
        assert!(dir.path().join("wishlist.json").exists());

        let reopened = ShopStore::open(&config).unwrap();
        assert_eq!(reopened.cart_count(), 1);
        assert!(reopened.is_item_in_wishlist("E2-Platinum-22K-Diamond"));
    }

    // -------------------------------------------------------------------------
    // Notification
    // -------------------------------------------------------------------------

    #[test]
    fn test_one_notification_per_mutation() {
        let store = store();
        let cart_hits = counter(&store, Collection::Cart);
        let wish_hits = counter(&store, Collection::Wishlist);

        store.add_to_cart(cart_input("R1", 1, 5000));
        store.add_to_cart(cart_input("R1", 1, 5000));
        store.update_cart_quantity("R1-Gold-18K-None", 5);
        store.remove_from_cart("R1-Gold-18K-None");
        store.toggle_wishlist_item(e2());

        assert_eq!(cart_hits.load(Ordering::SeqCst), 4);
        assert_eq!(wish_hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_missing_key_mutations_still_persist_and_notify() {
        let backend = Arc::new(MemoryStorage::new());
        let store = ShopStore::new(Arc::clone(&backend));
        let hits = counter(&store, Collection::Cart);

        store.remove_from_cart("missing");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(backend.get("cart").unwrap().as_deref(), Some("[]"));

        store.update_cart_quantity("missing", 3);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert!(store.get_cart().is_empty());
    }

    #[test]
    fn test_reads_do_not_notify() {
        let store = store();
        let hits = counter(&store, Collection::Cart);

        store.get_cart();
        store.cart_count();
        store.is_item_in_wishlist("x");

        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_failed_write_suppresses_notification() {
        let backend = Arc::new(FlakyStorage::default());
        let store = ShopStore::new(Arc::clone(&backend));
        store.add_to_cart(cart_input("R1", 1, 5000));
        let hits = counter(&store, Collection::Cart);

        backend.fail_writes.store(true, Ordering::SeqCst);
        store.add_to_cart(cart_input("R1", 1, 5000));
        store.toggle_wishlist_item(e2());

        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(store.cart_count(), 1);
        assert!(store.get_wishlist().is_empty());
    }

    #[test]
    fn test_listener_sees_written_state() {
        let store = Arc::new(store());
        let seen = Arc::new(AtomicUsize::new(0));

        let s = Arc::clone(&store);
        let observed = Arc::clone(&seen);
        store.subscribe(Collection::Cart, move || {
            observed.store(s.cart_count() as usize, Ordering::SeqCst);
        });

        store.add_to_cart(cart_input("R1", 3, 5000));
        assert_eq!(seen.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let store = store();
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let id = store.subscribe(Collection::Cart, move || {
            c.fetch_add(1, Ordering::SeqCst);
        });

        store.add_to_cart(cart_input("R1", 1, 5000));
        assert!(store.unsubscribe(id));
        store.add_to_cart(cart_input("R1", 1, 5000));

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_concurrent_adds_do_not_lose_updates() {
        let store = Arc::new(store());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..10 {
                        store.add_to_cart(cart_input("R1", 1, 5000));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.cart_count(), 80);
    }
}
