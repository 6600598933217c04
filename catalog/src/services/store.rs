//! Catalog store: list, add and delete coffee shops
//!
//! Every mutation reads the whole catalog, changes it in memory and writes
//! the whole catalog back. The last writer wins.

use std::sync::Arc;

use chrono::Utc;
use shared::{decode_catalog, demo_coffee_shops, encode_catalog, CoffeeShop, CoffeeShopDraft};

use crate::error::{CatalogError, CatalogResult, Operation};
use crate::ids::{IdAllocator, UuidAllocator};
use crate::notification::{Notifier, TracingNotifier};
use crate::storage::{Storage, STORAGE_KEY};

/// Owns the coffee shop collection persisted in a single storage slot
pub struct CatalogStore {
    storage: Box<dyn Storage>,
    key: String,
    ids: Box<dyn IdAllocator>,
    notifier: Arc<dyn Notifier>,
}

impl CatalogStore {
    pub fn new(storage: impl Storage + 'static) -> Self {
        Self {
            storage: Box::new(storage),
            key: STORAGE_KEY.to_string(),
            ids: Box::new(UuidAllocator),
            notifier: Arc::new(TracingNotifier),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_id_allocator(mut self, ids: impl IdAllocator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// All shops, newest first.
    ///
    /// An empty slot is seeded with the demo shops. A slot that fails to
    /// parse is left untouched and the demo shops are returned instead.
    pub fn list(&self) -> Vec<CoffeeShop> {
        if !self.storage.is_available() {
            tracing::debug!("Storage unavailable, serving demo coffee shops");
            return demo_coffee_shops();
        }

        match self.read_stored() {
            Ok(Some(shops)) => {
                tracing::debug!(count = shops.len(), key = %self.key, "Loaded coffee shops");
                shops
            }
            Ok(None) => self.seed(),
            Err(CatalogError::Parse(e)) => {
                tracing::error!(error = %e, key = %self.key, "Error parsing coffee shops data");
                demo_coffee_shops()
            }
            Err(e) => {
                tracing::warn!(error = %e, key = %self.key, "Error reading coffee shops data");
                demo_coffee_shops()
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<CoffeeShop> {
        self.list().into_iter().find(|shop| shop.id == id)
    }

    pub fn len(&self) -> usize {
        self.list().len()
    }

    pub fn is_empty(&self) -> bool {
        self.list().is_empty()
    }

    /// Assign an id and timestamp to the draft and put it at the front
    pub fn add(&self, draft: CoffeeShopDraft) -> CatalogResult<CoffeeShop> {
        let mut shops = self.list();
        let id = self.unused_id(&shops)?;
        let shop = CoffeeShop::from_draft(draft, id, Utc::now());
        shops.insert(0, shop.clone());

        self.persist(&shops, Operation::Add)?;
        tracing::info!(id = %shop.id, name = %shop.name, "Coffee shop added");
        Ok(shop)
    }

    /// Remove the shop with `id`. An unknown id leaves the catalog as it was.
    pub fn delete(&self, id: &str) -> CatalogResult<()> {
        let shops = self.list();
        let before = shops.len();
        let remaining: Vec<CoffeeShop> = shops.into_iter().filter(|shop| shop.id != id).collect();

        if remaining.len() == before {
            tracing::debug!(id = %id, "No coffee shop with this id");
        }

        self.persist(&remaining, Operation::Delete)?;
        tracing::info!(id = %id, remaining = remaining.len(), "Coffee shop removed");
        Ok(())
    }

    /// Next allocated id not already held by a shop in `shops`.
    ///
    /// An allocator that never repeats itself finds a free id within
    /// `shops.len() + 1` draws.
    fn unused_id(&self, shops: &[CoffeeShop]) -> CatalogResult<String> {
        for _ in 0..=shops.len() {
            let id = self.ids.next_id();
            if shops.iter().all(|shop| shop.id != id) {
                return Ok(id);
            }
            tracing::debug!(id = %id, "Skipping id already in the catalog");
        }
        Err(CatalogError::IdExhausted)
    }

    /// Raw slot contents, decoded. `Ok(None)` for an empty or absent slot.
    fn read_stored(&self) -> CatalogResult<Option<Vec<CoffeeShop>>> {
        let raw = self
            .storage
            .read(&self.key)
            .map_err(CatalogError::StorageRead)?;

        match raw {
            Some(raw) if !raw.is_empty() => decode_catalog(&raw)
                .map(Some)
                .map_err(CatalogError::Parse),
            _ => Ok(None),
        }
    }

    fn seed(&self) -> Vec<CoffeeShop> {
        let seed = demo_coffee_shops();
        let written = encode_catalog(&seed)
            .map_err(|e| e.to_string())
            .and_then(|value| self.storage.write(&self.key, &value).map_err(|e| e.to_string()));

        match written {
            Ok(()) => tracing::info!(count = seed.len(), key = %self.key, "Seeded demo coffee shops"),
            Err(e) => tracing::warn!(error = %e, key = %self.key, "Could not persist demo coffee shops"),
        }
        seed
    }

    fn persist(&self, shops: &[CoffeeShop], operation: Operation) -> CatalogResult<()> {
        let value = encode_catalog(shops).map_err(CatalogError::Serialization)?;

        match self.storage.write(&self.key, &value) {
            Ok(()) => {
                self.notifier.success(operation.success_message());
                Ok(())
            }
            Err(source) => {
                tracing::error!(error = %source, operation = %operation, "Error saving coffee shops");
                self.notifier.failure(operation.failure_message());
                Err(CatalogError::persistence(operation, source))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialAllocator;
    use crate::notification::{Notification, RecordingNotifier};
    use crate::storage::{MemoryStorage, UnavailableStorage};
    use shared::PriceRange;

    fn store_with(storage: MemoryStorage) -> (CatalogStore, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        let store = CatalogStore::new(storage)
            .with_id_allocator(SequentialAllocator::with_prefix("shop-"))
            .with_notifier(notifier.clone());
        (store, notifier)
    }

    #[test]
    fn test_list_seeds_empty_slot() {
        let storage = MemoryStorage::new();
        let (store, _) = store_with(storage.clone());

        let shops = store.list();
        assert_eq!(shops, demo_coffee_shops());

        let stored = storage.read(STORAGE_KEY).unwrap().unwrap();
        assert_eq!(decode_catalog(&stored).unwrap(), demo_coffee_shops());
    }

    #[test]
    fn test_empty_string_slot_is_treated_as_absent() {
        let storage = MemoryStorage::new().with_value(STORAGE_KEY, "");
        let (store, _) = store_with(storage.clone());
        assert_eq!(store.list().len(), 2);
        assert!(!storage.read(STORAGE_KEY).unwrap().unwrap().is_empty());
    }

    #[test]
    fn test_corrupted_slot_is_not_overwritten() {
        let storage = MemoryStorage::new().with_value(STORAGE_KEY, "{not json");
        let (store, _) = store_with(storage.clone());

        assert_eq!(store.list(), demo_coffee_shops());
        assert_eq!(storage.read(STORAGE_KEY).unwrap().as_deref(), Some("{not json"));
    }

    #[test]
    fn test_add_prepends_and_notifies() {
        let storage = MemoryStorage::new().with_value(STORAGE_KEY, "[]");
        let (store, notifier) = store_with(storage);

        let first = store
            .add(CoffeeShopDraft::new("Minimal Brew", "123 Simplicity Ave", PriceRange::Moderate))
            .unwrap();
        let second = store
            .add(CoffeeShopDraft::new("Essence Café", "456 Elegance St", PriceRange::Expensive))
            .unwrap();

        assert_eq!(first.id, "shop-1");
        assert_eq!(second.id, "shop-2");
        let ids: Vec<_> = store.list().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, ["shop-2", "shop-1"]);
        assert_eq!(
            notifier.take(),
            vec![
                Notification::Success("Coffee shop added successfully".into()),
                Notification::Success("Coffee shop added successfully".into()),
            ]
        );
    }

    #[test]
    fn test_add_then_delete_restores_previous_state() {
        let (store, _) = store_with(MemoryStorage::new());
        let before = store.list();

        let added = store
            .add(CoffeeShopDraft::new("Bean There", "9 Crema Ct", PriceRange::Budget))
            .unwrap();
        assert_eq!(store.len(), before.len() + 1);

        store.delete(&added.id).unwrap();
        assert_eq!(store.list(), before);
    }

    #[test]
    fn test_add_skips_ids_already_in_catalog() {
        let notifier = Arc::new(RecordingNotifier::new());
        let store = CatalogStore::new(MemoryStorage::new())
            .with_id_allocator(SequentialAllocator::new())
            .with_notifier(notifier);
        let before = store.list();

        let added = store
            .add(CoffeeShopDraft::new("Bean There", "9 Crema Ct", PriceRange::Budget))
            .unwrap();
        assert_eq!(added.id, "3");

        let ids: Vec<_> = store.list().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, ["3", "1", "2"]);

        store.delete(&added.id).unwrap();
        assert_eq!(store.list(), before);
    }

    struct Constant;

    impl IdAllocator for Constant {
        fn next_id(&self) -> String {
            "1".to_string()
        }
    }

    #[test]
    fn test_add_fails_when_allocator_only_repeats() {
        let storage = MemoryStorage::new();
        let store = CatalogStore::new(storage.clone()).with_id_allocator(Constant);
        let before = store.list();

        let err = store
            .add(CoffeeShopDraft::new("Bean There", "9 Crema Ct", PriceRange::Budget))
            .unwrap_err();

        assert!(matches!(err, CatalogError::IdExhausted));
        assert_eq!(err.detail().code, "ID_ALLOCATION_ERROR");
        assert_eq!(store.list(), before);
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let (store, notifier) = store_with(MemoryStorage::new());
        let before = store.list();
        store.delete("missing").unwrap();
        assert_eq!(store.list(), before);
        assert_eq!(notifier.take(), vec![Notification::Success("Coffee shop removed".into())]);
    }

    #[test]
    fn test_add_fails_when_quota_exceeded() {
        let storage = MemoryStorage::new().with_value(STORAGE_KEY, "[]");
        let mut limited = storage.clone();
        limited.set_quota(Some(20));
        let (store, notifier) = store_with(limited);

        let err = store
            .add(CoffeeShopDraft::new("Minimal Brew", "123 Simplicity Ave", PriceRange::Moderate))
            .unwrap_err();

        assert!(matches!(
            err,
            CatalogError::Persistence { operation: Operation::Add, .. }
        ));
        assert_eq!(notifier.take(), vec![Notification::Failure("Failed to add coffee shop".into())]);
        assert_eq!(storage.read(STORAGE_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_unavailable_storage_serves_seed_and_rejects_add() {
        let notifier = Arc::new(RecordingNotifier::new());
        let store = CatalogStore::new(UnavailableStorage).with_notifier(notifier.clone());

        assert_eq!(store.list(), demo_coffee_shops());
        let err = store
            .add(CoffeeShopDraft::new("a", "b", PriceRange::Budget))
            .unwrap_err();
        assert_eq!(err.detail().code, "STORAGE_UNAVAILABLE");
        assert_eq!(notifier.take().len(), 1);
    }

    #[test]
    fn test_get_by_id() {
        let (store, _) = store_with(MemoryStorage::new());
        assert_eq!(store.get("2").map(|s| s.name), Some("Essence Café".to_string()));
        assert!(store.get("404").is_none());
    }

    #[test]
    fn test_custom_key() {
        let storage = MemoryStorage::new();
        let (store, _) = store_with(storage.clone());
        let store = store.with_key("alt-shops");
        store.list();
        assert!(storage.read("alt-shops").unwrap().is_some());
        assert!(storage.read(STORAGE_KEY).unwrap().is_none());
    }
}
