//! Catalog store tests
//!
//! Tests for the persisted coffee shop collection including:
//! - Seeding and corrupted-slot recovery
//! - Add/delete scenarios and write failures
//! - Property: ids of consecutive adds are pairwise distinct
//! - Property: deleting an unknown id leaves the catalog unchanged

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use coffee_shop_catalog::ids::SequentialAllocator;
use coffee_shop_catalog::notification::{Notification, RecordingNotifier};
use coffee_shop_catalog::{
    CatalogError, CatalogStore, MemoryStorage, Operation, Storage, StorageError, STORAGE_KEY,
};
use proptest::prelude::*;
use shared::{decode_catalog, demo_coffee_shops, encode_catalog, CoffeeShopDraft, PriceRange};

fn empty_storage() -> MemoryStorage {
    MemoryStorage::new().with_value(STORAGE_KEY, "[]")
}

fn recording_store(storage: MemoryStorage) -> (CatalogStore, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new());
    let store = CatalogStore::new(storage).with_notifier(notifier.clone());
    (store, notifier)
}

/// Writer that collects formatted log output
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Storage whose writes always fail, as when the browser store is full
struct FailingWrites {
    inner: MemoryStorage,
}

impl Storage for FailingWrites {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.read(key)
    }

    fn write(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Backend("QuotaExceededError".into()))
    }
}

/// Storage whose reads always fail; counts attempted writes
struct FailingReads {
    writes: Arc<AtomicUsize>,
}

impl Storage for FailingReads {
    fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Backend("SecurityError".into()))
    }

    fn write(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Adding to an empty catalog yields exactly that record
    #[test]
    fn test_add_to_empty_catalog() {
        let (store, _) = recording_store(empty_storage());

        let added = store
            .add(CoffeeShopDraft::new(
                "Minimal Brew",
                "123 Simplicity Ave",
                PriceRange::Moderate,
            ))
            .unwrap();

        let shops = store.list();
        assert_eq!(shops.len(), 1);
        assert_eq!(shops[0].name, "Minimal Brew");
        assert_eq!(shops[0].address, "123 Simplicity Ave");
        assert_eq!(shops[0].price_range, PriceRange::Moderate);
        assert!(!shops[0].id.is_empty());
        assert_eq!(shops[0].id, added.id);
        assert_eq!(shops[0].created_at, added.created_at);
    }

    /// Deleting the first of two shops leaves the second untouched
    #[test]
    fn test_delete_first_of_two() {
        let (store, _) = recording_store(empty_storage());
        let older = store
            .add(CoffeeShopDraft::new("Essence Café", "456 Elegance St", PriceRange::Expensive))
            .unwrap();
        let newer = store
            .add(CoffeeShopDraft::new("Minimal Brew", "123 Simplicity Ave", PriceRange::Moderate))
            .unwrap();

        let shops = store.list();
        assert_eq!(shops[0].id, newer.id);

        store.delete(&shops[0].id).unwrap();
        assert_eq!(store.list(), vec![older]);
    }

    /// A corrupted slot falls back to the demo shops and logs the failure
    #[test]
    fn test_corrupted_slot_logs_and_recovers() {
        let storage = MemoryStorage::new().with_value(STORAGE_KEY, "[{\"id\": 1,");
        let (store, _) = recording_store(storage.clone());

        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let shops = tracing::subscriber::with_default(subscriber, || store.list());

        assert_eq!(shops, demo_coffee_shops());
        assert!(logs.contents().contains("Error parsing coffee shops data"));
        assert_eq!(
            storage.read(STORAGE_KEY).unwrap().as_deref(),
            Some("[{\"id\": 1,")
        );
    }

    /// An absent slot is seeded and the seed persisted
    #[test]
    fn test_absent_slot_is_seeded() {
        let storage = MemoryStorage::new();
        let (store, notifier) = recording_store(storage.clone());

        assert_eq!(store.list(), demo_coffee_shops());
        let stored = storage.read(STORAGE_KEY).unwrap().unwrap();
        assert_eq!(stored, encode_catalog(&demo_coffee_shops()).unwrap());
        // Seeding is not a user action
        assert!(notifier.take().is_empty());
    }

    /// Seeding still returns the demo shops when the write fails
    #[test]
    fn test_seed_write_failure_still_returns_seed() {
        let store = CatalogStore::new(FailingWrites {
            inner: MemoryStorage::new(),
        });
        assert_eq!(store.list(), demo_coffee_shops());
    }

    /// A failed read serves the demo shops without writing anything
    #[test]
    fn test_read_failure_serves_seed_without_writing() {
        let writes = Arc::new(AtomicUsize::new(0));
        let store = CatalogStore::new(FailingReads {
            writes: writes.clone(),
        });

        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let shops = tracing::subscriber::with_default(subscriber, || store.list());

        assert_eq!(shops, demo_coffee_shops());
        assert_eq!(writes.load(Ordering::SeqCst), 0);
        assert!(logs.contents().contains("Error reading coffee shops data"));
    }

    /// Write failures surface once and leave the stored value alone
    #[test]
    fn test_add_write_failure() {
        let storage = empty_storage();
        let notifier = Arc::new(RecordingNotifier::new());
        let store = CatalogStore::new(FailingWrites {
            inner: storage.clone(),
        })
        .with_notifier(notifier.clone());

        let err = store
            .add(CoffeeShopDraft::new("Bean", "1 Main St", PriceRange::Budget))
            .unwrap_err();

        match err {
            CatalogError::Persistence { operation, .. } => assert_eq!(operation, Operation::Add),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(
            notifier.take(),
            vec![Notification::Failure("Failed to add coffee shop".into())]
        );
        assert_eq!(storage.read(STORAGE_KEY).unwrap().as_deref(), Some("[]"));
    }

    /// Delete write failures use the remove message
    #[test]
    fn test_delete_write_failure() {
        let encoded = encode_catalog(&demo_coffee_shops()).unwrap();
        let notifier = Arc::new(RecordingNotifier::new());
        let store = CatalogStore::new(FailingWrites {
            inner: MemoryStorage::new().with_value(STORAGE_KEY, encoded),
        })
        .with_notifier(notifier.clone());

        let err = store.delete("1").unwrap_err();
        assert_eq!(err.detail().message, "Failed to remove coffee shop");
        assert_eq!(store.list(), demo_coffee_shops());
        assert_eq!(
            notifier.take(),
            vec![Notification::Failure("Failed to remove coffee shop".into())]
        );
    }

    /// Records are stored newest first with camelCase fields
    #[test]
    fn test_stored_format() {
        let storage = empty_storage();
        let (store, _) = recording_store(storage.clone());
        store
            .add(CoffeeShopDraft::new("Bean", "1 Main St", PriceRange::Premium))
            .unwrap();

        let raw = storage.read(STORAGE_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json[0]["priceRange"], "$$$$");
        assert!(json[0]["createdAt"].is_string());
        assert_eq!(decode_catalog(&raw).unwrap().len(), 1);
    }

    /// Records written before optional fields existed still load
    #[test]
    fn test_legacy_records_load() {
        let legacy = r#"[{"id":"abc1234","name":"Old Shop","address":"1 Old Rd","priceRange":"$","createdAt":"2023-03-01T10:20:30.000Z"}]"#;
        let (store, _) = recording_store(MemoryStorage::new().with_value(STORAGE_KEY, legacy));

        let shops = store.list();
        assert_eq!(shops.len(), 1);
        assert_eq!(shops[0].id, "abc1234");
        assert!(shops[0].styles.is_empty());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn draft_strategy() -> impl Strategy<Value = CoffeeShopDraft> {
        (
            "[A-Za-z ]{1,20}",
            "[0-9]{1,4} [A-Za-z ]{1,20}",
            prop::sample::select(PriceRange::ALL.to_vec()),
        )
            .prop_map(|(name, address, price)| CoffeeShopDraft::new(name, address, price))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// N consecutive adds give pairwise distinct ids
        #[test]
        fn prop_added_ids_are_unique(drafts in prop::collection::vec(draft_strategy(), 1..20)) {
            let store = CatalogStore::new(empty_storage());
            let mut ids: Vec<String> = drafts
                .into_iter()
                .map(|draft| store.add(draft).unwrap().id)
                .collect();
            let count = ids.len();
            ids.sort();
            ids.dedup();
            prop_assert_eq!(ids.len(), count);
        }

        /// Deleting an id that is not present changes nothing
        #[test]
        fn prop_delete_unknown_is_idempotent(
            drafts in prop::collection::vec(draft_strategy(), 0..8),
            missing in "zz-[a-z]{4}",
        ) {
            let store = CatalogStore::new(empty_storage())
                .with_id_allocator(SequentialAllocator::with_prefix("shop-"));
            for draft in drafts {
                store.add(draft).unwrap();
            }
            let before = store.list();
            store.delete(&missing).unwrap();
            store.delete(&missing).unwrap();
            prop_assert_eq!(store.list(), before);
        }

        /// Add followed by delete of the new id restores the catalog
        #[test]
        fn prop_add_then_delete_restores(
            existing in prop::collection::vec(draft_strategy(), 0..6),
            draft in draft_strategy(),
        ) {
            let store = CatalogStore::new(empty_storage());
            for d in existing {
                store.add(d).unwrap();
            }
            let before = store.list();
            let added = store.add(draft).unwrap();
            store.delete(&added.id).unwrap();
            prop_assert_eq!(store.list(), before);
        }
    }
}
