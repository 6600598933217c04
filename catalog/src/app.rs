//! Wiring of configuration, storage, store and builder

use std::sync::Arc;

use anyhow::Context;

use crate::config::{Config, IdStrategy, StorageBackend};
use crate::ids::{SequentialAllocator, UuidAllocator};
use crate::services::{CatalogStore, ShopBuilder};
use crate::storage::{FileStorage, MemoryStorage, Storage};
use crate::telemetry;

/// A configured catalog ready for the presentation layer
pub struct Catalog {
    pub config: Arc<Config>,
    pub store: CatalogStore,
    pub builder: ShopBuilder,
}

impl Catalog {
    /// Load `.env`, configuration and tracing, then build the catalog
    pub fn bootstrap() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = Config::load().context("loading configuration")?;
        telemetry::init(&config.logging);

        tracing::info!("Starting Coffee Shop Catalog");
        tracing::info!("Environment: {}", config.environment);

        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let storage: Box<dyn Storage> = match config.storage.backend {
            StorageBackend::Memory => Box::new(match config.storage.quota_bytes {
                Some(quota) => MemoryStorage::with_quota(quota),
                None => MemoryStorage::new(),
            }),
            StorageBackend::File => {
                let storage = FileStorage::open(&config.storage.path).with_context(|| {
                    format!("opening storage directory {}", config.storage.path.display())
                })?;
                tracing::info!("Using file storage at {}", storage.root().display());
                Box::new(storage)
            }
        };

        let store = CatalogStore::new(storage).with_key(config.storage.key.clone());
        let store = match config.ids.strategy {
            IdStrategy::Uuid => store.with_id_allocator(UuidAllocator),
            IdStrategy::Sequential => {
                store.with_id_allocator(SequentialAllocator::with_prefix("shop-"))
            }
        };

        let builder = ShopBuilder::new().with_image_size_hint(config.images.size_hint_bytes);

        Ok(Self {
            config: Arc::new(config),
            store,
            builder,
        })
    }
}
