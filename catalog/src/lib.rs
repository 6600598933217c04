//! Coffee Shop Catalog
//!
//! Persistence and validation core of the coffee shop catalog manager.
//! The presentation layer calls `list`, `add` and `delete` on the
//! [`CatalogStore`] and `validate_and_build` on the [`ShopBuilder`].

pub mod app;
pub mod config;
pub mod error;
pub mod ids;
pub mod notification;
pub mod services;
pub mod storage;
pub mod telemetry;

pub use app::Catalog;
pub use config::Config;
pub use error::{CatalogError, CatalogResult, ErrorDetail, Operation, StorageError};
pub use services::{CatalogStore, ShopBuilder};
pub use storage::{FileStorage, MemoryStorage, Storage, UnavailableStorage, STORAGE_KEY};
