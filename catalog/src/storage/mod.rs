//! Key-value storage backends for the catalog slot
//!
//! The store reads and writes the whole serialized catalog under one key.
//! Backends only move strings around and know nothing about shops.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::StorageError;

/// Default slot name
pub const STORAGE_KEY: &str = "coffee-shops";

/// A flat string key-value store
pub trait Storage {
    /// `Ok(None)` when the key was never written
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// False when the host has no storage at all
    fn is_available(&self) -> bool {
        true
    }
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}

/// Stand-in for hosts without storage access
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStorage;

impl Storage for UnavailableStorage {
    fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn write(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }

    fn is_available(&self) -> bool {
        false
    }
}
