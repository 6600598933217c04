//! In-memory storage, shared between clones

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::Storage;
use crate::error::StorageError;

/// Clones see the same slots. An optional quota makes writes fail the way
/// a full browser store does.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Arc<Mutex<HashMap<String, String>>>,
    quota_bytes: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total bytes of keys plus values may not exceed `quota_bytes`
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::default()
        }
    }

    /// Pre-populate a slot, bypassing the quota
    pub fn with_value(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.lock().insert(key.into(), value.into());
        self
    }

    pub fn set_quota(&mut self, quota_bytes: Option<usize>) {
        self.quota_bytes = quota_bytes;
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut slots = self.lock();
        if let Some(quota) = self.quota_bytes {
            let others: usize = slots
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded { needed, quota });
            }
        }
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
