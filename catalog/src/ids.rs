//! Identifier allocation for shops and ad-hoc styles

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Hands out opaque string ids
pub trait IdAllocator {
    fn next_id(&self) -> String;
}

/// Random v4 UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidAllocator;

impl IdAllocator for UuidAllocator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Monotonic counter, optionally prefixed (`style-1`, `style-2`, ...)
#[derive(Debug, Default)]
pub struct SequentialAllocator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(0),
        }
    }
}

impl IdAllocator for SequentialAllocator {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}{}", self.prefix, n)
    }
}
