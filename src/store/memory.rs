//! In-memory counter store backend.
//!
//! Single-process stand-in for the remote store, with the same TTL
//! semantics. Used by tests and by embedders that want local-only
//! limiting behind the same `CounterStore` trait.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{CounterStore, StoreError};
use crate::clock::{Clock, SystemClock};

#[derive(Debug, Clone)]
struct Entry {
    value: u64,
    /// Time since the Unix epoch at which the entry expires, if a TTL
    /// has been set.
    expires_at: Option<Duration>,
}

/// A `CounterStore` backed by a locked in-process map.
///
/// The lock makes every operation atomic, including the compound
/// increment-and-expire. Expired entries are purged lazily on access.
pub struct MemoryCounterStore {
    clock: Arc<dyn Clock>,
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryCounterStore {
    /// Create a store using the system wall clock for TTL expiry.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a store that reads time from the given clock.
    ///
    /// Tests share one manual clock between the store and the limiter so
    /// window rollover and TTL expiry advance together.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Number of live (unexpired) entries.
    pub fn len(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.lock();
        entries.retain(|_, e| !expired(e, now));
        entries.len()
    }

    /// Whether the store holds no live entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryCounterStore {
    fn default() -> Self {
        Self::new()
    }
}

fn expired(entry: &Entry, now: Duration) -> bool {
    matches!(entry.expires_at, Some(deadline) if now >= deadline)
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn increment(&self, key: &str) -> Result<u64, StoreError> {
        let now = self.clock.now();
        let mut entries = self.entries.lock();

        let entry = entries.entry(key.to_string()).or_insert(Entry {
            value: 0,
            expires_at: None,
        });
        if expired(entry, now) {
            entry.value = 0;
            entry.expires_at = None;
        }
        entry.value += 1;
        Ok(entry.value)
    }

    async fn read(&self, key: &str) -> Result<Option<u64>, StoreError> {
        let now = self.clock.now();
        let mut entries = self.entries.lock();

        match entries.get(key) {
            Some(entry) if expired(entry, now) => {
                entries.remove(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value)),
            None => Ok(None),
        }
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<(), StoreError> {
        let now = self.clock.now();
        let mut entries = self.entries.lock();

        if let Some(entry) = entries.get_mut(key) {
            if expired(entry, now) {
                entries.remove(key);
            } else {
                entry.expires_at = Some(now + ttl);
            }
        }
        Ok(())
    }

    async fn increment_and_expire(&self, key: &str, ttl: Duration) -> Result<u64, StoreError> {
        let now = self.clock.now();
        let mut entries = self.entries.lock();

        let entry = entries.entry(key.to_string()).or_insert(Entry {
            value: 0,
            expires_at: None,
        });
        if expired(entry, now) {
            entry.value = 0;
        }
        entry.value += 1;
        entry.expires_at = Some(now + ttl);
        Ok(entry.value)
    }
}
