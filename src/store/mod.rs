//! Counter store abstraction over remote atomic counter backends.

mod memory;
mod redis_store;

pub use memory::MemoryCounterStore;
pub use redis_store::RedisCounterStore;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from counter store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to reach the store.
    #[error("store connection failed: {0}")]
    Connection(String),
    /// The store rejected or failed to execute a command.
    #[error("store command failed: {0}")]
    Command(String),
}

/// A remote store of named atomic counters.
///
/// All operations must be side-effect-atomic with respect to other clients
/// of the same store: concurrent `increment` calls on one key each observe
/// a distinct, strictly increasing post-increment value.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Atomically increment the counter at `key`, creating it at zero
    /// first if absent, and return the post-increment value.
    async fn increment(&self, key: &str) -> Result<u64, StoreError>;

    /// Point read of the counter at `key`. Not atomic with respect to a
    /// following write; suitable only for advisory checks.
    async fn read(&self, key: &str) -> Result<Option<u64>, StoreError>;

    /// Set a time-to-live on `key`, after which the store removes it.
    /// A no-op if the key is absent.
    async fn expire(&self, key: &str, ttl: Duration) -> Result<(), StoreError>;

    /// Atomically increment the counter at `key` and set its TTL, with no
    /// other client's command interleaved between the two, returning the
    /// post-increment value.
    async fn increment_and_expire(&self, key: &str, ttl: Duration) -> Result<u64, StoreError>;
}

#[async_trait]
impl<S: CounterStore + ?Sized> CounterStore for Arc<S> {
    async fn increment(&self, key: &str) -> Result<u64, StoreError> {
        (**self).increment(key).await
    }

    async fn read(&self, key: &str) -> Result<Option<u64>, StoreError> {
        (**self).read(key).await
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<(), StoreError> {
        (**self).expire(key, ttl).await
    }

    async fn increment_and_expire(&self, key: &str, ttl: Duration) -> Result<u64, StoreError> {
        (**self).increment_and_expire(key, ttl).await
    }
}
