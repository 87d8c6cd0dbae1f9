//! Redis-backed counter store.
//!
//! Relies on Redis' atomicity guarantees: `INCR` serializes concurrent
//! increments, and a `MULTI`/`EXEC` pipeline applies `INCR` + `PEXPIRE`
//! with no other client's command interleaved between them.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use super::{CounterStore, StoreError};

/// A `CounterStore` backed by a Redis server.
///
/// Holds a multiplexed connection with automatic reconnection; cloning the
/// store is cheap and all clones share the connection.
#[derive(Clone)]
pub struct RedisCounterStore {
    conn: ConnectionManager,
}

impl RedisCounterStore {
    /// Create a store over an established connection manager.
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    /// Connect to a Redis server by URL, e.g. `redis://127.0.0.1:6379`.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(url).map_err(map_err)?;
        let conn = ConnectionManager::new(client).await.map_err(map_err)?;
        Ok(Self::new(conn))
    }
}

fn map_err(err: redis::RedisError) -> StoreError {
    if err.is_io_error() || err.is_connection_refusal() || err.is_connection_dropped() {
        StoreError::Connection(err.to_string())
    } else {
        StoreError::Command(err.to_string())
    }
}

#[async_trait]
impl CounterStore for RedisCounterStore {
    async fn increment(&self, key: &str) -> Result<u64, StoreError> {
        let mut conn = self.conn.clone();
        conn.incr(key, 1u64).await.map_err(map_err)
    }

    async fn read(&self, key: &str) -> Result<Option<u64>, StoreError> {
        let mut conn = self.conn.clone();
        conn.get(key).await.map_err(map_err)
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        conn.pexpire::<_, ()>(key, ttl.as_millis() as i64)
            .await
            .map_err(map_err)
    }

    async fn increment_and_expire(&self, key: &str, ttl: Duration) -> Result<u64, StoreError> {
        let mut conn = self.conn.clone();
        let (value,): (u64,) = redis::pipe()
            .atomic()
            .incr(key, 1u64)
            .pexpire(key, ttl.as_millis() as i64)
            .ignore()
            .query_async(&mut conn)
            .await
            .map_err(map_err)?;
        Ok(value)
    }
}
