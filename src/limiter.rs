//! The acquire engine: admit/deny decisions against a shared counter store.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, trace};

use crate::allowance::Allowance;
use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::store::CounterStore;
use crate::window::{windowed_key, TimestampBinner, WindowBinner};

/// Trait for rate limiter implementations.
///
/// Abstracts over limiting strategies so embedders can swap one for
/// another behind a single capability.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Decide whether the next operation for `subject` is allowed.
    ///
    /// `Ok(false)` is a normal denial, not an error; errors are reserved
    /// for invalid subjects and store failures.
    async fn acquire(&self, subject: &str) -> Result<bool>;
}

/// A fixed-window rate limiter over a shared atomic counter store.
///
/// Each subject+window pair maps to one counter in the store, named by the
/// windowed key. The counter is created on first increment, expires after
/// the allowance period, and is never explicitly reset: a new window simply
/// addresses a new key. The engine holds no mutable state of its own, so
/// any number of processes pointed at the same store enforce one shared
/// allowance.
///
/// Known tradeoff of fixed windows: a burst spanning a window edge can
/// momentarily admit up to twice the limit across the two adjacent windows.
pub struct FixedWindowLimiter<S> {
    store: S,
    allowance: Allowance,
    binner: Box<dyn WindowBinner>,
    clock: Arc<dyn Clock>,
}

impl<S: CounterStore> FixedWindowLimiter<S> {
    /// Create a limiter enforcing `allowance` against `store`, binning
    /// windows by the allowance period on the system clock.
    pub fn new(store: S, allowance: Allowance) -> Result<Self> {
        Self::with_clock(store, allowance, Arc::new(SystemClock))
    }

    /// Create a limiter reading time from the given clock.
    pub fn with_clock(store: S, allowance: Allowance, clock: Arc<dyn Clock>) -> Result<Self> {
        let binner = TimestampBinner::new(allowance.period())?;
        Ok(Self {
            store,
            allowance,
            binner: Box::new(binner),
            clock,
        })
    }

    /// Replace the window binning strategy.
    pub fn with_binner(mut self, binner: impl WindowBinner + 'static) -> Self {
        self.binner = Box::new(binner);
        self
    }

    /// The configured allowance.
    pub fn allowance(&self) -> Allowance {
        self.allowance
    }

    async fn acquire_inner(&self, subject: &str) -> Result<bool> {
        let window = self.binner.bin(self.clock.now());
        let key = windowed_key(subject, window)?;
        let limit = self.allowance.limit();

        trace!(subject, window = %window, "checking rate limit");

        // Advisory fast-reject: skip the write once the window is already
        // exhausted. Concurrent callers can all pass this read; the
        // post-increment comparison below is what bounds admissions.
        if let Some(count) = self.store.read(&key).await? {
            if count >= limit {
                debug!(subject, count, limit, "rate limit exceeded");
                return Ok(false);
            }
        }

        let count = self
            .store
            .increment_and_expire(&key, self.allowance.period())
            .await?;

        // Inclusive boundary: the call that reaches exactly `limit` is
        // admitted, the one that reaches `limit + 1` is the first denied.
        let admitted = count <= limit;
        if !admitted {
            debug!(subject, count, limit, "rate limit exceeded");
        }
        Ok(admitted)
    }
}

#[async_trait]
impl<S: CounterStore> RateLimiter for FixedWindowLimiter<S> {
    async fn acquire(&self, subject: &str) -> Result<bool> {
        self.acquire_inner(subject).await
    }
}
