//! Turnstile - Distributed Fixed-Window Rate Limiting
//!
//! This crate decides whether the next operation for a caller-supplied
//! subject key is allowed, enforcing a maximum count per fixed time window.
//! State is shared across any number of stateless processes through a
//! remote atomic counter store (Redis, or the bundled in-memory backend),
//! addressed by windowed keys that expire on their own.
//!
//! ```no_run
//! use turnstile::{Allowance, FixedWindowLimiter, RateLimiter, RedisCounterStore};
//!
//! # async fn example() -> turnstile::Result<()> {
//! let store = RedisCounterStore::connect("redis://127.0.0.1:6379").await?;
//! let limiter = FixedWindowLimiter::new(store, Allowance::per_second(100)?)?;
//!
//! if limiter.acquire("api-token-123").await? {
//!     // proceed
//! } else {
//!     // throttled
//! }
//! # Ok(())
//! # }
//! ```

pub mod allowance;
pub mod clock;
pub mod error;
pub mod limiter;
pub mod store;
pub mod window;

pub use allowance::Allowance;
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{RateLimitError, Result};
pub use limiter::{FixedWindowLimiter, RateLimiter};
pub use store::{CounterStore, MemoryCounterStore, RedisCounterStore, StoreError};
pub use window::{Granularity, TimestampBinner, WindowBinner, WindowId};
