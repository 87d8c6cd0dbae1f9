//! Time sources for window binning and TTL expiry.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// A source of wall-clock time, expressed as the duration since the Unix
/// epoch.
///
/// The limiter and the in-memory store both read time through this trait so
/// that tests can drive windows and TTLs deterministically.
pub trait Clock: Send + Sync {
    /// Current time since the Unix epoch.
    fn now(&self) -> Duration;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
    }
}

/// A manually advanced clock for tests and deterministic simulations.
///
/// Cloning shares the underlying time, so a limiter and a store handed the
/// same `ManualClock` observe identical advances.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    millis: Arc<AtomicU64>,
}

impl ManualClock {
    /// Create a clock starting at the given time since the Unix epoch.
    pub fn new(start: Duration) -> Self {
        Self {
            millis: Arc::new(AtomicU64::new(start.as_millis() as u64)),
        }
    }

    /// Advance the clock by the given duration.
    pub fn advance(&self, by: Duration) {
        self.millis
            .fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_millis(self.millis.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_nonzero() {
        assert!(SystemClock.now() > Duration::ZERO);
    }

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::new(Duration::from_secs(1000));
        assert_eq!(clock.now(), Duration::from_secs(1000));

        clock.advance(Duration::from_millis(1500));
        assert_eq!(clock.now(), Duration::from_millis(1_001_500));
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new(Duration::from_secs(5));
        let other = clock.clone();

        clock.advance(Duration::from_secs(2));
        assert_eq!(other.now(), Duration::from_secs(7));
    }
}
