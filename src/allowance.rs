//! Rate limit allowance: how many operations per fixed window.

use std::time::Duration;

use crate::error::{RateLimitError, Result};
use crate::window::Granularity;

/// An immutable rate limit allowance: at most `limit` admitted operations
/// per `period`.
///
/// Created once at limiter construction and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allowance {
    limit: u64,
    period: Duration,
}

impl Allowance {
    /// Create an allowance of `limit` operations per `period`.
    ///
    /// The limit must be positive. The period must be a whole, positive
    /// number of seconds: windows are binned on second boundaries, so a
    /// sub-second or fractional period cannot name a distinct window.
    pub fn new(limit: u64, period: Duration) -> Result<Self> {
        if limit == 0 {
            return Err(RateLimitError::InvalidAllowance(
                "limit must be positive".to_string(),
            ));
        }
        if period.is_zero() || period.subsec_nanos() != 0 {
            return Err(RateLimitError::InvalidAllowance(format!(
                "period must be a whole positive number of seconds, got {:?}",
                period
            )));
        }
        Ok(Self { limit, period })
    }

    /// At most `limit` operations per second.
    pub fn per_second(limit: u64) -> Result<Self> {
        Self::per(limit, Granularity::Second)
    }

    /// At most `limit` operations per minute.
    pub fn per_minute(limit: u64) -> Result<Self> {
        Self::per(limit, Granularity::Minute)
    }

    /// At most `limit` operations per hour.
    pub fn per_hour(limit: u64) -> Result<Self> {
        Self::per(limit, Granularity::Hour)
    }

    /// At most `limit` operations per day.
    pub fn per_day(limit: u64) -> Result<Self> {
        Self::per(limit, Granularity::Day)
    }

    /// At most `limit` operations per window of the given granularity.
    pub fn per(limit: u64, granularity: Granularity) -> Result<Self> {
        Self::new(limit, granularity.size())
    }

    /// Maximum admitted operations per window.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Length of the fixed window. Also the TTL applied to each counter.
    pub fn period(&self) -> Duration {
        self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowance_constructors() {
        assert_eq!(
            Allowance::per_second(5).unwrap().period(),
            Duration::from_secs(1)
        );
        assert_eq!(
            Allowance::per_minute(5).unwrap().period(),
            Duration::from_secs(60)
        );
        assert_eq!(
            Allowance::per_hour(5).unwrap().period(),
            Duration::from_secs(3600)
        );
        assert_eq!(
            Allowance::per_day(5).unwrap().period(),
            Duration::from_secs(86400)
        );
    }

    #[test]
    fn test_allowance_rejects_zero_limit() {
        assert!(matches!(
            Allowance::per_second(0),
            Err(RateLimitError::InvalidAllowance(_))
        ));
    }

    #[test]
    fn test_allowance_rejects_zero_period() {
        assert!(matches!(
            Allowance::new(10, Duration::ZERO),
            Err(RateLimitError::InvalidAllowance(_))
        ));
    }

    #[test]
    fn test_allowance_rejects_fractional_period() {
        assert!(matches!(
            Allowance::new(10, Duration::from_millis(1500)),
            Err(RateLimitError::InvalidAllowance(_))
        ));
    }

    #[test]
    fn test_allowance_accepts_multi_second_period() {
        let allowance = Allowance::new(3, Duration::from_secs(10)).unwrap();
        assert_eq!(allowance.limit(), 3);
        assert_eq!(allowance.period(), Duration::from_secs(10));
    }
}
