//! Window binning: mapping wall-clock time to discrete window identifiers
//! and combining them with subject keys.

use std::fmt;
use std::time::Duration;

use crate::error::{RateLimitError, Result};

/// Reserved delimiter separating the subject key from the window identifier
/// in a windowed key. Subject keys must not contain it.
pub const DELIMITER: char = ':';

/// Granularity of a fixed time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    /// Per-second windows
    Second,
    /// Per-minute windows
    Minute,
    /// Per-hour windows
    Hour,
    /// Per-day windows
    Day,
}

impl Granularity {
    /// Get the duration of one window at this granularity.
    pub fn size(&self) -> Duration {
        match self {
            Granularity::Second => Duration::from_secs(1),
            Granularity::Minute => Duration::from_secs(60),
            Granularity::Hour => Duration::from_secs(3600),
            Granularity::Day => Duration::from_secs(86400),
        }
    }
}

/// Identifier of one fixed window.
///
/// Two timestamps map to the same identifier iff they fall within the same
/// window: the identifier is the floor of unix seconds over the window size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strategy for binning wall-clock time into window identifiers.
///
/// Implementations must be pure functions of `now`: deterministic, with
/// collisions only within the same window.
pub trait WindowBinner: Send + Sync {
    /// Map a point in time (duration since the Unix epoch) to its window.
    fn bin(&self, now: Duration) -> WindowId;
}

/// Bins time into consecutive fixed windows of a whole number of seconds.
#[derive(Debug, Clone, Copy)]
pub struct TimestampBinner {
    window_secs: u64,
}

impl TimestampBinner {
    /// Create a binner for windows of the given length.
    ///
    /// The length must be a whole positive number of seconds; `Allowance`
    /// validation guarantees this for periods it hands out.
    pub fn new(window: Duration) -> Result<Self> {
        if window.is_zero() || window.subsec_nanos() != 0 {
            return Err(RateLimitError::InvalidAllowance(format!(
                "window must be a whole positive number of seconds, got {:?}",
                window
            )));
        }
        Ok(Self {
            window_secs: window.as_secs(),
        })
    }

    /// Window length in seconds.
    pub fn window_secs(&self) -> u64 {
        self.window_secs
    }
}

impl WindowBinner for TimestampBinner {
    fn bin(&self, now: Duration) -> WindowId {
        WindowId(now.as_secs() / self.window_secs)
    }
}

/// Combine a subject key with a window identifier into the windowed key
/// that names its counter in the store.
///
/// Fails if the subject is empty or contains the reserved delimiter, which
/// would let one subject alias another's counter.
pub fn windowed_key(subject: &str, id: WindowId) -> Result<String> {
    validate_subject(subject)?;
    Ok(format!("{}{}{}", subject, DELIMITER, id))
}

/// Check that a subject key is usable: non-empty and delimiter-free.
pub fn validate_subject(subject: &str) -> Result<()> {
    if subject.is_empty() {
        return Err(RateLimitError::InvalidSubject(
            "subject key must not be empty".to_string(),
        ));
    }
    if subject.contains(DELIMITER) {
        return Err(RateLimitError::InvalidSubject(format!(
            "subject key {:?} contains reserved delimiter {:?}",
            subject, DELIMITER
        )));
    }
    Ok(())
}
