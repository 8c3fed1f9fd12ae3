//! Wall-clock abstraction.
//!
//! Timestamp fields read the clock through this trait so that record
//! generation stays deterministic under test.

use chrono::Utc;

/// Source of the current time for `timestamp:` fields.
pub trait Clock {
    /// Seconds since the Unix epoch, with sub-second precision.
    fn epoch_secs(&self) -> f64;
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn epoch_secs(&self) -> f64 {
        Utc::now().timestamp_micros() as f64 / 1_000_000.0
    }
}

/// A clock pinned to a fixed instant, for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub f64);

impl Clock for FixedClock {
    fn epoch_secs(&self) -> f64 {
        self.0
    }
}
