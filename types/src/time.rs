//! Timestamp type used throughout the engine.
//!
//! Timestamps are Unix epoch milliseconds (UTC), the resolution of the
//! platform export the entity records come from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Milliseconds in one day.
pub const MILLIS_PER_DAY: u64 = 24 * 60 * 60 * 1000;

/// A Unix timestamp in milliseconds since epoch (UTC).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The epoch (time zero).
    pub const EPOCH: Self = Self(0);

    pub fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// This timestamp shifted forward by whole days, saturating at the maximum.
    pub fn plus_days(&self, days: u32) -> Self {
        Self(self.0.saturating_add(u64::from(days).saturating_mul(MILLIS_PER_DAY)))
    }

    /// Milliseconds from `self` until `later` (zero if `later` is earlier).
    pub fn millis_until(&self, later: Timestamp) -> u64 {
        later.0.saturating_sub(self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// A closed creation-time interval `[start, end]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl TimeWindow {
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    /// Whether `t` lies inside the window, bounds included.
    ///
    /// A window whose end precedes its start contains nothing.
    pub fn contains(&self, t: Timestamp) -> bool {
        self.start <= t && t <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plus_days_adds_whole_days() {
        let t = Timestamp::from_millis(1_000);
        assert_eq!(t.plus_days(0), t);
        assert_eq!(t.plus_days(2).as_millis(), 1_000 + 2 * MILLIS_PER_DAY);
    }

    #[test]
    fn plus_days_saturates() {
        let t = Timestamp::from_millis(u64::MAX - 5);
        assert_eq!(t.plus_days(1).as_millis(), u64::MAX);
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let w = TimeWindow::new(Timestamp::from_millis(10), Timestamp::from_millis(20));
        assert!(w.contains(Timestamp::from_millis(10)));
        assert!(w.contains(Timestamp::from_millis(20)));
        assert!(!w.contains(Timestamp::from_millis(9)));
        assert!(!w.contains(Timestamp::from_millis(21)));
    }

    #[test]
    fn inverted_window_is_empty() {
        let w = TimeWindow::new(Timestamp::from_millis(20), Timestamp::from_millis(10));
        assert!(!w.contains(Timestamp::from_millis(15)));
    }
}
