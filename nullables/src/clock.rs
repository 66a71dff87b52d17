//! Fixture timestamps.

use ces_types::time::MILLIS_PER_DAY;

/// Milliseconds at the start of day `n` after the epoch.
pub fn day(n: u64) -> u64 {
    n * MILLIS_PER_DAY
}
