//! Wall-clock helpers.
//!
//! # Responsibility
//! - Provide the single epoch-milliseconds source used for every stored
//!   timestamp.
//!
//! # Invariants
//! - Timestamps are non-negative epoch milliseconds.

use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds in one day. Used for relative seed deadlines.
pub const DAY_MS: i64 = 86_400_000;

/// Returns the current wall-clock time in epoch milliseconds.
///
/// A clock set before the Unix epoch yields `0` rather than an error; the
/// state layer has no use for pre-epoch time.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as i64)
}
