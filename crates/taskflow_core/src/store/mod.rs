//! Application state stores.
//!
//! # Responsibility
//! - Hold all application state in memory and mirror every change to the
//!   repository layer.
//! - Surface user-visible notices and task side-effect events explicitly
//!   instead of through hidden cross-store calls.
//!
//! # Invariants
//! - Stores are explicit context objects created at application start; there
//!   is no module-level singleton state.
//! - A failed operation leaves the prior in-memory and persisted state
//!   unchanged.
//! - Execution is single-threaded; operations never interleave.

use std::thread;
use std::time::Duration;

pub mod app;
pub mod event;
pub mod identity;
pub mod notice;
pub mod notifications;
pub mod tasks;

/// Simulated-latency configuration for store operations.
///
/// The delays stand in for network round-trips and are purely cosmetic; the
/// default is zero so library consumers and tests pay nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreConfig {
    /// Delay applied to login/register.
    pub auth_delay: Duration,
    /// Delay applied to task create/update/delete.
    pub task_delay: Duration,
}

impl StoreConfig {
    /// Demo preset with interactive pacing.
    pub fn demo() -> Self {
        Self {
            auth_delay: Duration::from_millis(1_000),
            task_delay: Duration::from_millis(500),
        }
    }
}

/// Sleeps for the configured delay; no-op when zero.
pub(crate) fn simulate_delay(delay: Duration) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}
