//! Cooldown delay port
//!
//! The controller waits between two invocations after a rate-limited failure.
//! Routing that wait through a port keeps the controller testable without real
//! wall-clock sleeps.

use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Suspend the calling session for `delay`.
    async fn sleep(&self, delay: Duration);
}

/// Skips every delay. For dry runs and tests.
pub struct NoSleep;

#[async_trait]
impl Sleeper for NoSleep {
    async fn sleep(&self, _delay: Duration) {}
}
