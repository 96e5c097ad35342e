//! Progress notification port
//!
//! Defines the interface for reporting progress while a cascade session walks
//! the tiers.

use super::attempt_logger::AttemptRecord;
use cascade_domain::{BackendIdentity, EscalationStrategy, Tier};
use std::time::Duration;

/// Callback for progress updates during a cascade session
///
/// Implementations live in the presentation layer and can display progress
/// in various ways (console, spinner, ...).
pub trait CascadeProgressNotifier: Send + Sync {
    /// Called once the start tier has been resolved
    fn on_session_start(&self, start: Tier, strategy: EscalationStrategy);

    /// Called right before a tier is invoked
    fn on_attempt_start(&self, tier: Tier, backend: &BackendIdentity);

    /// Called after each invocation with its record
    fn on_attempt_complete(&self, record: &AttemptRecord);

    /// Called before a rate-limit cooldown
    fn on_cooldown(&self, _delay: Duration) {}

    /// Called when the session ends, successfully or not
    fn on_session_end(&self, _success: bool, _attempts: usize) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl CascadeProgressNotifier for NoProgress {
    fn on_session_start(&self, _start: Tier, _strategy: EscalationStrategy) {}
    fn on_attempt_start(&self, _tier: Tier, _backend: &BackendIdentity) {}
    fn on_attempt_complete(&self, _record: &AttemptRecord) {}
}
