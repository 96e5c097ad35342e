//! Port for structured attempt logging.
//!
//! Defines the [`AttemptLogger`] trait for recording one [`AttemptRecord`] per
//! backend invocation, so escalation paths can be reconstructed after the fact.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures a machine-readable
//! trail (JSONL) of every attempt.

use cascade_domain::{OutcomeKind, ProviderKind, Tier};
use serde::Serialize;

/// One invocation of one tier within a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttemptRecord {
    pub task_id: String,
    /// 1-based position of this attempt in the session.
    pub attempt: usize,
    pub tier: Tier,
    pub provider: ProviderKind,
    pub model: String,
    pub outcome: OutcomeKind,
    pub rate_limited: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub elapsed_ms: u64,
    /// Cooldown waited right before this attempt.
    pub cooldown_ms: u64,
}

/// Port for persisting attempt records.
///
/// The `log` method is synchronous and non-fallible: logging failures must not
/// disturb a running session.
pub trait AttemptLogger: Send + Sync {
    fn log(&self, record: &AttemptRecord);
}

/// No-op implementation for tests and when attempt logging is disabled.
pub struct NoAttemptLogger;

impl AttemptLogger for NoAttemptLogger {
    fn log(&self, _record: &AttemptRecord) {}
}
