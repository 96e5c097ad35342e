//! Run Cascade use case.
//!
//! The cascade controller: routes one task through the tiers until a backend
//! completes it or the session runs out of tiers (or attempts).
//!
//! The walk itself is decided by [`CascadeSession`]; this use case performs the
//! side effects around it - cooldown waits, invocations, attempt records and
//! progress callbacks.

use crate::config::CascadeParams;
use crate::ports::attempt_logger::{AttemptLogger, AttemptRecord, NoAttemptLogger};
use crate::ports::invoker::Invoker;
use crate::ports::progress::{CascadeProgressNotifier, NoProgress};
use crate::ports::sleeper::Sleeper;
use cascade_domain::{
    CascadeSession, CascadeTask, Completion, DomainError, ExhaustionReason, Outcome, Step, Tier,
    TierMap, preview,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

/// Errors that end a cascade session without a completion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CascadeError {
    #[error("Invalid cascade policy: {0}")]
    InvalidPolicy(#[from] DomainError),

    #[error("No tier produced a completion after {count} attempt(s): {reason}", count = .attempts.len())]
    Exhausted {
        /// Tiers invoked, in order.
        attempts: Vec<Tier>,
        reason: ExhaustionReason,
    },
}

impl CascadeError {
    /// Tiers invoked before the session ended.
    pub fn attempts(&self) -> &[Tier] {
        match self {
            CascadeError::InvalidPolicy(_) => &[],
            CascadeError::Exhausted { attempts, .. } => attempts,
        }
    }
}

/// Input for the [`RunCascadeUseCase`].
#[derive(Debug, Clone)]
pub struct RunCascadeInput {
    /// Raw requested start tier; clamped into range before the walk.
    pub start_tier: i64,
    pub task: CascadeTask,
    /// Correlates tracing events and attempt records of one task.
    pub task_id: String,
}

impl RunCascadeInput {
    pub fn new(start_tier: i64, task: CascadeTask) -> Self {
        Self {
            start_tier,
            task,
            task_id: Uuid::new_v4().to_string(),
        }
    }

    pub fn with_task_id(mut self, task_id: impl Into<String>) -> Self {
        self.task_id = task_id.into();
        self
    }
}

/// Result of a session that produced a completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeReport {
    pub task_id: String,
    pub completion: Completion,
    /// Tiers invoked, in order; the last one produced the completion.
    pub attempts: Vec<Tier>,
    pub total_cooldown: Duration,
}

/// Use case for routing one task through the tiers.
///
/// One call to [`execute`](Self::execute) is one session. Sessions share
/// nothing but the read-only [`TierMap`] and the ports, so any number of them
/// may run concurrently on the same use case value.
pub struct RunCascadeUseCase {
    tier_map: Arc<TierMap>,
    invoker: Arc<dyn Invoker>,
    sleeper: Arc<dyn Sleeper>,
    attempt_logger: Arc<dyn AttemptLogger>,
    params: CascadeParams,
}

impl Clone for RunCascadeUseCase {
    fn clone(&self) -> Self {
        Self {
            tier_map: self.tier_map.clone(),
            invoker: self.invoker.clone(),
            sleeper: self.sleeper.clone(),
            attempt_logger: self.attempt_logger.clone(),
            params: self.params.clone(),
        }
    }
}

impl RunCascadeUseCase {
    pub fn new(
        tier_map: Arc<TierMap>,
        invoker: Arc<dyn Invoker>,
        sleeper: Arc<dyn Sleeper>,
    ) -> Self {
        Self {
            tier_map,
            invoker,
            sleeper,
            attempt_logger: Arc::new(NoAttemptLogger),
            params: CascadeParams::default(),
        }
    }

    pub fn with_params(mut self, params: CascadeParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_attempt_logger(mut self, logger: Arc<dyn AttemptLogger>) -> Self {
        self.attempt_logger = logger;
        self
    }

    pub fn params(&self) -> &CascadeParams {
        &self.params
    }

    pub fn tier_map(&self) -> &TierMap {
        &self.tier_map
    }

    /// Route `task` starting at `start_tier` and return the first completion.
    pub async fn run(&self, start_tier: i64, task: CascadeTask) -> Result<Completion, CascadeError> {
        self.execute(RunCascadeInput::new(start_tier, task))
            .await
            .map(|report| report.completion)
    }

    pub async fn execute(&self, input: RunCascadeInput) -> Result<CascadeReport, CascadeError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute one session with progress callbacks.
    pub async fn execute_with_progress(
        &self,
        input: RunCascadeInput,
        progress: &dyn CascadeProgressNotifier,
    ) -> Result<CascadeReport, CascadeError> {
        self.params.validate()?;

        let session = CascadeSession::from_requested(input.start_tier, self.params.policy);
        let span = info_span!(
            "cascade.session",
            task_id = %input.task_id,
            start_tier = session.start().get(),
            strategy = %self.params.policy.strategy,
        );

        self.walk(session, input, progress).instrument(span).await
    }

    async fn walk(
        &self,
        mut session: CascadeSession,
        input: RunCascadeInput,
        progress: &dyn CascadeProgressNotifier,
    ) -> Result<CascadeReport, CascadeError> {
        let start = session.start();
        if i64::from(start.get()) != input.start_tier {
            debug!("Requested tier {} resolved to {}", input.start_tier, start);
        }
        info!(
            "Starting cascade at tier {}: {}",
            start,
            preview(&input.task.prompt, self.params.log_preview_chars)
        );
        progress.on_session_start(start, self.params.policy.strategy);

        loop {
            let (tier, cooldown) = match session.next_step() {
                Step::Invoke { tier, cooldown } => (tier, cooldown),
                Step::Exhausted(reason) => {
                    let attempts = session.attempts().to_vec();
                    warn!(
                        attempts = attempts.len(),
                        "Cascade ended without a completion: {}", reason
                    );
                    progress.on_session_end(false, attempts.len());
                    return Err(CascadeError::Exhausted { attempts, reason });
                }
            };

            if let Some(delay) = cooldown {
                debug!("Cooling down {}ms before tier {}", delay.as_millis(), tier);
                progress.on_cooldown(delay);
                self.sleeper.sleep(delay).await;
            }

            let backend = self.tier_map.backend(tier);
            progress.on_attempt_start(tier, backend);

            let started = Instant::now();
            let outcome = self.invoker.invoke(tier, &input.task).await;
            let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

            let record = AttemptRecord {
                task_id: input.task_id.clone(),
                attempt: session.attempts().len(),
                tier,
                provider: backend.provider,
                model: backend.model.clone(),
                outcome: outcome.kind(),
                rate_limited: outcome.is_rate_limited(),
                reason: match &outcome {
                    Outcome::Failed { reason, .. } => {
                        Some(preview(reason, self.params.log_preview_chars))
                    }
                    _ => None,
                },
                elapsed_ms,
                cooldown_ms: cooldown.map_or(0, |d| d.as_millis() as u64),
            };

            info!(
                tier = tier.get(),
                provider = %backend.provider,
                model = %backend.model,
                outcome = %record.outcome,
                elapsed_ms,
                "cascade attempt"
            );
            if let Some(reason) = &record.reason {
                debug!(tier = tier.get(), rate_limited = record.rate_limited, "{}", reason);
            }

            self.attempt_logger.log(&record);
            progress.on_attempt_complete(&record);
            session.record(&outcome);

            if let Outcome::Completed(completion) = outcome {
                let attempts = session.attempts().to_vec();
                info!(
                    "Tier {} completed the task after {} attempt(s)",
                    tier,
                    attempts.len()
                );
                progress.on_session_end(true, attempts.len());
                return Ok(CascadeReport {
                    task_id: input.task_id,
                    completion,
                    attempts,
                    total_cooldown: session.total_cooldown(),
                });
            }
        }
    }
}
