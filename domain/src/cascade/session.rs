//! Cascade session - per-task walk state
//!
//! A [`CascadeSession`] is the pure transition function of the cascade. It
//! never performs I/O: the caller asks it for the next [`Step`], performs the
//! invocation, and feeds the [`Outcome`] back through [`CascadeSession::record`].
//!
//! ```text
//!   next_step() ──► Invoke { tier, cooldown } ──► invoke ──► record(outcome)
//!        ▲                                                        │
//!        └────────────────────────────────────────────────────────┘
//!   next_step() ──► Exhausted(reason)          (session over, no completion)
//! ```
//!
//! The walk is a loop over a bounded visited set, so stack depth stays
//! constant and every tier is invoked at most once per session.

use super::outcome::Outcome;
use super::policy::{CascadePolicy, EscalationStrategy};
use crate::tiers::Tier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;

/// Why a session ended without a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustionReason {
    /// The walk ran out of tiers to try.
    TiersExhausted,
    /// The per-session attempt cap was reached.
    AttemptBudgetSpent,
}

impl std::fmt::Display for ExhaustionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExhaustionReason::TiersExhausted => write!(f, "no tier left to try"),
            ExhaustionReason::AttemptBudgetSpent => write!(f, "attempt budget spent"),
        }
    }
}

/// What the caller should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Wait `cooldown` (if any), then invoke `tier`.
    Invoke {
        tier: Tier,
        cooldown: Option<Duration>,
    },
    /// Stop: no completion will be produced.
    Exhausted(ExhaustionReason),
}

/// Walk state of one task. Not shared between tasks.
#[derive(Debug, Clone)]
pub struct CascadeSession {
    policy: CascadePolicy,
    start: Tier,
    /// Candidate for the next invocation; may be out of range.
    cursor: Option<i64>,
    /// Tier the last `next_step` handed out and `record` has not consumed yet.
    current: Option<Tier>,
    visited: BTreeSet<Tier>,
    attempts: Vec<Tier>,
    /// ZigZag: where the climb continues once the retreat branch ends.
    resume: Option<i64>,
    retreated: bool,
    /// Sweep: the last outcome was a deferral below the top tier.
    climbing_after: Option<Tier>,
    consecutive_rate_limits: u32,
    pending_cooldown: Option<Duration>,
    total_cooldown: Duration,
    completed: bool,
}

impl CascadeSession {
    pub fn new(start: Tier, policy: CascadePolicy) -> Self {
        Self {
            policy,
            start,
            cursor: Some(start.get() as i64),
            current: None,
            visited: BTreeSet::new(),
            attempts: Vec::with_capacity(Tier::MAX as usize),
            resume: None,
            retreated: false,
            climbing_after: None,
            consecutive_rate_limits: 0,
            pending_cooldown: None,
            total_cooldown: Duration::ZERO,
            completed: false,
        }
    }

    /// Start a session from raw caller input, clamping it into range.
    pub fn from_requested(requested: i64, policy: CascadePolicy) -> Self {
        Self::new(Tier::clamp(requested), policy)
    }

    pub fn start(&self) -> Tier {
        self.start
    }

    pub fn policy(&self) -> &CascadePolicy {
        &self.policy
    }

    /// Tiers invoked so far, in order.
    pub fn attempts(&self) -> &[Tier] {
        &self.attempts
    }

    pub fn has_visited(&self, tier: Tier) -> bool {
        self.visited.contains(&tier)
    }

    /// Sum of cooldowns handed out with [`Step::Invoke`].
    pub fn total_cooldown(&self) -> Duration {
        self.total_cooldown
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Decide the next invocation, or end the session.
    ///
    /// The returned tier is marked visited and counted against the attempt
    /// budget immediately.
    pub fn next_step(&mut self) -> Step {
        if self.completed {
            return Step::Exhausted(ExhaustionReason::TiersExhausted);
        }

        let candidate = match self.policy.strategy {
            EscalationStrategy::ZigZag => self.pick_zigzag(),
            EscalationStrategy::Sweep => self.pick_sweep(),
        };
        let Some(tier) = candidate else {
            return Step::Exhausted(ExhaustionReason::TiersExhausted);
        };

        if let Some(max) = self.policy.max_attempts
            && self.attempts.len() >= max
        {
            return Step::Exhausted(ExhaustionReason::AttemptBudgetSpent);
        }

        self.visited.insert(tier);
        self.attempts.push(tier);
        self.current = Some(tier);
        self.cursor = None;

        let cooldown = self.pending_cooldown.take();
        if let Some(delay) = cooldown {
            self.total_cooldown += delay;
        }

        Step::Invoke { tier, cooldown }
    }

    /// Feed back the outcome of the tier returned by the last [`next_step`](Self::next_step).
    pub fn record(&mut self, outcome: &Outcome) {
        let Some(tier) = self.current.take() else {
            return;
        };
        let here = tier.get() as i64;

        if outcome.is_rate_limited() {
            self.consecutive_rate_limits += 1;
            self.pending_cooldown = self.policy.cooldown.delay_for(self.consecutive_rate_limits);
        } else {
            self.consecutive_rate_limits = 0;
            self.pending_cooldown = None;
        }

        self.climbing_after = None;

        match (self.policy.strategy, outcome) {
            (_, Outcome::Completed(_)) => {
                self.completed = true;
            }
            (EscalationStrategy::ZigZag, Outcome::Deferred) => {
                self.cursor = Some(here + 1);
            }
            (EscalationStrategy::ZigZag, Outcome::Failed { .. }) => {
                if tier == self.start && !self.retreated && self.start.down().is_some() {
                    self.retreated = true;
                    self.cursor = Some(here - 1);
                    self.resume = Some(here + 1);
                } else {
                    self.cursor = Some(here + 1);
                }
            }
            (EscalationStrategy::Sweep, Outcome::Deferred) if !tier.is_highest() => {
                self.climbing_after = Some(tier);
                self.cursor = Some(here + 1);
            }
            (EscalationStrategy::Sweep, Outcome::Deferred | Outcome::Failed { .. }) => {
                self.cursor = Some(here - 1);
            }
        }
    }

    fn pick_zigzag(&mut self) -> Option<Tier> {
        loop {
            let candidate = self
                .cursor
                .take()
                .and_then(Tier::from_i64)
                .filter(|tier| !self.has_visited(*tier));
            if candidate.is_some() {
                return candidate;
            }
            // Branch ended; fall back to the climb above the start tier.
            self.cursor = Some(self.resume.take()?);
        }
    }

    fn pick_sweep(&mut self) -> Option<Tier> {
        if self.visited.len() >= Tier::MAX as usize {
            return None;
        }
        let cursor = self
            .cursor
            .take()
            .unwrap_or(self.start.get() as i64)
            .clamp(Tier::MIN as i64, Tier::MAX as i64);
        let here = Tier::from_i64(cursor)?;

        if let Some(deferred) = self.climbing_after {
            // A deferral only ever moves the walk upward.
            return Tier::all().find(|t| *t > deferred && !self.has_visited(*t));
        }

        if !self.has_visited(here) {
            return Some(here);
        }
        (1..Tier::MAX as i64)
            .flat_map(|offset| [cursor - offset, cursor + offset])
            .filter_map(Tier::from_i64)
            .find(|t| !self.has_visited(*t))
    }
}
