//! Progress reporting for cascade sessions

use cascade_application::{AttemptRecord, CascadeProgressNotifier};
use cascade_domain::{BackendIdentity, EscalationStrategy, OutcomeKind, Tier};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with a spinner per attempt
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn outcome_mark(record: &AttemptRecord) -> String {
        match record.outcome {
            OutcomeKind::Completed => format!("{} completed", "v".green()),
            OutcomeKind::Deferred => format!("{} deferred", "^".yellow()),
            OutcomeKind::Failed if record.rate_limited => {
                format!("{} rate limited", "x".red())
            }
            OutcomeKind::Failed => format!(
                "{} failed: {}",
                "x".red(),
                record.reason.as_deref().unwrap_or("unknown error")
            ),
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CascadeProgressNotifier for ProgressReporter {
    fn on_session_start(&self, start: Tier, strategy: EscalationStrategy) {
        eprintln!(
            "{} Starting at tier {} ({} strategy)",
            "->".cyan(),
            start.to_string().bold(),
            strategy
        );
    }

    fn on_attempt_start(&self, tier: Tier, backend: &BackendIdentity) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(format!("Tier {}", tier));
        pb.set_message(backend.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.spinner.lock() {
            *slot = Some(pb);
        }
    }

    fn on_attempt_complete(&self, record: &AttemptRecord) {
        let message = format!(
            "{}/{} {} ({}ms)",
            record.provider,
            record.model,
            Self::outcome_mark(record),
            record.elapsed_ms
        );
        match self.spinner.lock().ok().and_then(|mut slot| slot.take()) {
            Some(pb) => pb.finish_with_message(message),
            None => eprintln!("  Tier {} {}", record.tier, message),
        }
    }

    fn on_cooldown(&self, delay: Duration) {
        eprintln!(
            "  {} cooling down {}ms",
            "..".dimmed(),
            delay.as_millis()
        );
    }

    fn on_session_end(&self, success: bool, attempts: usize) {
        if !success {
            eprintln!(
                "{} No tier completed the task ({} attempts)",
                "x".red(),
                attempts
            );
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl CascadeProgressNotifier for SimpleProgress {
    fn on_session_start(&self, start: Tier, strategy: EscalationStrategy) {
        eprintln!("-> Starting at tier {} ({} strategy)", start, strategy);
    }

    fn on_attempt_start(&self, _tier: Tier, _backend: &BackendIdentity) {}

    fn on_attempt_complete(&self, record: &AttemptRecord) {
        eprintln!(
            "  tier {} {}/{}: {}",
            record.tier, record.provider, record.model, record.outcome
        );
    }
}
