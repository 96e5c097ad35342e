//! Console output formatter for cascade results

use crate::server::dto::TaskResponse;
use cascade_application::{CascadeError, CascadeReport};
use cascade_domain::{Tier, TierMap};
use colored::Colorize;

/// Formats cascade results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// The answer, then which tier produced it and the path taken.
    pub fn format_report(report: &CascadeReport) -> String {
        let completion = &report.completion;
        let mut output = String::new();

        output.push_str(&completion.output);
        output.push_str("\n\n");
        output.push_str(&format!(
            "{} tier {} ({})\n",
            "Answered by:".cyan().bold(),
            completion.tier,
            completion.backend
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Path:".cyan().bold(),
            Self::path(&report.attempts)
        ));
        if !report.total_cooldown.is_zero() {
            output.push_str(&format!(
                "{} {}ms\n",
                "Cooldown:".cyan().bold(),
                report.total_cooldown.as_millis()
            ));
        }

        output
    }

    pub fn format_error(error: &CascadeError) -> String {
        let mut output = format!("{} {}\n", "Error:".red().bold(), error);
        if !error.attempts().is_empty() {
            output.push_str(&format!(
                "{} {}\n",
                "Path:".cyan().bold(),
                Self::path(error.attempts())
            ));
        }
        output
    }

    /// Same envelope as `POST /v1/tasks`.
    pub fn format_json(result: &Result<CascadeReport, CascadeError>) -> String {
        let response = match result {
            Ok(report) => TaskResponse::completed(report),
            Err(error) => TaskResponse::exhausted(None, error),
        };
        serde_json::to_string_pretty(&response).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn format_tier_map(map: &TierMap) -> String {
        let mut output = format!("{}\n", format!("{:<6} {:<10} {}", "Tier", "Provider", "Model").bold());
        for (tier, backend) in map.iter() {
            output.push_str(&format!(
                "{:<6} {:<10} {}\n",
                tier.get(),
                backend.provider.as_str(),
                backend.model
            ));
        }
        output
    }

    fn path(attempts: &[Tier]) -> String {
        attempts
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}
