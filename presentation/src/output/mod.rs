//! Output formatting for cascade results

pub mod console;

use clap::ValueEnum;

/// Output format for `run`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The answer followed by a short summary
    Text,
    /// A single JSON object, same shape as the HTTP response
    Json,
}
