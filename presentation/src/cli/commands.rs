//! CLI command definitions

use crate::output::OutputFormat;
use cascade_domain::EscalationStrategy;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for tier-cascade
#[derive(Parser, Debug)]
#[command(name = "tier-cascade")]
#[command(author, version, about = "Route tasks across tiered AI backends, escalating on deferral or failure")]
#[command(long_about = r#"
tier-cascade sends a task to the backend of a requested tier (1 = cheapest,
10 = strongest). When a backend declines the task or fails, the task moves to
another tier until one completes it or every tier has been tried once.

Configuration files are loaded from (in priority order):
1. TIER_CASCADE_* environment variables
2. --config <path>          Explicit config file
3. ./tier-cascade.toml      Project-level config
4. ~/.config/tier-cascade/config.toml   Global config

Example:
  tier-cascade run --tier 3 "Summarise this changelog"
  tier-cascade serve --bind 0.0.0.0:8080
  tier-cascade tiers
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Walk strategy, overriding the config file
    #[arg(long, global = true, value_name = "STRATEGY", value_parser = parse_strategy)]
    pub strategy: Option<EscalationStrategy>,

    /// Maximum backend calls per task, overriding the config file
    #[arg(long, global = true, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: Option<u32>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Append one JSON line per backend call to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub attempt_log: Option<PathBuf>,

    /// Write diagnostic logs to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the task endpoint over HTTP
    Serve {
        /// Listen address, overriding `[server] bind`
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },

    /// Run one task locally and print the answer
    Run {
        /// Start tier; out-of-range values are folded into 1..=10
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        tier: i64,

        /// System instruction sent ahead of the prompt
        #[arg(short, long, value_name = "TEXT")]
        system: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        output: OutputFormat,

        /// The task prompt
        prompt: String,
    },

    /// Print the resolved tier table
    Tiers,
}

fn parse_strategy(value: &str) -> Result<EscalationStrategy, String> {
    value.parse().map_err(|e: cascade_domain::DomainError| e.to_string())
}
