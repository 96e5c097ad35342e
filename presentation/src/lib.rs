//! Presentation layer for tier-cascade
//!
//! This crate contains CLI definitions, the HTTP surface, output formatters,
//! and progress reporters.

pub mod cli;
pub mod output;
pub mod progress;
pub mod server;

// Re-export commonly used types
pub use cli::commands::{Cli, Command};
pub use output::OutputFormat;
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
pub use server::{router, serve};
