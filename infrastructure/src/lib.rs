//! Infrastructure layer for tier-cascade
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;
pub mod runtime;

// Re-export commonly used types
pub use config::{ConfigError, ConfigIssue, ConfigLoader, FileConfig, Severity};
pub use logging::JsonlAttemptLogger;
pub use providers::{ProviderAdapter, ProviderError, TierInvoker};
pub use runtime::{StaticTokenAuthorizer, TokioSleeper};
