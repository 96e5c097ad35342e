//! Configuration file loading for tier-cascade
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables `TIER_CASCADE_*`
//! 2. `--config <path>` specified file
//! 3. Project root: `./tier-cascade.toml` or `./.tier-cascade.toml`
//! 4. Global: `$XDG_CONFIG_HOME/tier-cascade/config.toml`
//! 5. Default values

mod error;
mod file_config;
mod issue;
mod loader;

pub use error::ConfigError;
pub use file_config::{
    FileCascadeConfig, FileConfig, FileProviderConfig, FileProvidersConfig, FileServerConfig,
    FileTierConfig, FileTimeoutsConfig, ProviderSettings,
};
pub use issue::{ConfigIssue, Severity};
pub use loader::ConfigLoader;
