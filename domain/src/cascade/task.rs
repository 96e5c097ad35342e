//! Task payload and completion package

use crate::tiers::{BackendIdentity, Tier};
use serde::{Deserialize, Serialize};

/// The work a session tries to get done.
///
/// Opaque to the cascade policy; only backends look inside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeTask {
    /// User-facing prompt
    pub prompt: String,
    /// Optional system instruction sent ahead of the prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
}

impl CascadeTask {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system: None,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

/// Final answer of a session: the package carried by a `Completed` outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub output: String,
    pub tier: Tier,
    pub backend: BackendIdentity,
}

impl Completion {
    pub fn new(output: impl Into<String>, tier: Tier, backend: BackendIdentity) -> Self {
        Self {
            output: output.into(),
            tier,
            backend,
        }
    }
}
