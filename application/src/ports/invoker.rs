//! Invoker port
//!
//! Defines the single operation the cascade controller needs from the outside
//! world: try one tier.

use async_trait::async_trait;
use cascade_domain::{CascadeTask, Outcome, Tier};

/// Performs one backend call for a tier.
///
/// Implementations (adapters) live in the infrastructure layer. They must
/// classify every transport and provider problem into [`Outcome::Failed`] and
/// enforce their own per-call timeout; the controller has no other way to
/// cancel a call.
#[async_trait]
pub trait Invoker: Send + Sync {
    async fn invoke(&self, tier: Tier, task: &CascadeTask) -> Outcome;
}
