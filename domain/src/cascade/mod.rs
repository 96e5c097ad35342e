//! The cascade: outcomes, policy and per-session walk state.
//!
//! - [`outcome::Outcome`] - classified result of one invocation
//! - [`policy::CascadePolicy`] - strategy, attempt cap, cooldown
//! - [`session::CascadeSession`] - the pure tier-selection state machine

pub mod outcome;
pub mod policy;
pub mod session;
pub mod task;

pub use outcome::{Outcome, OutcomeKind};
pub use policy::{CascadePolicy, CooldownPolicy, EscalationStrategy};
pub use session::{CascadeSession, ExhaustionReason, Step};
pub use task::{CascadeTask, Completion};
