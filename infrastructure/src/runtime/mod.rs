//! Runtime adapters: cooldown timer and caller authorization.

mod auth;
mod sleeper;

pub use auth::StaticTokenAuthorizer;
pub use sleeper::TokioSleeper;
