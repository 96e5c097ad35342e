//! Application layer for tier-cascade
//!
//! This crate contains the cascade controller, its ports, and application
//! configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::CascadeParams;
pub use ports::{
    attempt_logger::{AttemptLogger, AttemptRecord, NoAttemptLogger},
    authorizer::Authorizer,
    invoker::Invoker,
    progress::{CascadeProgressNotifier, NoProgress},
    sleeper::{NoSleep, Sleeper},
};
pub use use_cases::handle_task::{HandleTaskError, HandleTaskUseCase, TaskReport, TaskRequest};
pub use use_cases::run_cascade::{
    CascadeError, CascadeReport, RunCascadeInput, RunCascadeUseCase,
};
