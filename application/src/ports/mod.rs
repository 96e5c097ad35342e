//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod attempt_logger;
pub mod authorizer;
pub mod invoker;
pub mod progress;
pub mod sleeper;
