//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod handle_task;
pub mod run_cascade;
