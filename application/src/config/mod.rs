//! Application-level configuration.
//!
//! - [`CascadeParams`] - controller loop control (walk policy, log previews)

pub mod cascade_params;

pub use cascade_params::CascadeParams;
