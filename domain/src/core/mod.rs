//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`] - domain-level errors
//! - [`text::preview`] - log-friendly text shortening

pub mod error;
pub mod text;
