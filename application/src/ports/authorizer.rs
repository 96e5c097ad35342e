//! Authorization port
//!
//! Checked once per incoming task, before any cascade session exists.

/// Decides whether a caller-supplied credential may start a session.
pub trait Authorizer: Send + Sync {
    fn authorize(&self, token: &str) -> bool;
}
