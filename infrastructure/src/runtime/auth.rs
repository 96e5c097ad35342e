//! Static shared-token authorization.

use cascade_application::ports::authorizer::Authorizer;
use sha2::{Digest, Sha256};

/// Accepts exactly one configured token.
///
/// Only the SHA-256 digest of the token is kept. Incoming tokens are hashed
/// and the fixed-length digests compared without early exit, so neither the
/// token length nor a matching prefix is observable through timing.
pub struct StaticTokenAuthorizer {
    digest: [u8; 32],
}

impl StaticTokenAuthorizer {
    pub fn new(token: &str) -> Self {
        Self {
            digest: Sha256::digest(token.as_bytes()).into(),
        }
    }
}

impl Authorizer for StaticTokenAuthorizer {
    fn authorize(&self, token: &str) -> bool {
        if token.is_empty() {
            return false;
        }
        let candidate: [u8; 32] = Sha256::digest(token.as_bytes()).into();
        candidate
            .iter()
            .zip(self.digest.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}
