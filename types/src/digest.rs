//! Versioned artifact keys for cached stage outputs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-byte digest naming one cached stage artifact.
///
/// Keys are derived from the canonical encoding of the parameters that
/// produced the artifact, so two runs with equal parameters share a key and
/// runs with different parameters never collide.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ArtifactKey([u8; 32]);

impl ArtifactKey {
    pub const ZERO: Self = Self([0u8; 32]);

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Short prefix used in log lines.
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Debug for ArtifactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArtifactKey({})", self.short())
    }
}

impl fmt::Display for ArtifactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_full_hex() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0xab;
        let key = ArtifactKey::new(bytes);
        let s = key.to_string();
        assert_eq!(s.len(), 64);
        assert!(s.starts_with("ab00"));
        assert_eq!(key.short(), "ab000000");
    }
}
