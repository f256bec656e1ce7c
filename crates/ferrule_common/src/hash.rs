//! Content fingerprinting for compilation cache invalidation.

use alloy_primitives::{keccak256, B256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A keccak-256 hash of a single source file's raw bytes.
///
/// Only the file's own content is hashed; the content of its imports does
/// not contribute. Serialized as a `0x`-prefixed, 64-digit hex string.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(B256);

impl Fingerprint {
    /// Computes the fingerprint of a byte slice.
    pub fn of(data: impl AsRef<[u8]>) -> Self {
        Self(keccak256(data.as_ref()))
    }

    /// Returns the raw 32 hash bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0 .0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.as_bytes();
        write!(f, "Fingerprint(0x{:02x}{:02x}..)", bytes[0], bytes[1])
    }
}
