//! Numeric identifiers for deployment targets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A numeric network identifier (for example a chain ID: mainnet=1, kovan=42,
/// testrpc=50).
///
/// Serializes as a plain integer; as a JSON object key it becomes a string
/// (`"50"`), which is how artifact files store their `networks` map.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkId(u64);

impl NetworkId {
    /// Creates a network identifier from its numeric value.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the numeric value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for NetworkId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a string is not a valid network identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid network id '{0}': expected an unsigned integer")]
pub struct ParseNetworkIdError(String);

impl FromStr for NetworkId {
    type Err = ParseNetworkIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| ParseNetworkIdError(s.to_string()))
    }
}
