//! Error types for artifact operations.

use std::path::PathBuf;

use ferrule_common::NetworkId;

/// Errors that can occur while reading, merging, or writing artifacts.
///
/// Reads on the compile path are fail-safe and never produce these; the
/// deploy path uses [`MissingArtifact`](Self::MissingArtifact) and
/// [`MissingNetwork`](Self::MissingNetwork) as hard preconditions.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    /// An I/O error occurred while writing an artifact or its directory.
    #[error("artifact I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The artifact could not be serialized.
    #[error("serialization error: {reason}")]
    Serialization {
        /// Description of the serialization failure.
        reason: String,
    },

    /// No readable artifact exists for the contract.
    #[error("artifact not found for contract {contract} at {path}: {reason}")]
    MissingArtifact {
        /// The contract name.
        contract: String,
        /// Where the artifact was expected.
        path: PathBuf,
        /// Why it could not be loaded.
        reason: String,
    },

    /// The artifact has no record for the requested network.
    #[error("data not found in artifact for contract {contract}: no record for network {network} (found: {found})")]
    MissingNetwork {
        /// The contract name.
        contract: String,
        /// The network that was requested.
        network: NetworkId,
        /// Comma-separated list of networks the artifact does have.
        found: String,
    },
}
