//! Error types for deployment.

use std::path::PathBuf;

use ferrule_artifact::ArtifactError;

/// Failures reported by the chain collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    /// A JSON-RPC request failed.
    #[error("RPC error: {reason}")]
    Rpc {
        /// Transport or node error text.
        reason: String,
    },

    /// The creation transaction failed or created no contract.
    #[error("contract creation failed: {reason}")]
    Creation {
        /// Description of the failure.
        reason: String,
    },

    /// The creation notifications stopped before an address was reported.
    #[error("creation notifications ended without a confirmed address")]
    ConfirmationDropped,
}

/// Problems with constructor arguments.
#[derive(Debug, thiserror::Error)]
pub enum ArgumentError {
    /// The number of arguments does not match the constructor.
    #[error("constructor takes {expected} argument(s), {found} given")]
    Count {
        /// Constructor parameter count.
        expected: usize,
        /// Number of arguments supplied.
        found: usize,
    },

    /// A string argument could not be converted to its parameter type.
    #[error("argument {index} ({value:?}) is not a valid {ty}: {reason}")]
    Coerce {
        /// Zero-based argument position.
        index: usize,
        /// The supplied text.
        value: String,
        /// The expected Solidity type.
        ty: String,
        /// Parser error text.
        reason: String,
    },

    /// The values could not be ABI-encoded.
    #[error("ABI encoding failed: {reason}")]
    Encode {
        /// Encoder error text.
        reason: String,
    },
}

/// Errors that fail the deployment of a single contract.
///
/// When any of these is returned, the contract's artifact is unchanged.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// The artifact or its record for the network is missing.
    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    /// The stored ABI could not be parsed.
    #[error("invalid ABI in artifact for {contract}: {reason}")]
    InvalidAbi {
        /// The contract name.
        contract: String,
        /// Parser error text.
        reason: String,
    },

    /// The stored bytecode is not plain hex (for example, unlinked libraries).
    #[error("invalid bytecode in artifact for {contract}: {reason}")]
    InvalidBytecode {
        /// The contract name.
        contract: String,
        /// Decoder error text.
        reason: String,
    },

    /// The constructor arguments were rejected.
    #[error("invalid constructor arguments for {contract}: {source}")]
    ConstructorArgs {
        /// The contract name.
        contract: String,
        /// What was wrong with them.
        source: ArgumentError,
    },

    /// No sender was configured and the node reported no accounts.
    #[error("no account available to deploy {contract}")]
    NoAccounts {
        /// The contract name.
        contract: String,
    },

    /// The chain rejected or failed the deployment.
    #[error("deployment of {contract} failed: {source}")]
    Chain {
        /// The contract name.
        contract: String,
        /// The chain failure.
        source: ChainError,
    },

    /// A `$Name` argument refers to a contract not deployed in this run.
    #[error("argument {reference} of {contract} refers to a contract not deployed in this run")]
    UnresolvedReference {
        /// The contract being deployed.
        contract: String,
        /// The unresolved `$Name` argument.
        reference: String,
    },
}

/// Errors loading a migration plan.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// The plan file could not be read.
    #[error("failed to read migration plan {}: {source}", .path.display())]
    Io {
        /// The plan file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The plan file is not a valid plan.
    #[error("invalid migration plan: {reason}")]
    Parse {
        /// Parser error text.
        reason: String,
    },
}
