//! Error types for the compilation cache engine.

use std::path::PathBuf;

use ferrule_artifact::ArtifactError;

/// Errors that fail the compilation of a single contract.
///
/// Every variant names the contract so the run summary can point at it.
/// None of these stop sibling contracts from compiling.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// The source set has no file with the requested base name.
    #[error("no source named {file} was discovered")]
    UnknownSource {
        /// The requested base file name.
        file: String,
    },

    /// The source carries no parseable `pragma solidity` directive.
    #[error("could not find Solidity version in source of {contract}")]
    MissingVersion {
        /// The contract name.
        contract: String,
    },

    /// The version directive names a compiler that is not in the table.
    #[error("no compiler binary for Solidity {version} (required by {contract})")]
    UnknownVersion {
        /// The contract name.
        contract: String,
        /// The version parsed from the source.
        version: String,
    },

    /// The compiler could not be run or produced unusable output.
    #[error("compiler failed for {contract}: {source}")]
    Compiler {
        /// The contract name.
        contract: String,
        /// The underlying invocation failure.
        source: InvocationError,
    },

    /// The compiler output lacks the expected `<file>:<Contract>` entry.
    #[error("compiler produced no output for {identifier} (contract {contract})")]
    MissingContractOutput {
        /// The contract name.
        contract: String,
        /// The identifier that was looked up.
        identifier: String,
    },

    /// The compiled ABI interface is not valid JSON.
    #[error("invalid ABI for {contract}: {reason}")]
    InvalidAbi {
        /// The contract name.
        contract: String,
        /// Parser error text.
        reason: String,
    },

    /// The compile task ended without producing a result.
    #[error("compile task aborted: {reason}")]
    Aborted {
        /// Why the task ended.
        reason: String,
    },

    /// Reading or writing the artifact failed.
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

/// Failures of a compiler backend invocation.
#[derive(Debug, thiserror::Error)]
pub enum InvocationError {
    /// The compiler binary could not be started or fed its input.
    #[error("could not run {}: {source}", .binary.display())]
    Spawn {
        /// The binary that was run.
        binary: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The compiler exited unsuccessfully.
    #[error("{} exited with {status}: {stderr}", .binary.display())]
    Exited {
        /// The binary that was run.
        binary: PathBuf,
        /// Exit status description.
        status: String,
        /// Captured standard error.
        stderr: String,
    },

    /// The compiler output could not be understood.
    #[error("malformed compiler output: {reason}")]
    MalformedOutput {
        /// Description of the problem.
        reason: String,
    },
}
