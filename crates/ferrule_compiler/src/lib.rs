//! The compilation cache engine.
//!
//! [`CompilationEngine`] compiles every discovered Solidity source for one
//! target network, skipping contracts whose artifact already holds a record
//! with the same source fingerprint and optimizer setting. Compiled records
//! are merged into the contract's artifact without disturbing other
//! networks. The compiler itself sits behind the [`SolidityCompiler`] trait;
//! [`SolcStandardJson`] drives a native `solc` binary.

#![warn(missing_docs)]

pub mod backend;
pub mod engine;
pub mod error;
pub mod solc;
pub mod table;
pub mod version;

pub use backend::{
    CompiledContract, CompilerInput, CompilerOutput, ImportResolver, SolidityCompiler,
};
pub use engine::{Clock, CompilationEngine, CompileOutcome, CompileReport, CompileSettings};
pub use error::{CompileError, InvocationError};
pub use solc::SolcStandardJson;
pub use table::CompilerTable;
pub use version::{contract_name, parse_solidity_version};
