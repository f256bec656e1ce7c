//! The compiler collaborator interface.

use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use ferrule_source::{ImportContents, SourceSet};

use crate::error::InvocationError;

/// Answers import lookups while a source is being compiled.
pub trait ImportResolver: Send + Sync {
    /// Returns the contents of the source an import path refers to.
    ///
    /// Unknown imports yield `contents: None`; reporting them is up to the
    /// compiler.
    fn find_import(&self, import_path: &str) -> ImportContents;
}

impl ImportResolver for SourceSet {
    fn find_import(&self, import_path: &str) -> ImportContents {
        SourceSet::find_import(self, import_path)
    }
}

/// Sources handed to one compiler invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerInput {
    /// Source text keyed by file name.
    pub sources: BTreeMap<String, String>,
    /// Whether the optimizer is enabled.
    pub optimizer_enabled: bool,
}

impl CompilerInput {
    /// Input holding a single file.
    pub fn single(
        file_name: impl Into<String>,
        source: impl Into<String>,
        optimizer_enabled: bool,
    ) -> Self {
        let mut sources = BTreeMap::new();
        sources.insert(file_name.into(), source.into());
        Self {
            sources,
            optimizer_enabled,
        }
    }
}

/// One compiled contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledContract {
    /// JSON ABI, as a string.
    pub interface: String,
    /// Hex creation bytecode, without a `0x` prefix.
    pub bytecode: String,
}

/// The result of one compiler invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilerOutput {
    /// Compiled contracts keyed by `<file>:<Contract>`.
    pub contracts: BTreeMap<String, CompiledContract>,
    /// Raw diagnostic messages, in compiler order.
    pub errors: Vec<String>,
}

/// A Solidity compiler that can be invoked with a specific binary.
#[async_trait]
pub trait SolidityCompiler: Send + Sync {
    /// Compiles `input` with the compiler at `binary`.
    ///
    /// Source-level problems are returned as diagnostics in
    /// [`CompilerOutput::errors`], not as an `Err`.
    async fn compile(
        &self,
        binary: &Path,
        input: &CompilerInput,
        imports: &dyn ImportResolver,
    ) -> Result<CompilerOutput, InvocationError>;
}
