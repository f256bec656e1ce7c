//! Fingerprint-cached, per-network compilation of a whole source set.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use ferrule_artifact::{is_stale, merge, ArtifactStore, NetworkRecord};
use ferrule_common::{Fingerprint, NetworkId};
use ferrule_diagnostics::{CompilerDiagnostic, DiagnosticSink};
use ferrule_source::SourceSet;
use tokio::task::JoinSet;

use crate::backend::{CompilerInput, SolidityCompiler};
use crate::error::CompileError;
use crate::table::CompilerTable;
use crate::version::{contract_name, parse_solidity_version};

/// Source of `updated_at` timestamps, in milliseconds since the Unix epoch.
pub type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

/// Build inputs that form the cache key alongside the source fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileSettings {
    /// Network whose record is compiled.
    pub network: NetworkId,
    /// Whether the optimizer is enabled.
    pub optimizer_enabled: bool,
}

/// What happened to one contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileOutcome {
    /// The record was stale and has been recompiled and saved.
    Compiled,
    /// The existing record was up to date.
    Skipped,
}

/// Summary of a [`CompilationEngine::compile_all`] run.
#[derive(Debug, Default)]
pub struct CompileReport {
    /// Contracts that were recompiled, sorted.
    pub compiled: Vec<String>,
    /// Contracts whose record was already current, sorted.
    pub skipped: Vec<String>,
    /// Contracts that failed, with the reason, sorted by source name.
    pub failures: Vec<(String, CompileError)>,
    /// Deduplicated compiler diagnostics from the whole run.
    pub diagnostics: Vec<CompilerDiagnostic>,
    /// Number of distinct error-severity diagnostics.
    pub error_count: usize,
}

impl CompileReport {
    /// Returns `true` if no contract failed and the compiler reported no
    /// errors.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && self.error_count == 0
    }
}

/// Compiles sources for one network, reusing up-to-date artifact records.
///
/// The engine is cheap to clone; clones share the source set, compiler table,
/// backend and diagnostics sink. Each contract writes only its own artifact
/// file, so contracts compile concurrently.
#[derive(Clone)]
pub struct CompilationEngine {
    sources: Arc<SourceSet>,
    store: ArtifactStore,
    compilers: Arc<CompilerTable>,
    backend: Arc<dyn SolidityCompiler>,
    settings: CompileSettings,
    diagnostics: Arc<DiagnosticSink>,
    clock: Clock,
}

impl CompilationEngine {
    /// Creates an engine over a fully resolved source set.
    pub fn new(
        sources: SourceSet,
        store: ArtifactStore,
        compilers: CompilerTable,
        backend: Arc<dyn SolidityCompiler>,
        settings: CompileSettings,
    ) -> Self {
        Self {
            sources: Arc::new(sources),
            store,
            compilers: Arc::new(compilers),
            backend,
            settings,
            diagnostics: Arc::new(DiagnosticSink::new()),
            clock: Arc::new(|| chrono::Utc::now().timestamp_millis()),
        }
    }

    /// Replaces the timestamp source.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Compiles every source in the set.
    ///
    /// Creates the artifacts directory first. A failure in one contract is
    /// recorded in the report and does not stop the others. Diagnostics are
    /// drained into the report once every contract has finished.
    pub async fn compile_all(&self) -> Result<CompileReport, CompileError> {
        self.store.ensure_dir().await?;

        let mut tasks = JoinSet::new();
        let mut names = HashMap::new();
        for name in self.sources.names() {
            let engine = self.clone();
            let file = name.to_string();
            let handle = tasks.spawn(async move { engine.compile_contract(&file).await });
            names.insert(handle.id(), name.to_string());
        }

        let mut report = CompileReport::default();
        while let Some(joined) = tasks.join_next_with_id().await {
            let (id, result) = match joined {
                Ok((id, result)) => (id, result),
                Err(e) => (
                    e.id(),
                    Err(CompileError::Aborted {
                        reason: e.to_string(),
                    }),
                ),
            };
            let name = names.remove(&id).unwrap_or_default();
            match result {
                Ok(CompileOutcome::Compiled) => {
                    report.compiled.push(contract_name(&name).to_string())
                }
                Ok(CompileOutcome::Skipped) => {
                    report.skipped.push(contract_name(&name).to_string())
                }
                Err(e) => {
                    tracing::error!("{name}: {e}");
                    report.failures.push((name, e));
                }
            }
        }

        report.compiled.sort();
        report.skipped.sort();
        report.failures.sort_by(|a, b| a.0.cmp(&b.0));
        report.error_count = self.diagnostics.error_count();
        report.diagnostics = self.diagnostics.take_all();
        Ok(report)
    }

    /// Compiles one source, identified by base name, if its record is stale.
    ///
    /// Steps run strictly in order: read the existing artifact, decide
    /// staleness, pick the compiler, compile, merge, write.
    pub async fn compile_contract(&self, base_name: &str) -> Result<CompileOutcome, CompileError> {
        let source = self
            .sources
            .get(base_name)
            .ok_or_else(|| CompileError::UnknownSource {
                file: base_name.to_string(),
            })?;
        let name = contract_name(base_name);
        let CompileSettings {
            network,
            optimizer_enabled,
        } = self.settings;

        let fingerprint = Fingerprint::of(&source.content);
        let existing = self.store.load(name).await;
        let current = existing.as_ref().and_then(|a| a.network(network));
        if !is_stale(current, &fingerprint, optimizer_enabled) {
            tracing::debug!("{base_name} is up to date for network {network}");
            return Ok(CompileOutcome::Skipped);
        }

        let version = parse_solidity_version(&source.content).ok_or_else(|| {
            CompileError::MissingVersion {
                contract: name.to_string(),
            }
        })?;
        let binary = self.binary_for(name, version)?;

        if let Some(record) = current.filter(|r| r.is_deployed()) {
            tracing::warn!(
                "{name} changed since it was deployed on network {network}; \
                 recompiling drops the recorded address {}",
                record.address.as_deref().unwrap_or_default()
            );
        }
        tracing::info!("Compiling {base_name}...");
        let input = CompilerInput::single(base_name, source.content.as_str(), optimizer_enabled);
        let output = self
            .backend
            .compile(binary, &input, self.sources.as_ref())
            .await
            .map_err(|e| CompileError::Compiler {
                contract: name.to_string(),
                source: e,
            })?;
        for message in &output.errors {
            self.diagnostics.emit(message);
        }

        let identifier = format!("{base_name}:{name}");
        let compiled = output.contracts.get(&identifier).ok_or_else(|| {
            CompileError::MissingContractOutput {
                contract: name.to_string(),
                identifier: identifier.clone(),
            }
        })?;
        let abi: serde_json::Value =
            serde_json::from_str(&compiled.interface).map_err(|e| CompileError::InvalidAbi {
                contract: name.to_string(),
                reason: e.to_string(),
            })?;

        let record = NetworkRecord {
            compiler_version: version.to_string(),
            source_fingerprint: fingerprint,
            optimizer_enabled,
            abi,
            unlinked_binary: format!("0x{}", compiled.bytecode.trim_start_matches("0x")),
            updated_at: (self.clock)(),
            address: None,
            constructor_args: None,
        };
        let artifact = merge(existing, name, network, record);
        self.store.save(&artifact).await?;
        tracing::info!("{base_name} artifact saved!");
        Ok(CompileOutcome::Compiled)
    }

    fn binary_for(&self, contract: &str, version: &str) -> Result<&Path, CompileError> {
        self.compilers
            .resolve(version)
            .ok_or_else(|| CompileError::UnknownVersion {
                contract: contract.to_string(),
                version: version.to_string(),
            })
    }
}
