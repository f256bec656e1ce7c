//! `ferrule compile`: cached compilation of every contract for one network.

use std::sync::Arc;

use ferrule_artifact::ArtifactStore;
use ferrule_common::NetworkId;
use ferrule_compiler::{
    CompilationEngine, CompileReport, CompileSettings, CompilerTable, SolcStandardJson,
};
use ferrule_diagnostics::{DiagnosticRenderer, JsonRenderer, TerminalRenderer};

use crate::settings::ProjectSettings;
use crate::{CompileArgs, GlobalArgs, ReportFormat};

/// Runs the `ferrule compile` command.
///
/// Returns exit code 0 if every contract compiled or was up to date, 1 if
/// any contract failed or solc reported an error.
pub async fn run(
    args: &CompileArgs,
    global: &GlobalArgs,
) -> Result<i32, Box<dyn std::error::Error>> {
    let mut project = ProjectSettings::load(global)?;
    project.apply_paths(&args.paths);
    project.apply_compile(args.network_id, args.optimize);

    let network = project.config.compile.network_id;
    let report = compile_project(&project, network).await?;
    print_report(&report, args.format, global);
    Ok(if report.is_success() { 0 } else { 1 })
}

/// Resolves sources and compiles them for `network`.
pub async fn compile_project(
    project: &ProjectSettings,
    network: NetworkId,
) -> Result<CompileReport, Box<dyn std::error::Error>> {
    let sources = ferrule_source::resolve_sources(&project.contracts_dir())?;

    let compilers_dir = project.compilers_dir();
    let compilers = CompilerTable::builtin(&compilers_dir)
        .with_overrides(&project.config.compilers, &compilers_dir);

    let engine = CompilationEngine::new(
        sources,
        ArtifactStore::new(project.artifacts_dir()),
        compilers,
        Arc::new(SolcStandardJson::new()),
        CompileSettings {
            network,
            optimizer_enabled: project.config.compile.optimize,
        },
    );
    Ok(engine.compile_all().await?)
}

/// Prints diagnostics and a one-line summary.
pub fn print_report(report: &CompileReport, format: ReportFormat, global: &GlobalArgs) {
    match format {
        ReportFormat::Json => {
            println!("{}", JsonRenderer.render_all(&report.diagnostics));
        }
        ReportFormat::Text => {
            if !report.diagnostics.is_empty() {
                let renderer = TerminalRenderer::new(global.color);
                eprint!("{}", renderer.render_all(&report.diagnostics));
            }
        }
    }

    if !global.quiet {
        eprintln!(
            "   Compiled {} contract(s), {} up to date, {} failed, {} compiler error(s)",
            report.compiled.len(),
            report.skipped.len(),
            report.failures.len(),
            report.error_count
        );
    }
}
