//! `ferrule migrate`: compile for the node's network, then run the
//! migration plan.

use std::sync::Arc;

use ferrule_artifact::ArtifactStore;
use ferrule_common::NetworkId;
use ferrule_deploy::{Deployer, MigrationPlan, RpcChain};

use crate::compile::{compile_project, print_report};
use crate::settings::ProjectSettings;
use crate::{GlobalArgs, MigrateArgs};

/// Runs the `ferrule migrate` command.
///
/// Compilation failures stop the command before anything is deployed. A
/// missing plan file compiles only. Returns exit code 1 if any contract
/// failed to compile or any plan step failed.
pub async fn run(
    args: &MigrateArgs,
    global: &GlobalArgs,
) -> Result<i32, Box<dyn std::error::Error>> {
    let mut project = ProjectSettings::load(global)?;
    project.apply_paths(&args.paths);
    project.apply_node(&args.node);
    project.apply_compile(None, args.optimize);
    if let Some(plan) = &args.migrations {
        project.config.paths.migrations = plan.clone();
    }
    let defaults = project.tx_defaults()?;

    let chain = RpcChain::connect(project.config.deploy.jsonrpc_port).await?;
    let network = match args.network_id {
        Some(id) => NetworkId::new(id),
        None => chain.network_id().await?,
    };
    tracing::info!("Migrating to network {network}");

    let report = compile_project(&project, network).await?;
    print_report(&report, args.format, global);
    if !report.is_success() {
        return Ok(1);
    }

    let plan_path = project.migrations();
    if !plan_path.is_file() {
        tracing::info!("No migration plan at {}, nothing to deploy", plan_path.display());
        return Ok(0);
    }
    let plan = MigrationPlan::load(&plan_path)?;

    let deployer = Deployer::new(
        ArtifactStore::new(project.artifacts_dir()),
        network,
        Arc::new(chain),
        defaults,
    );
    let outcome = plan.run(&deployer).await;
    if !global.quiet {
        for deployed in &outcome.deployed {
            println!("{} {}", deployed.contract_name, deployed.address);
        }
        eprintln!(
            "   Deployed {} contract(s), {} failed",
            outcome.deployed.len(),
            outcome.failures.len()
        );
    }
    Ok(if outcome.is_success() { 0 } else { 1 })
}
