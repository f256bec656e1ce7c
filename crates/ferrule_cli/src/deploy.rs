//! `ferrule deploy`: deploy a single compiled contract.

use std::sync::Arc;

use ferrule_artifact::ArtifactStore;
use ferrule_common::NetworkId;
use ferrule_deploy::{Deployer, RpcChain};

use crate::settings::ProjectSettings;
use crate::{DeployArgs, GlobalArgs, PathArgs};

/// Runs the `ferrule deploy` command.
///
/// Prints the new contract's address on success.
pub async fn run(
    args: &DeployArgs,
    global: &GlobalArgs,
) -> Result<i32, Box<dyn std::error::Error>> {
    let mut project = ProjectSettings::load(global)?;
    project.apply_paths(&PathArgs {
        contracts_dir: None,
        artifacts_dir: args.artifacts_dir.clone(),
    });
    project.apply_node(&args.node);
    let defaults = project.tx_defaults()?;

    let chain = RpcChain::connect(project.config.deploy.jsonrpc_port).await?;
    let network = match args.network_id {
        Some(id) => NetworkId::new(id),
        None => chain.network_id().await?,
    };

    let deployer = Deployer::new(
        ArtifactStore::new(project.artifacts_dir()),
        network,
        Arc::new(chain),
        defaults,
    );
    let deployed = deployer
        .deploy_from_strings(&args.contract, &args.args)
        .await?;
    println!("{}", deployed.address);
    Ok(0)
}
