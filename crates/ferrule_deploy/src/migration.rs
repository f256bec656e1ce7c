//! Declarative migration plans.
//!
//! A plan is an ordered list of deployments:
//!
//! ```toml
//! [[deploy]]
//! contract = "Token"
//! args = ["1000000"]
//!
//! [[deploy]]
//! contract = "Exchange"
//! args = ["$Token"]
//! ```
//!
//! An argument `$Name` is replaced by the address `Name` was deployed at
//! earlier in the same run.

use std::collections::HashMap;
use std::path::Path;

use alloy::primitives::Address;
use serde::Deserialize;

use crate::error::{DeployError, PlanError};
use crate::recorder::{DeployedContract, Deployer};

/// Prefix marking an argument as a reference to an earlier deployment.
const REFERENCE_PREFIX: char = '$';

/// One deployment in a plan.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MigrationStep {
    /// Contract to deploy.
    pub contract: String,
    /// Constructor arguments, as text.
    #[serde(default)]
    pub args: Vec<String>,
}

/// An ordered list of deployments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MigrationPlan {
    /// Steps in execution order.
    #[serde(default, rename = "deploy")]
    pub steps: Vec<MigrationStep>,
}

/// Outcome of running a plan.
#[derive(Debug, Default)]
pub struct MigrationReport {
    /// Successful deployments, in plan order.
    pub deployed: Vec<DeployedContract>,
    /// Failed steps, in plan order.
    pub failures: Vec<(String, DeployError)>,
}

impl MigrationReport {
    /// Returns `true` if every step succeeded.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

impl MigrationPlan {
    /// Reads a plan file.
    pub fn load(path: &Path) -> Result<Self, PlanError> {
        let content = std::fs::read_to_string(path).map_err(|e| PlanError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses plan TOML.
    pub fn parse(content: &str) -> Result<Self, PlanError> {
        toml::from_str(content).map_err(|e| PlanError::Parse {
            reason: e.to_string(),
        })
    }

    /// Runs every step in order.
    ///
    /// A failed step is recorded and the run continues; steps that reference
    /// a contract which failed (or never ran) fail with
    /// [`DeployError::UnresolvedReference`].
    pub async fn run(&self, deployer: &Deployer) -> MigrationReport {
        let mut addresses: HashMap<String, Address> = HashMap::new();
        let mut report = MigrationReport::default();

        for step in &self.steps {
            let result = match resolve_args(step, &addresses) {
                Ok(args) => deployer.deploy_from_strings(&step.contract, &args).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(deployed) => {
                    addresses.insert(step.contract.clone(), deployed.address);
                    report.deployed.push(deployed);
                }
                Err(e) => {
                    tracing::error!("{}: {e}", step.contract);
                    report.failures.push((step.contract.clone(), e));
                }
            }
        }
        report
    }
}

/// Replaces `$Name` arguments with deployed addresses.
fn resolve_args(
    step: &MigrationStep,
    addresses: &HashMap<String, Address>,
) -> Result<Vec<String>, DeployError> {
    step.args
        .iter()
        .map(|arg| match arg.strip_prefix(REFERENCE_PREFIX) {
            Some(name) => addresses
                .get(name)
                .map(|a| a.to_string())
                .ok_or_else(|| DeployError::UnresolvedReference {
                    contract: step.contract.clone(),
                    reference: arg.clone(),
                }),
            None => Ok(arg.clone()),
        })
        .collect()
}
