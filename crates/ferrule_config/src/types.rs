//! Configuration types deserialized from `ferrule.toml`.

use ferrule_common::NetworkId;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Default network: a local test RPC node.
pub const DEFAULT_NETWORK_ID: u64 = 50;

/// Default JSON-RPC port of a local node.
pub const DEFAULT_JSONRPC_PORT: u16 = 8545;

/// Default gas price in wei (20 gwei).
pub const DEFAULT_GAS_PRICE: &str = "20000000000";

/// The top-level project configuration parsed from `ferrule.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Directory layout.
    #[serde(default)]
    pub paths: PathsConfig,
    /// Compile-phase settings.
    #[serde(default)]
    pub compile: CompileConfig,
    /// Deploy-phase settings.
    #[serde(default)]
    pub deploy: DeployConfig,
    /// Extra or overriding compiler versions: version → compiler binary.
    #[serde(default)]
    pub compilers: BTreeMap<String, String>,
}

/// Directory layout of a project, relative to the project root.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory searched recursively for `.sol` sources.
    pub contracts_dir: String,
    /// Directory where `<Contract>.json` artifacts are written.
    pub artifacts_dir: String,
    /// Directory that relative compiler binary paths are resolved against.
    pub compilers_dir: String,
    /// Migration plan run by `ferrule migrate`.
    pub migrations: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            contracts_dir: "contracts".to_string(),
            artifacts_dir: "build/artifacts".to_string(),
            compilers_dir: "solc_bin".to_string(),
            migrations: "migrations.toml".to_string(),
        }
    }
}

/// Settings that form the compilation cache key.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CompileConfig {
    /// Network whose artifact records are compiled.
    pub network_id: NetworkId,
    /// Whether the compiler optimizer is enabled.
    pub optimize: bool,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            network_id: NetworkId::new(DEFAULT_NETWORK_ID),
            optimize: false,
        }
    }
}

/// Settings for reaching a node and paying for deployments.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DeployConfig {
    /// Port of the node's JSON-RPC endpoint on localhost.
    pub jsonrpc_port: u16,
    /// Gas price in wei, as a decimal string.
    pub gas_price: String,
    /// Sending account. When absent, the node's first account is used.
    pub from: Option<String>,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            jsonrpc_port: DEFAULT_JSONRPC_PORT,
            gas_price: DEFAULT_GAS_PRICE.to_string(),
            from: None,
        }
    }
}

impl DeployConfig {
    /// Parses [`gas_price`](Self::gas_price) as an integer amount of wei.
    pub fn gas_price_wei(&self) -> Option<u128> {
        self.gas_price.trim().parse().ok()
    }
}
