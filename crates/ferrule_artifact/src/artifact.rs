//! The persisted artifact data model.

use std::collections::BTreeMap;

use ferrule_common::{Fingerprint, NetworkId};
use serde::{Deserialize, Serialize};

use crate::error::ArtifactError;

/// The compiled and deployed state of one contract across all networks.
///
/// Persisted as `<contract_name>.json`. The `networks` map only grows by key;
/// a record is replaced wholesale when its network is recompiled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractArtifact {
    /// Contract name, fixed when the artifact is first created.
    pub contract_name: String,
    /// Per-network records, keyed by network id (string keys on disk).
    pub networks: BTreeMap<NetworkId, NetworkRecord>,
}

impl ContractArtifact {
    /// Creates an artifact with no network records.
    pub fn new(contract_name: impl Into<String>) -> Self {
        Self {
            contract_name: contract_name.into(),
            networks: BTreeMap::new(),
        }
    }

    /// Returns the record for a network, if present.
    pub fn network(&self, network: NetworkId) -> Option<&NetworkRecord> {
        self.networks.get(&network)
    }

    /// Returns the record for a network or a [`ArtifactError::MissingNetwork`]
    /// listing the networks that are present.
    pub fn require_network(&self, network: NetworkId) -> Result<&NetworkRecord, ArtifactError> {
        self.networks
            .get(&network)
            .ok_or_else(|| ArtifactError::MissingNetwork {
                contract: self.contract_name.clone(),
                network,
                found: self.network_list(),
            })
    }

    /// Comma-separated network ids, or `none`.
    fn network_list(&self) -> String {
        if self.networks.is_empty() {
            return "none".to_string();
        }
        self.networks
            .keys()
            .map(|k| k.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Compiled (and possibly deployed) state of a contract on one network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkRecord {
    /// Compiler version that produced this record, e.g. `0.4.11`.
    pub compiler_version: String,
    /// Fingerprint of the exact source text compiled.
    pub source_fingerprint: Fingerprint,
    /// Optimizer setting used; part of the cache key.
    pub optimizer_enabled: bool,
    /// The contract's JSON ABI.
    pub abi: serde_json::Value,
    /// `0x`-prefixed creation bytecode.
    pub unlinked_binary: String,
    /// Milliseconds since the Unix epoch at compilation time.
    pub updated_at: i64,
    /// Address of the deployed instance on this network.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// `0x`-prefixed ABI encoding of the constructor arguments used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constructor_args: Option<String>,
}

impl NetworkRecord {
    /// Returns `true` if the record was deployed on its network.
    pub fn is_deployed(&self) -> bool {
        self.address.is_some()
    }
}

/// The outcome of a confirmed deployment, merged into a [`NetworkRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    /// Address of the created contract.
    pub address: String,
    /// `0x`-prefixed ABI-encoded constructor arguments.
    pub constructor_args: String,
}
