//! Pure merge and staleness rules. No I/O.

use ferrule_common::{Fingerprint, NetworkId};

use crate::artifact::{ContractArtifact, Deployment, NetworkRecord};
use crate::error::ArtifactError;

/// Returns `true` if a network record must be recompiled.
///
/// A missing record is stale. A present record is stale when its fingerprint
/// or optimizer setting differs from the current inputs.
pub fn is_stale(
    record: Option<&NetworkRecord>,
    fingerprint: &Fingerprint,
    optimizer_enabled: bool,
) -> bool {
    match record {
        Some(r) => {
            r.source_fingerprint != *fingerprint || r.optimizer_enabled != optimizer_enabled
        }
        None => true,
    }
}

/// Folds a freshly compiled record into an artifact for one network.
///
/// The record for `network` is replaced wholesale, which drops any deployment
/// fields it carried. Records for every other network are kept as they are.
/// An absent artifact is treated as one with no networks, named
/// `contract_name`; a present artifact keeps its own name.
pub fn merge(
    existing: Option<ContractArtifact>,
    contract_name: &str,
    network: NetworkId,
    record: NetworkRecord,
) -> ContractArtifact {
    let mut artifact = existing.unwrap_or_else(|| ContractArtifact::new(contract_name));
    artifact.networks.insert(network, record);
    artifact
}

/// Merges a confirmed deployment into the existing record for `network`.
///
/// Only `address` and `constructor_args` change; the ABI, bytecode,
/// fingerprint and every other network's record are preserved.
pub fn record_deployment(
    mut artifact: ContractArtifact,
    network: NetworkId,
    deployment: Deployment,
) -> Result<ContractArtifact, ArtifactError> {
    let updated = NetworkRecord {
        address: Some(deployment.address),
        constructor_args: Some(deployment.constructor_args),
        ..artifact.require_network(network)?.clone()
    };
    artifact.networks.insert(network, updated);
    Ok(artifact)
}
