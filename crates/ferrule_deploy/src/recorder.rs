//! Deploys a compiled contract and records the result in its artifact.

use std::sync::Arc;

use alloy::dyn_abi::DynSolValue;
use alloy::json_abi::JsonAbi;
use alloy::primitives::{hex, Address, Bytes, TxHash};
use ferrule_artifact::{record_deployment, ArtifactStore, Deployment};
use ferrule_common::NetworkId;

use crate::chain::{ChainClient, TxDescriptor};
use crate::confirm::create_and_confirm;
use crate::encoder::{coerce_constructor_args, encode_constructor_args};
use crate::error::DeployError;

/// Gas added to every estimate before submitting a creation.
pub const EXTRA_GAS: u64 = 500_000;

/// Transaction settings shared by every deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxDefaults {
    /// Sending account; the node's first account when `None`.
    pub from: Option<Address>,
    /// Gas price in wei.
    pub gas_price: u128,
}

/// A contract instance created and recorded by [`Deployer::deploy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedContract {
    /// The contract name.
    pub contract_name: String,
    /// The network it was deployed to.
    pub network: NetworkId,
    /// Address of the new instance.
    pub address: Address,
    /// Hash of the creation transaction, if reported.
    pub transaction_hash: Option<TxHash>,
    /// `0x`-prefixed ABI encoding of the constructor arguments.
    pub constructor_args: String,
}

/// Deploys contracts to one network from their compiled artifacts.
pub struct Deployer {
    store: ArtifactStore,
    network: NetworkId,
    chain: Arc<dyn ChainClient>,
    defaults: TxDefaults,
}

struct Prepared {
    abi: JsonAbi,
    bytecode: Vec<u8>,
}

impl Deployer {
    /// Creates a deployer for `network`.
    pub fn new(
        store: ArtifactStore,
        network: NetworkId,
        chain: Arc<dyn ChainClient>,
        defaults: TxDefaults,
    ) -> Self {
        Self {
            store,
            network,
            chain,
            defaults,
        }
    }

    /// Deploys `contract_name` with typed constructor arguments.
    ///
    /// Requires a compiled record for this deployer's network. The artifact
    /// is rewritten only after the chain confirms the new address; only the
    /// record's `address` and `constructor_args` change.
    pub async fn deploy(
        &self,
        contract_name: &str,
        args: &[DynSolValue],
    ) -> Result<DeployedContract, DeployError> {
        let artifact = self.store.load_for_deploy(contract_name).await?;
        let Prepared { abi, bytecode } = self.prepare(contract_name, &artifact)?;

        let encoded_args =
            encode_constructor_args(&abi, args).map_err(|e| DeployError::ConstructorArgs {
                contract: contract_name.to_string(),
                source: e,
            })?;
        let from = self.sender(contract_name).await?;

        let mut data = bytecode;
        data.extend_from_slice(&encoded_args);
        let estimate_tx = TxDescriptor {
            from,
            gas_price: self.defaults.gas_price,
            gas: None,
            data: Bytes::from(data),
        };
        let chain_err = |source| DeployError::Chain {
            contract: contract_name.to_string(),
            source,
        };
        let estimate = self
            .chain
            .estimate_gas(&estimate_tx)
            .await
            .map_err(chain_err)?;
        let tx = TxDescriptor {
            gas: Some(estimate.saturating_add(EXTRA_GAS)),
            ..estimate_tx
        };

        let confirmation = create_and_confirm(self.chain.as_ref(), &abi, args, tx)
            .await
            .map_err(chain_err)?;

        let constructor_args = hex::encode_prefixed(&encoded_args);
        let updated = record_deployment(
            artifact,
            self.network,
            Deployment {
                address: confirmation.address.to_string(),
                constructor_args: constructor_args.clone(),
            },
        )?;
        self.store.save(&updated).await?;
        tracing::info!(
            "{contract_name} successfully deployed at {}",
            confirmation.address
        );

        Ok(DeployedContract {
            contract_name: contract_name.to_string(),
            network: self.network,
            address: confirmation.address,
            transaction_hash: confirmation.transaction_hash,
            constructor_args,
        })
    }

    /// Deploys `contract_name`, parsing textual arguments with the
    /// constructor's parameter types from the stored ABI.
    pub async fn deploy_from_strings(
        &self,
        contract_name: &str,
        args: &[String],
    ) -> Result<DeployedContract, DeployError> {
        let artifact = self.store.load_for_deploy(contract_name).await?;
        let Prepared { abi, .. } = self.prepare(contract_name, &artifact)?;
        let values =
            coerce_constructor_args(&abi, args).map_err(|e| DeployError::ConstructorArgs {
                contract: contract_name.to_string(),
                source: e,
            })?;
        self.deploy(contract_name, &values).await
    }

    /// Extracts the ABI and creation bytecode for this network.
    fn prepare(
        &self,
        contract_name: &str,
        artifact: &ferrule_artifact::ContractArtifact,
    ) -> Result<Prepared, DeployError> {
        let record = artifact.require_network(self.network)?;
        let abi = serde_json::from_value(record.abi.clone()).map_err(|e| {
            DeployError::InvalidAbi {
                contract: contract_name.to_string(),
                reason: e.to_string(),
            }
        })?;
        let bytecode =
            hex::decode(&record.unlinked_binary).map_err(|e| DeployError::InvalidBytecode {
                contract: contract_name.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Prepared { abi, bytecode })
    }

    async fn sender(&self, contract_name: &str) -> Result<Address, DeployError> {
        if let Some(from) = self.defaults.from {
            return Ok(from);
        }
        let accounts = self
            .chain
            .available_addresses()
            .await
            .map_err(|source| DeployError::Chain {
                contract: contract_name.to_string(),
                source,
            })?;
        accounts
            .first()
            .copied()
            .ok_or_else(|| DeployError::NoAccounts {
                contract: contract_name.to_string(),
            })
    }
}
