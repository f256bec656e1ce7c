//! A [`ChainClient`] backed by a node's JSON-RPC endpoint.
//!
//! The node signs transactions itself (`eth_sendTransaction`), so the sender
//! must be one of its unlocked accounts.

use alloy::dyn_abi::DynSolValue;
use alloy::json_abi::JsonAbi;
use alloy::network::ReceiptResponse;
use alloy::primitives::Address;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use async_trait::async_trait;
use ferrule_common::NetworkId;

use crate::chain::{ChainClient, CreationCallback, CreationUpdate, TxDescriptor};
use crate::error::ChainError;

fn rpc_error(e: impl std::fmt::Display) -> ChainError {
    ChainError::Rpc {
        reason: e.to_string(),
    }
}

/// JSON-RPC chain client.
#[derive(Clone)]
pub struct RpcChain {
    provider: DynProvider,
}

impl RpcChain {
    /// Connects to a node on `localhost`.
    pub async fn connect(port: u16) -> Result<Self, ChainError> {
        Self::connect_url(&format!("http://localhost:{port}")).await
    }

    /// Connects to a node at `url`.
    pub async fn connect_url(url: &str) -> Result<Self, ChainError> {
        let provider = ProviderBuilder::new()
            .connect(url)
            .await
            .map_err(rpc_error)?;
        tracing::debug!("connected to {url}");
        Ok(Self {
            provider: provider.erased(),
        })
    }

    /// The node's network id (`net_version`).
    pub async fn network_id(&self) -> Result<NetworkId, ChainError> {
        let version = self.provider.get_net_version().await.map_err(rpc_error)?;
        Ok(NetworkId::new(version))
    }
}

#[async_trait]
impl ChainClient for RpcChain {
    async fn available_addresses(&self) -> Result<Vec<Address>, ChainError> {
        self.provider.get_accounts().await.map_err(rpc_error)
    }

    async fn estimate_gas(&self, tx: &TxDescriptor) -> Result<u64, ChainError> {
        self.provider
            .estimate_gas(tx.to_request())
            .await
            .map_err(rpc_error)
    }

    fn create(
        &self,
        abi: &JsonAbi,
        args: &[DynSolValue],
        tx: TxDescriptor,
        mut callback: CreationCallback,
    ) {
        let expected = abi.constructor().map_or(0, |c| c.inputs.len());
        if expected != args.len() {
            callback(Err(ChainError::Creation {
                reason: format!(
                    "constructor takes {expected} argument(s), {} given",
                    args.len()
                ),
            }));
            return;
        }

        let provider = self.provider.clone();
        tokio::spawn(async move {
            let pending = match provider.send_transaction(tx.to_request()).await {
                Ok(pending) => pending,
                Err(e) => {
                    callback(Err(rpc_error(e)));
                    return;
                }
            };
            let hash = *pending.tx_hash();
            callback(Ok(CreationUpdate {
                transaction_hash: Some(hash),
                address: None,
            }));

            let receipt = match pending.get_receipt().await {
                Ok(receipt) => receipt,
                Err(e) => {
                    callback(Err(rpc_error(e)));
                    return;
                }
            };
            let update = match receipt.contract_address {
                Some(address) if receipt.status() => Ok(CreationUpdate {
                    transaction_hash: Some(hash),
                    address: Some(address),
                }),
                _ => Err(ChainError::Creation {
                    reason: format!("transaction {hash} did not create a contract"),
                }),
            };
            callback(update);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::Bytes;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn unreachable_node_reports_rpc_errors() {
        // Port 9 (discard) is never a JSON-RPC node.
        let chain = RpcChain::connect_url("http://127.0.0.1:9").await.unwrap();
        let err = chain.available_addresses().await.unwrap_err();
        assert!(matches!(err, ChainError::Rpc { .. }));
        assert!(chain.network_id().await.is_err());
    }

    #[tokio::test]
    async fn argument_mismatch_fails_without_sending() {
        let chain = RpcChain::connect_url("http://127.0.0.1:9").await.unwrap();
        let abi: JsonAbi = serde_json::from_str(
            r#"[{"type":"constructor","inputs":[{"name":"a","type":"uint256"}],"stateMutability":"nonpayable"}]"#,
        )
        .unwrap();
        let (sender, mut updates) = mpsc::unbounded_channel();
        let tx = TxDescriptor {
            from: Address::ZERO,
            gas_price: 1,
            gas: Some(21_000),
            data: Bytes::new(),
        };
        chain.create(
            &abi,
            &[],
            tx,
            Box::new(move |update| {
                let _ = sender.send(update);
            }),
        );
        let first = updates.recv().await.unwrap();
        assert!(matches!(first, Err(ChainError::Creation { .. })));
        assert!(updates.recv().await.is_none());
    }
}
