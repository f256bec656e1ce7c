//! The chain collaborator interface.

use alloy::dyn_abi::DynSolValue;
use alloy::json_abi::JsonAbi;
use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, TxHash};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;

use crate::error::ChainError;

/// A contract-creation transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxDescriptor {
    /// Sending account.
    pub from: Address,
    /// Gas price in wei.
    pub gas_price: u128,
    /// Gas limit; `None` while estimating.
    pub gas: Option<u64>,
    /// Creation bytecode followed by the encoded constructor arguments.
    pub data: Bytes,
}

impl TxDescriptor {
    /// Converts the descriptor into an RPC transaction request.
    pub fn to_request(&self) -> TransactionRequest {
        let request = TransactionRequest::default()
            .with_from(self.from)
            .with_gas_price(self.gas_price)
            .with_deploy_code(self.data.clone());
        match self.gas {
            Some(gas) => request.with_gas_limit(gas),
            None => request,
        }
    }
}

/// One notification from a creation in progress.
///
/// A successful creation reports twice: first with only the transaction
/// hash once the transaction is pending, then with the contract address once
/// it is confirmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreationUpdate {
    /// Hash of the creation transaction.
    pub transaction_hash: Option<TxHash>,
    /// Address of the created contract, once confirmed.
    pub address: Option<Address>,
}

/// Receives creation notifications. Called any number of times; an `Err`
/// ends the creation.
pub type CreationCallback = Box<dyn FnMut(Result<CreationUpdate, ChainError>) + Send>;

/// A blockchain node that can create contracts.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Accounts the node can send from.
    async fn available_addresses(&self) -> Result<Vec<Address>, ChainError>;

    /// Estimated gas for a creation transaction.
    async fn estimate_gas(&self, tx: &TxDescriptor) -> Result<u64, ChainError>;

    /// Starts a contract creation and reports progress through `callback`.
    ///
    /// `abi` and `args` describe the constructor call already encoded in
    /// `tx.data`.
    fn create(
        &self,
        abi: &JsonAbi,
        args: &[DynSolValue],
        tx: TxDescriptor,
        callback: CreationCallback,
    );
}
