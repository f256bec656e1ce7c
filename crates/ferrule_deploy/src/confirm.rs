//! Collapses the two-step creation notifications into one awaited result.

use alloy::dyn_abi::DynSolValue;
use alloy::json_abi::JsonAbi;
use alloy::primitives::{Address, TxHash};
use tokio::sync::mpsc;

use crate::chain::{ChainClient, TxDescriptor};
use crate::error::ChainError;

/// A confirmed contract creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation {
    /// Address of the created contract.
    pub address: Address,
    /// Hash of the creation transaction, if the chain reported one.
    pub transaction_hash: Option<TxHash>,
}

/// Starts a creation and resolves once the chain reports an address.
///
/// Notifications without an address are pending updates: they are logged
/// and otherwise ignored. The first error ends the wait immediately. If the
/// chain drops its callback before reporting an address, the result is
/// [`ChainError::ConfirmationDropped`].
pub async fn create_and_confirm(
    chain: &dyn ChainClient,
    abi: &JsonAbi,
    args: &[DynSolValue],
    tx: TxDescriptor,
) -> Result<Confirmation, ChainError> {
    let (sender, mut updates) = mpsc::unbounded_channel();
    chain.create(
        abi,
        args,
        tx,
        Box::new(move |update| {
            // The receiver is gone once a result was returned; later
            // notifications have nowhere to go.
            let _ = sender.send(update);
        }),
    );

    let mut transaction_hash = None;
    while let Some(update) = updates.recv().await {
        let update = update?;
        if update.transaction_hash.is_some() {
            transaction_hash = update.transaction_hash;
        }
        match update.address {
            Some(address) => {
                return Ok(Confirmation {
                    address,
                    transaction_hash,
                })
            }
            None => {
                if let Some(hash) = update.transaction_hash {
                    tracing::info!("transactionHash: {hash}");
                }
            }
        }
    }
    Err(ChainError::ConfirmationDropped)
}
