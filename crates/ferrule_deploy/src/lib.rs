//! Deploying compiled contracts and recording the result in their artifacts.
//!
//! The [`Deployer`] reads a contract's compiled record for one network,
//! submits a creation transaction through a [`ChainClient`], waits for the
//! confirmed address with [`create_and_confirm`], and merges the address and
//! encoded constructor arguments back into the artifact. Nothing is written
//! unless the creation is confirmed.

#![warn(missing_docs)]

pub mod chain;
pub mod confirm;
pub mod encoder;
pub mod error;
pub mod migration;
pub mod recorder;
pub mod rpc;

pub use chain::{ChainClient, CreationCallback, CreationUpdate, TxDescriptor};
pub use confirm::{create_and_confirm, Confirmation};
pub use encoder::{coerce_constructor_args, encode_constructor_args};
pub use error::{ArgumentError, ChainError, DeployError, PlanError};
pub use migration::{MigrationPlan, MigrationReport, MigrationStep};
pub use recorder::{DeployedContract, Deployer, TxDefaults, EXTRA_GAS};
pub use rpc::RpcChain;
