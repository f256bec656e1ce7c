//! Multi-network contract artifacts and their merge rules.
//!
//! A [`ContractArtifact`] holds one [`NetworkRecord`] per network. The pure
//! functions in [`merge`] decide staleness and fold new compile or deploy
//! results into an artifact without touching other networks' records; the
//! [`ArtifactStore`] reads and writes the `<Contract>.json` files.

#![warn(missing_docs)]

pub mod artifact;
pub mod error;
pub mod merge;
pub mod store;

pub use artifact::{ContractArtifact, Deployment, NetworkRecord};
pub use error::ArtifactError;
pub use merge::{is_stale, merge, record_deployment};
pub use store::ArtifactStore;
