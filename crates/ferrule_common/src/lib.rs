//! Shared foundational types used across the Ferrule contract toolchain.
//!
//! This crate provides the source [`Fingerprint`] used as the compilation
//! cache key and the [`NetworkId`] that keys per-network artifact records.

#![warn(missing_docs)]

pub mod hash;
pub mod network;

pub use hash::Fingerprint;
pub use network::{NetworkId, ParseNetworkIdError};
