//! # Shared Types Crate
//!
//! Cross-subsystem types: primitive aliases and the inter-chain transport
//! types (packets, transfer bodies, acknowledgements) a receiving subsystem
//! is handed by the relayer layer.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Transport-agnostic**: Nothing here knows how packets are relayed.

pub mod entities;
pub mod ibc;

pub use entities::*;
pub use ibc::*;
