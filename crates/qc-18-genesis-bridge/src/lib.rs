//! # QC-18 Genesis Bridge
//!
//! One-time handshake that gates a rollapp's transfer channel to the hub until
//! the rollapp's genesis payload is validated and applied.
//!
//! **Subsystem ID:** 18
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! - Reject ordinary transfers on a rollapp channel until genesis completes
//! - Check the genesis payload against the configuration committed on the hub
//! - Register the bridged denom, fund genesis accounts and settle the sale
//!   plan as one all-or-nothing unit
//! - Acknowledge every outcome without leaking partial state
//!
//! ## Channel States
//!
//! | State | Genesis payload | Ordinary transfer |
//! |-------|-----------------|-------------------|
//! | AwaitingGenesis | validated and applied | error ack |
//! | Bridged | error ack | transfer app |
//!
//! ## Module Structure
//!
//! ```text
//! qc-18-genesis-bridge/
//! ├── domain/          # Payload, gate record, errors, invariants
//! ├── algorithms/      # Codec, validator, denom derivation, acks
//! ├── ports/           # GenesisBridgeApi, collaborators, KeyValueStore
//! ├── adapters/        # Stores, channel gate, reference collaborators
//! └── application/     # Executor, service
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::{
    CacheStore, ChannelGate, InMemoryKVStore, KvDenomRegistry, KvLedger, KvRollappRegistry,
    KvSaleEngine, LedgerTransferApp,
};
pub use algorithms::{
    bridged_denom, build_acknowledgement, decode_payload, encode_payload, is_genesis_shaped,
    validate_payload, SUCCESS_MARKER,
};
pub use application::{
    GenesisBridgeDependencies, GenesisBridgeService, GenesisExecutor, GenesisReceipt,
    GenesisTarget,
};
pub use config::GenesisBridgeConfig;
pub use domain::{
    ChannelGenesisState, CommittedGenesisConfig, DenomMetadata, DenomUnit, GateState,
    GenesisAccount, GenesisBridgeError, GenesisBridgePayload, GenesisInfo, KVStoreError,
    NativeDenom, PacketClass, SalePlan, ValidatedPayload,
};
pub use ports::{
    BatchOperation, DenomRegistry, GenesisBridgeApi, KeyValueStore, Ledger, RollappRegistry,
    SaleEngine, TransferApp,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
