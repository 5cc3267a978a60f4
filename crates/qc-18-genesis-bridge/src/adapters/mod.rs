//! # Adapters Module
//!
//! Store-backed implementations of the outbound ports, the transaction scope
//! and the channel gate.

pub mod bank;
pub mod gate;
pub mod rollapp;
pub mod sale;
pub mod store;
pub mod transfer;

pub use bank::{KvDenomRegistry, KvLedger};
pub use gate::ChannelGate;
pub use rollapp::KvRollappRegistry;
pub use sale::KvSaleEngine;
pub use store::{read_record, write_record, CacheStore, InMemoryKVStore};
pub use transfer::LedgerTransferApp;
