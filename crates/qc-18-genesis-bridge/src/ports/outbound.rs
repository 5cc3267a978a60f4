//! # Outbound Ports (Driven Ports)
//!
//! Dependencies required by the Genesis Bridge service.
//!
//! Every collaborator is handed the store it must operate on. The service
//! passes either its own store or a transaction scope layered on top of it,
//! so a collaborator never decides on its own whether its writes survive.

use primitive_types::U256;
use shared_types::{Acknowledgement, Packet};

use crate::domain::{
    ChannelId, CommittedGenesisConfig, DenomMetadata, GenesisBridgeError, KVStoreError, SalePlan,
};

/// Abstract interface for key-value database operations.
///
/// Testing: `InMemoryKVStore` (adapters/store.rs)
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Put a single key-value pair.
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError>;

    /// Delete a key.
    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError>;

    /// Execute an atomic batch write.
    ///
    /// Either ALL operations in the batch succeed, or NONE are applied.
    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.get(key)?.is_some())
    }

    /// Key-ordered entries under a prefix.
    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, KVStoreError>;
}

/// Batch operation for atomic writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOperation {
    /// Put a key-value pair.
    Put {
        /// Key
        key: Vec<u8>,
        /// Value
        value: Vec<u8>,
    },
    /// Delete a key.
    Delete {
        /// Key
        key: Vec<u8>,
    },
}

impl BatchOperation {
    /// Create a Put operation.
    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a Delete operation.
    pub fn delete(key: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Delete { key: key.into() }
    }
}

/// Rollapp registry: committed genesis configuration and channel binding.
pub trait RollappRegistry: Send + Sync {
    /// Genesis configuration committed for `rollapp_id`.
    ///
    /// Fails with `RollappNotFound` when nothing was committed.
    fn committed_genesis_config(
        &self,
        store: &dyn KeyValueStore,
        rollapp_id: &str,
    ) -> Result<CommittedGenesisConfig, GenesisBridgeError>;

    /// Bind `channel_id` as the canonical channel of `rollapp_id`.
    fn bind_channel(
        &self,
        store: &mut dyn KeyValueStore,
        rollapp_id: &str,
        channel_id: &str,
    ) -> Result<(), GenesisBridgeError>;

    /// Canonical channel of `rollapp_id`, if bound.
    fn canonical_channel(
        &self,
        store: &dyn KeyValueStore,
        rollapp_id: &str,
    ) -> Result<Option<ChannelId>, GenesisBridgeError>;
}

/// Denomination metadata registry.
pub trait DenomRegistry: Send + Sync {
    /// Register metadata under its base.
    ///
    /// Fails with `RegistryConflict` if different metadata exists for the
    /// same base.
    fn register(
        &self,
        store: &mut dyn KeyValueStore,
        metadata: &DenomMetadata,
    ) -> Result<(), GenesisBridgeError>;

    /// Metadata registered for `base`.
    fn metadata(
        &self,
        store: &dyn KeyValueStore,
        base: &str,
    ) -> Result<Option<DenomMetadata>, GenesisBridgeError>;
}

/// Account balances.
pub trait Ledger: Send + Sync {
    /// Credit `amount` of `denom` to `address`.
    ///
    /// Fails with `LedgerFailure`.
    fn credit(
        &self,
        store: &mut dyn KeyValueStore,
        address: &str,
        denom: &str,
        amount: U256,
    ) -> Result<(), GenesisBridgeError>;

    /// Balance of `address` in `denom`.
    fn balance(
        &self,
        store: &dyn KeyValueStore,
        address: &str,
        denom: &str,
    ) -> Result<U256, GenesisBridgeError>;
}

/// Token sale engine. Only the settlement contract is modelled.
pub trait SaleEngine: Send + Sync {
    /// Unsettled plan for `rollapp_id`, if any.
    fn pending_plan(
        &self,
        store: &dyn KeyValueStore,
        rollapp_id: &str,
    ) -> Result<Option<SalePlan>, GenesisBridgeError>;

    /// Settle `plan_id` in `denom` with `funded` tokens available.
    ///
    /// Fails with `SettlementFailure`.
    fn settle(
        &self,
        store: &mut dyn KeyValueStore,
        plan_id: u64,
        denom: &str,
        funded: U256,
    ) -> Result<(), GenesisBridgeError>;
}

/// Ordinary transfer application, reached once a channel is bridged.
pub trait TransferApp: Send + Sync {
    /// Process an ordinary inbound packet.
    ///
    /// Writes made on `store` are kept only if the returned acknowledgement
    /// is a success.
    fn on_recv_packet(&self, store: &mut dyn KeyValueStore, packet: &Packet) -> Acknowledgement;

    /// Process the timeout of a packet sent on a bridged channel.
    fn on_timeout_packet(
        &self,
        store: &mut dyn KeyValueStore,
        packet: &Packet,
    ) -> Result<(), GenesisBridgeError>;
}
