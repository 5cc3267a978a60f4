//! # Rollapp Registry Adapter
//!
//! Store-backed registry of committed rollapp genesis configurations and
//! canonical channel bindings.

use crate::domain::{ChannelId, CommittedGenesisConfig, GenesisBridgeError};
use crate::ports::{KeyValueStore, RollappRegistry};

use super::store::{read_record, write_record};

const CONFIG_PREFIX: &str = "rollapp/config/";
const CHANNEL_PREFIX: &str = "rollapp/channel/";

fn config_key(rollapp_id: &str) -> Vec<u8> {
    format!("{CONFIG_PREFIX}{rollapp_id}").into_bytes()
}

fn channel_key(rollapp_id: &str) -> Vec<u8> {
    format!("{CHANNEL_PREFIX}{rollapp_id}").into_bytes()
}

/// Rollapp registry over a key-value store.
#[derive(Clone, Debug, Default)]
pub struct KvRollappRegistry;

impl KvRollappRegistry {
    /// Create the registry.
    pub fn new() -> Self {
        Self
    }

    /// Record the genesis configuration a rollapp commits before launch.
    pub fn register_rollapp(
        &self,
        store: &mut dyn KeyValueStore,
        rollapp_id: &str,
        config: &CommittedGenesisConfig,
    ) -> Result<(), GenesisBridgeError> {
        write_record(store, &config_key(rollapp_id), config)
    }
}

impl RollappRegistry for KvRollappRegistry {
    fn committed_genesis_config(
        &self,
        store: &dyn KeyValueStore,
        rollapp_id: &str,
    ) -> Result<CommittedGenesisConfig, GenesisBridgeError> {
        read_record(store, &config_key(rollapp_id))?
            .ok_or_else(|| GenesisBridgeError::RollappNotFound(rollapp_id.to_string()))
    }

    fn bind_channel(
        &self,
        store: &mut dyn KeyValueStore,
        rollapp_id: &str,
        channel_id: &str,
    ) -> Result<(), GenesisBridgeError> {
        match self.canonical_channel(store, rollapp_id)? {
            Some(existing) if existing == channel_id => Ok(()),
            Some(existing) => Err(GenesisBridgeError::CanonicalChannelConflict {
                rollapp_id: rollapp_id.to_string(),
                existing,
            }),
            None => write_record(store, &channel_key(rollapp_id), &channel_id.to_string()),
        }
    }

    fn canonical_channel(
        &self,
        store: &dyn KeyValueStore,
        rollapp_id: &str,
    ) -> Result<Option<ChannelId>, GenesisBridgeError> {
        read_record(store, &channel_key(rollapp_id))
    }
}
