//! # Channel Gate
//!
//! Keyed store of [`ChannelGenesisState`] records and the classification of
//! inbound packets against them.
//!
//! ```text
//! AwaitingGenesis ──(genesis applied)──→ Bridged
//! ```
//!
//! Channels without a record are not rollapp channels and are never gated.

use shared_types::Packet;

use crate::algorithms::is_genesis_shaped;
use crate::domain::{ChannelGenesisState, GenesisBridgeError, PacketClass};
use crate::ports::KeyValueStore;

use super::store::{read_record, write_record};

const CHANNEL_PREFIX: &str = "gate/channel/";

fn channel_key(channel_id: &str) -> Vec<u8> {
    format!("{CHANNEL_PREFIX}{channel_id}").into_bytes()
}

/// Channel gate over a key-value store.
#[derive(Clone, Debug)]
pub struct ChannelGate {
    transfer_port: String,
}

impl ChannelGate {
    /// Gate for genesis payloads arriving on `transfer_port`.
    pub fn new(transfer_port: impl Into<String>) -> Self {
        Self {
            transfer_port: transfer_port.into(),
        }
    }

    /// Start tracking `channel_id` for `rollapp_id`.
    ///
    /// Returns the existing record when the channel is already tracked for
    /// the same rollapp.
    pub fn open(
        &self,
        store: &mut dyn KeyValueStore,
        channel_id: &str,
        rollapp_id: &str,
    ) -> Result<ChannelGenesisState, GenesisBridgeError> {
        if let Some(existing) = self.state(store, channel_id)? {
            if existing.rollapp_id != rollapp_id {
                return Err(GenesisBridgeError::ChannelRollappConflict {
                    channel_id: channel_id.to_string(),
                    bound: existing.rollapp_id,
                    requested: rollapp_id.to_string(),
                });
            }
            return Ok(existing);
        }

        let state = ChannelGenesisState::new(channel_id, rollapp_id);
        write_record(store, &channel_key(channel_id), &state)?;
        Ok(state)
    }

    /// Record of `channel_id`, if tracked.
    pub fn state(
        &self,
        store: &dyn KeyValueStore,
        channel_id: &str,
    ) -> Result<Option<ChannelGenesisState>, GenesisBridgeError> {
        read_record(store, &channel_key(channel_id))
    }

    /// Whether `channel_id` completed genesis.
    pub fn is_bridged(
        &self,
        store: &dyn KeyValueStore,
        channel_id: &str,
    ) -> Result<bool, GenesisBridgeError> {
        Ok(self
            .state(store, channel_id)?
            .is_some_and(|state| state.transfer_enabled))
    }

    /// Flip `channel_id` to `Bridged`. Fails with `AlreadyBridged` if it
    /// already is.
    pub fn mark_bridged(
        &self,
        store: &mut dyn KeyValueStore,
        channel_id: &str,
        rollapp_id: &str,
    ) -> Result<(), GenesisBridgeError> {
        let mut state = match self.state(store, channel_id)? {
            Some(state) if state.rollapp_id != rollapp_id => {
                return Err(GenesisBridgeError::ChannelRollappConflict {
                    channel_id: channel_id.to_string(),
                    bound: state.rollapp_id,
                    requested: rollapp_id.to_string(),
                })
            }
            Some(state) => state,
            None => ChannelGenesisState::new(channel_id, rollapp_id),
        };
        state.enable_transfers()?;
        write_record(store, &channel_key(channel_id), &state)
    }

    /// Whether the packet is shaped like a genesis payload.
    pub fn is_genesis_packet(&self, packet: &Packet) -> bool {
        packet.destination_port == self.transfer_port && is_genesis_shaped(&packet.data)
    }

    /// Classify an inbound packet.
    pub fn classify(
        &self,
        store: &dyn KeyValueStore,
        packet: &Packet,
    ) -> Result<PacketClass, GenesisBridgeError> {
        let class = match self.state(store, &packet.destination_channel)? {
            Some(state) if !state.gate_state().is_terminal() => {
                if self.is_genesis_packet(packet) {
                    PacketClass::GenesisCandidate
                } else {
                    PacketClass::OrdinaryRejected
                }
            }
            _ => PacketClass::OrdinaryAllowed,
        };
        Ok(class)
    }
}
