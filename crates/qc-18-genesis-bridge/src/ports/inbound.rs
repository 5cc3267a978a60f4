//! # Inbound Ports
//!
//! API trait defining what the Genesis Bridge subsystem can do. The transport
//! layer calls these entry points in per-channel sequence order.

use shared_types::{Acknowledgement, Packet};

use crate::domain::{ChannelGenesisState, GenesisBridgeError};

/// Genesis bridge API - inbound port.
pub trait GenesisBridgeApi: Send + Sync {
    /// A transfer channel to `rollapp_id` was opened.
    ///
    /// Idempotent for the same rollapp; fails with `ChannelRollappConflict`
    /// if the channel is tracked for a different one.
    fn on_chan_open(&mut self, channel_id: &str, rollapp_id: &str)
        -> Result<(), GenesisBridgeError>;

    /// Process an inbound packet.
    ///
    /// Protocol rejections are returned as error acknowledgements; `Err` is
    /// reserved for host faults.
    fn on_recv_packet(&mut self, packet: &Packet) -> Result<Acknowledgement, GenesisBridgeError>;

    /// A packet sent on a channel timed out. Never changes the gate.
    fn on_timeout_packet(&mut self, packet: &Packet) -> Result<(), GenesisBridgeError>;

    /// Whether the channel completed genesis.
    fn is_bridged(&self, channel_id: &str) -> Result<bool, GenesisBridgeError>;

    /// Gate record of the channel, if tracked.
    fn channel_state(
        &self,
        channel_id: &str,
    ) -> Result<Option<ChannelGenesisState>, GenesisBridgeError>;
}
