//! # Transfer Application Adapter
//!
//! Minimal fungible transfer receiver: every inbound transfer mints the
//! voucher denom of the sending chain's token to the receiver. Escrow of
//! hub-native tokens and refunds belong to the full transfer module.

use shared_types::{Acknowledgement, FungibleTokenPacketData, Packet};
use tracing::debug;

use crate::algorithms::{bridged_denom, success_acknowledgement};
use crate::domain::{parse_decimal, GenesisBridgeError};
use crate::ports::{KeyValueStore, Ledger, TransferApp};

/// Transfer application crediting a [`Ledger`].
#[derive(Clone, Debug, Default)]
pub struct LedgerTransferApp<L> {
    ledger: L,
}

impl<L: Ledger> LedgerTransferApp<L> {
    /// Create the application over `ledger`.
    pub fn new(ledger: L) -> Self {
        Self { ledger }
    }

    fn receive(
        &self,
        store: &mut dyn KeyValueStore,
        packet: &Packet,
    ) -> Result<(), Acknowledgement> {
        let data = FungibleTokenPacketData::from_bytes(&packet.data)
            .map_err(|e| Acknowledgement::error("invalid_packet_data", e.to_string()))?;

        let amount = parse_decimal(&data.amount)
            .filter(|amount| !amount.is_zero())
            .ok_or_else(|| {
                Acknowledgement::error(
                    "invalid_amount",
                    format!("amount {:?} is not a positive integer", data.amount),
                )
            })?;

        let voucher = bridged_denom(
            &packet.destination_port,
            &packet.destination_channel,
            &data.denom,
        );
        self.ledger
            .credit(store, &data.receiver, &voucher, amount)
            .map_err(|e| Acknowledgement::error(e.code(), e.to_string()))?;

        debug!(
            channel_id = %packet.destination_channel,
            sequence = packet.sequence,
            denom = %voucher,
            "[qc-18] Transfer received"
        );
        Ok(())
    }
}

impl<L: Ledger> TransferApp for LedgerTransferApp<L> {
    fn on_recv_packet(&self, store: &mut dyn KeyValueStore, packet: &Packet) -> Acknowledgement {
        match self.receive(store, packet) {
            Ok(()) => success_acknowledgement(),
            Err(ack) => ack,
        }
    }

    fn on_timeout_packet(
        &self,
        _store: &mut dyn KeyValueStore,
        packet: &Packet,
    ) -> Result<(), GenesisBridgeError> {
        debug!(
            channel_id = %packet.source_channel,
            sequence = packet.sequence,
            "[qc-18] Transfer timed out"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::bank::KvLedger;
    use crate::adapters::store::InMemoryKVStore;
    use primitive_types::U256;

    fn packet(data: Vec<u8>) -> Packet {
        Packet {
            sequence: 4,
            source_port: "transfer".into(),
            source_channel: "channel-7".into(),
            destination_port: "transfer".into(),
            destination_channel: "channel-0".into(),
            data,
            timeout_height: 0,
            timeout_timestamp: 0,
        }
    }

    #[test]
    fn test_receive_credits_voucher() {
        let mut store = InMemoryKVStore::new();
        let app = LedgerTransferApp::new(KvLedger::new());
        let data = FungibleTokenPacketData::new("arax", "250", "ethm1sender", "ethm1receiver");

        let ack = app.on_recv_packet(&mut store, &packet(data.to_bytes().unwrap()));
        assert!(ack.is_success());

        let voucher = bridged_denom("transfer", "channel-0", "arax");
        assert_eq!(
            KvLedger::new().balance(&store, "ethm1receiver", &voucher).unwrap(),
            U256::from(250u64)
        );
    }

    #[test]
    fn test_receive_garbage() {
        let mut store = InMemoryKVStore::new();
        let app = LedgerTransferApp::new(KvLedger::new());
        let ack = app.on_recv_packet(&mut store, &packet(b"garbage".to_vec()));
        assert_eq!(ack.error_details().unwrap().code, "invalid_packet_data");
        assert!(store.is_empty());
    }

    #[test]
    fn test_receive_zero_amount() {
        let mut store = InMemoryKVStore::new();
        let app = LedgerTransferApp::new(KvLedger::new());
        let data = FungibleTokenPacketData::new("arax", "0", "a", "b");
        let ack = app.on_recv_packet(&mut store, &packet(data.to_bytes().unwrap()));
        assert_eq!(ack.error_details().unwrap().code, "invalid_amount");
    }

    #[test]
    fn test_receive_blocked_receiver() {
        let mut store = InMemoryKVStore::new();
        let app = LedgerTransferApp::new(KvLedger::new().with_blocked_address("ethm1blocked"));
        let data = FungibleTokenPacketData::new("arax", "1", "a", "ethm1blocked");
        let ack = app.on_recv_packet(&mut store, &packet(data.to_bytes().unwrap()));
        assert_eq!(ack.error_details().unwrap().code, "ledger_failure");
    }
}
