//! # Genesis Bridge Service
//!
//! The main service implementing [`GenesisBridgeApi`].
//!
//! ## Packet flow
//!
//! ```text
//! packet ─→ gate.classify
//!             ├─ OrdinaryRejected ─→ error ack (bridge not yet established)
//!             ├─ OrdinaryAllowed  ─→ transfer app (scoped, kept on success)
//!             └─ GenesisCandidate ─→ decode ─→ validate ─→ execute ─→ ack
//! ```
//!
//! Recoverable failures become error acknowledgements and leave the store
//! untouched. Fatal failures are returned to the host.

use shared_types::{AckCommitment, Acknowledgement, Packet};
use tracing::{debug, error, info, warn};

use crate::adapters::{CacheStore, ChannelGate};
use crate::algorithms::{
    build_acknowledgement, decode_payload, error_acknowledgement, validate_payload,
};
use crate::config::GenesisBridgeConfig;
use crate::domain::{
    invariant_transfer_not_enabled, ChannelGenesisState, GenesisBridgeError, PacketClass,
};
use crate::ports::{
    DenomRegistry, GenesisBridgeApi, KeyValueStore, Ledger, RollappRegistry, SaleEngine,
    TransferApp,
};

use super::executor::{GenesisExecutor, GenesisReceipt, GenesisTarget};

/// The Genesis Bridge Service.
pub struct GenesisBridgeService<KV, RR, DR, LG, SE, TA>
where
    KV: KeyValueStore,
    RR: RollappRegistry,
    DR: DenomRegistry,
    LG: Ledger,
    SE: SaleEngine,
    TA: TransferApp,
{
    /// Store holding gate records and collaborator state.
    store: KV,
    /// Committed rollapp configurations and channel bindings.
    rollapps: RR,
    /// Denom metadata registry.
    denoms: DR,
    /// Account balances.
    ledger: LG,
    /// Sale plans.
    sales: SE,
    /// Ordinary transfer path.
    transfer: TA,
    /// Per-channel gate.
    gate: ChannelGate,
    /// Service configuration.
    config: GenesisBridgeConfig,
}

/// Dependencies for GenesisBridgeService
pub struct GenesisBridgeDependencies<KV, RR, DR, LG, SE, TA> {
    /// Backing store.
    pub store: KV,
    /// Rollapp registry.
    pub rollapps: RR,
    /// Denom registry.
    pub denoms: DR,
    /// Ledger.
    pub ledger: LG,
    /// Sale engine.
    pub sales: SE,
    /// Transfer application.
    pub transfer: TA,
}

impl<KV, RR, DR, LG, SE, TA> GenesisBridgeService<KV, RR, DR, LG, SE, TA>
where
    KV: KeyValueStore,
    RR: RollappRegistry,
    DR: DenomRegistry,
    LG: Ledger,
    SE: SaleEngine,
    TA: TransferApp,
{
    /// Create a new Genesis Bridge Service with the given dependencies.
    pub fn new(
        deps: GenesisBridgeDependencies<KV, RR, DR, LG, SE, TA>,
        config: GenesisBridgeConfig,
    ) -> Self {
        Self {
            store: deps.store,
            rollapps: deps.rollapps,
            denoms: deps.denoms,
            ledger: deps.ledger,
            sales: deps.sales,
            transfer: deps.transfer,
            gate: ChannelGate::new(config.transfer_port.clone()),
            config,
        }
    }

    /// Backing store.
    pub fn store(&self) -> &KV {
        &self.store
    }

    /// Backing store, mutably (host-side setup such as committing rollapps).
    pub fn store_mut(&mut self) -> &mut KV {
        &mut self.store
    }

    /// Rollapp registry.
    pub fn rollapps(&self) -> &RR {
        &self.rollapps
    }

    /// Denom registry.
    pub fn denoms(&self) -> &DR {
        &self.denoms
    }

    /// Ledger.
    pub fn ledger(&self) -> &LG {
        &self.ledger
    }

    /// Sale engine.
    pub fn sales(&self) -> &SE {
        &self.sales
    }

    /// Service configuration.
    pub fn config(&self) -> &GenesisBridgeConfig {
        &self.config
    }

    /// Commitment the transport stores for `ack`.
    pub fn acknowledgement_commitment(&self, ack: &Acknowledgement) -> AckCommitment {
        ack.commitment(self.config.ack_commitment_version)
    }

    fn process_genesis(&mut self, packet: &Packet) -> Result<GenesisReceipt, GenesisBridgeError> {
        let channel_id = &packet.destination_channel;
        let state = self
            .gate
            .state(&self.store, channel_id)?
            .ok_or_else(|| GenesisBridgeError::BridgeNotEstablished(channel_id.clone()))?;
        invariant_transfer_not_enabled(&state)?;

        let payload = decode_payload(&packet.data)?;
        let committed = self
            .rollapps
            .committed_genesis_config(&self.store, &state.rollapp_id)?;
        let validated = validate_payload(payload, &committed, &self.config)?;

        let target = GenesisTarget {
            port: packet.destination_port.clone(),
            channel_id: channel_id.clone(),
            rollapp_id: state.rollapp_id,
        };
        let executor = GenesisExecutor::new(
            &self.rollapps,
            &self.denoms,
            &self.ledger,
            &self.sales,
            &self.gate,
        );
        executor.execute(&mut self.store, &target, &validated)
    }

    fn handle_genesis(&mut self, packet: &Packet) -> Result<Acknowledgement, GenesisBridgeError> {
        let outcome = self.process_genesis(packet);
        match &outcome {
            Ok(receipt) => info!(
                channel_id = %packet.destination_channel,
                sequence = packet.sequence,
                denom = %receipt.bridged_denom,
                accounts = receipt.accounts_funded,
                plan_id = ?receipt.settled_plan,
                "[qc-18] Genesis bridge established"
            ),
            Err(e) if e.is_fatal() => {
                error!(
                    channel_id = %packet.destination_channel,
                    sequence = packet.sequence,
                    code = e.code(),
                    "[qc-18] Genesis aborted: {}",
                    e
                );
                return Err(e.clone());
            }
            Err(e) => warn!(
                channel_id = %packet.destination_channel,
                sequence = packet.sequence,
                code = e.code(),
                "[qc-18] Genesis rejected: {}",
                e
            ),
        }
        Ok(build_acknowledgement(&outcome))
    }

    fn forward_to_transfer(
        &mut self,
        packet: &Packet,
    ) -> Result<Acknowledgement, GenesisBridgeError> {
        let mut scope = CacheStore::new(&mut self.store);
        let ack = self.transfer.on_recv_packet(&mut scope, packet);
        if ack.is_success() {
            scope.commit()?;
        } else {
            debug!(
                channel_id = %packet.destination_channel,
                sequence = packet.sequence,
                "[qc-18] Transfer rejected by transfer app"
            );
        }
        Ok(ack)
    }
}

impl<KV, RR, DR, LG, SE, TA> GenesisBridgeApi for GenesisBridgeService<KV, RR, DR, LG, SE, TA>
where
    KV: KeyValueStore,
    RR: RollappRegistry,
    DR: DenomRegistry,
    LG: Ledger,
    SE: SaleEngine,
    TA: TransferApp,
{
    fn on_chan_open(
        &mut self,
        channel_id: &str,
        rollapp_id: &str,
    ) -> Result<(), GenesisBridgeError> {
        let state = self.gate.open(&mut self.store, channel_id, rollapp_id)?;
        info!(
            channel_id = %channel_id,
            rollapp_id = %rollapp_id,
            state = ?state.gate_state(),
            "[qc-18] Tracking rollapp channel"
        );
        Ok(())
    }

    fn on_recv_packet(&mut self, packet: &Packet) -> Result<Acknowledgement, GenesisBridgeError> {
        match self.gate.classify(&self.store, packet)? {
            PacketClass::GenesisCandidate => self.handle_genesis(packet),
            PacketClass::OrdinaryRejected => {
                let err = GenesisBridgeError::BridgeNotEstablished(
                    packet.destination_channel.clone(),
                );
                warn!(
                    channel_id = %packet.destination_channel,
                    sequence = packet.sequence,
                    code = err.code(),
                    "[qc-18] Packet rejected before genesis"
                );
                Ok(error_acknowledgement(&err))
            }
            PacketClass::OrdinaryAllowed => {
                if self.gate.is_genesis_packet(packet)
                    && self.is_bridged(&packet.destination_channel)?
                {
                    let err = GenesisBridgeError::GenesisAlreadyCompleted(
                        packet.destination_channel.clone(),
                    );
                    warn!(
                        channel_id = %packet.destination_channel,
                        sequence = packet.sequence,
                        code = err.code(),
                        "[qc-18] Duplicate genesis payload"
                    );
                    return Ok(error_acknowledgement(&err));
                }
                self.forward_to_transfer(packet)
            }
        }
    }

    fn on_timeout_packet(&mut self, packet: &Packet) -> Result<(), GenesisBridgeError> {
        let awaiting = self
            .gate
            .state(&self.store, &packet.source_channel)?
            .is_some_and(|state| !state.gate_state().is_terminal());
        if awaiting {
            debug!(
                channel_id = %packet.source_channel,
                sequence = packet.sequence,
                "[qc-18] Timeout on channel awaiting genesis"
            );
            return Ok(());
        }

        let mut scope = CacheStore::new(&mut self.store);
        self.transfer.on_timeout_packet(&mut scope, packet)?;
        scope.commit()?;
        Ok(())
    }

    fn is_bridged(&self, channel_id: &str) -> Result<bool, GenesisBridgeError> {
        self.gate.is_bridged(&self.store, channel_id)
    }

    fn channel_state(
        &self,
        channel_id: &str,
    ) -> Result<Option<ChannelGenesisState>, GenesisBridgeError> {
        self.gate.state(&self.store, channel_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{
        InMemoryKVStore, KvDenomRegistry, KvLedger, KvRollappRegistry, KvSaleEngine,
        LedgerTransferApp,
    };
    use crate::algorithms::{bridged_denom, encode_payload};
    use crate::domain::{
        CommittedGenesisConfig, DenomMetadata, DenomUnit, GenesisAccount, GenesisBridgePayload,
        GenesisInfo, KVStoreError, NativeDenom,
    };
    use crate::ports::BatchOperation;
    use bech32::{ToBase32, Variant};
    use primitive_types::U256;
    use shared_types::FungibleTokenPacketData;

    type TestService<KV> = GenesisBridgeService<
        KV,
        KvRollappRegistry,
        KvDenomRegistry,
        KvLedger,
        KvSaleEngine,
        LedgerTransferApp<KvLedger>,
    >;

    /// Store whose batch writes fail, for host-fault paths.
    #[derive(Default)]
    struct BrokenBatchStore {
        inner: InMemoryKVStore,
    }

    impl KeyValueStore for BrokenBatchStore {
        fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
            self.inner.get(key)
        }

        fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
            self.inner.put(key, value)
        }

        fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
            self.inner.delete(key)
        }

        fn atomic_batch_write(&mut self, _: Vec<BatchOperation>) -> Result<(), KVStoreError> {
            Err(KVStoreError::IOError {
                message: "disk full".into(),
            })
        }

        fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, KVStoreError> {
            self.inner.prefix_scan(prefix)
        }
    }

    fn address(fill: u8) -> String {
        bech32::encode("ethm", vec![fill; 20].to_base32(), Variant::Bech32).unwrap()
    }

    fn committed() -> CommittedGenesisConfig {
        CommittedGenesisConfig {
            checksum: "checksum".into(),
            bech32_prefix: "ethm".into(),
            native_denom: NativeDenom::new("arax", "RAX", 18),
            initial_supply: U256::from(100_000u64),
            genesis_accounts: vec![GenesisAccount::new(address(1), U256::from(100_000u64))],
        }
    }

    fn payload() -> GenesisBridgePayload {
        let committed = committed();
        GenesisBridgePayload {
            genesis_info: GenesisInfo {
                genesis_checksum: committed.checksum,
                bech32_prefix: committed.bech32_prefix,
                native_denom: committed.native_denom,
                initial_supply: committed.initial_supply,
                genesis_accounts: committed.genesis_accounts,
            },
            native_denom: DenomMetadata {
                base: "arax".into(),
                display: "RAX".into(),
                name: "arax".into(),
                symbol: "RAX".into(),
                denom_units: vec![DenomUnit::new("arax", 0), DenomUnit::new("RAX", 18)],
            },
            genesis_transfer: Some(FungibleTokenPacketData::new(
                "arax",
                "100000",
                address(9),
                "ethm1module",
            )),
        }
    }

    fn packet(sequence: u64, data: Vec<u8>) -> Packet {
        Packet {
            sequence,
            source_port: "transfer".into(),
            source_channel: "channel-0".into(),
            destination_port: "transfer".into(),
            destination_channel: "channel-0".into(),
            data,
            timeout_height: 0,
            timeout_timestamp: 0,
        }
    }

    fn service_with<KV: KeyValueStore>(mut store: KV) -> TestService<KV> {
        KvRollappRegistry::new()
            .register_rollapp(&mut store, "rollapp_1-1", &committed())
            .unwrap();
        let mut service = GenesisBridgeService::new(
            GenesisBridgeDependencies {
                store,
                rollapps: KvRollappRegistry::new(),
                denoms: KvDenomRegistry::new(),
                ledger: KvLedger::new(),
                sales: KvSaleEngine::new(),
                transfer: LedgerTransferApp::new(KvLedger::new()),
            },
            GenesisBridgeConfig::for_testing(),
        );
        service.on_chan_open("channel-0", "rollapp_1-1").unwrap();
        service
    }

    fn service() -> TestService<InMemoryKVStore> {
        service_with(InMemoryKVStore::new())
    }

    #[test]
    fn test_genesis_success() {
        let mut service = service();
        let ack = service
            .on_recv_packet(&packet(1, encode_payload(&payload()).unwrap()))
            .unwrap();

        assert!(ack.is_success());
        assert!(service.is_bridged("channel-0").unwrap());
        let denom = bridged_denom("transfer", "channel-0", "arax");
        assert_eq!(
            service.ledger().balance(service.store(), &address(1), &denom).unwrap(),
            U256::from(100_000u64)
        );
    }

    #[test]
    fn test_success_commitment_uses_configured_version() {
        let service = service();
        let commitment =
            service.acknowledgement_commitment(&crate::algorithms::success_acknowledgement());
        assert_eq!(commitment.version, 1);
    }

    #[test]
    fn test_malformed_payload_is_acknowledged() {
        let mut service = service();
        let ack = service
            .on_recv_packet(&packet(1, br#"{"genesis_info":42}"#.to_vec()))
            .unwrap();

        assert_eq!(ack.error_details().unwrap().code, "malformed_payload");
        assert!(!service.is_bridged("channel-0").unwrap());
    }

    #[test]
    fn test_unknown_rollapp_is_acknowledged() {
        let mut service = service();
        service.on_chan_open("channel-3", "unknown_9-1").unwrap();
        let mut genesis = packet(1, encode_payload(&payload()).unwrap());
        genesis.destination_channel = "channel-3".into();

        let ack = service.on_recv_packet(&genesis).unwrap();
        assert_eq!(ack.error_details().unwrap().code, "rollapp_not_found");
    }

    #[test]
    fn test_ordinary_rejected_before_genesis() {
        let mut service = service();
        let transfer = FungibleTokenPacketData::new("arax", "5", address(9), address(1));
        let before = service.store().clone();

        let ack = service
            .on_recv_packet(&packet(1, transfer.to_bytes().unwrap()))
            .unwrap();

        assert_eq!(ack.error_details().unwrap().code, "bridge_not_established");
        assert_eq!(
            service.store().prefix_scan(b"").unwrap(),
            before.prefix_scan(b"").unwrap()
        );
    }

    #[test]
    fn test_duplicate_genesis_after_bridge() {
        let mut service = service();
        let data = encode_payload(&payload()).unwrap();
        assert!(service.on_recv_packet(&packet(1, data.clone())).unwrap().is_success());

        let ack = service.on_recv_packet(&packet(2, data)).unwrap();
        assert_eq!(
            ack.error_details().unwrap().code,
            "genesis_already_completed"
        );
        assert!(service.is_bridged("channel-0").unwrap());
    }

    #[test]
    fn test_commit_failure_is_fatal() {
        let mut service = service_with(BrokenBatchStore::default());
        let err = service
            .on_recv_packet(&packet(1, encode_payload(&payload()).unwrap()))
            .unwrap_err();

        assert!(err.is_fatal());
        assert!(!service.is_bridged("channel-0").unwrap());
    }

    #[test]
    fn test_timeout_leaves_gate() {
        let mut service = service();
        service.on_timeout_packet(&packet(1, vec![])).unwrap();
        assert_eq!(
            service.channel_state("channel-0").unwrap(),
            Some(ChannelGenesisState::new("channel-0", "rollapp_1-1"))
        );
    }
}
