//! # Domain Entities
//!
//! Wire payload of the genesis bridge, the per-channel gate record and the
//! committed rollapp configuration the payload is checked against.

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use shared_types::FungibleTokenPacketData;

use super::errors::GenesisBridgeError;
use super::value_objects::{u256_decimal, ChannelId, GateState, RollappId};

/// Genesis bridge payload sent by the rollapp on its transfer channel.
///
/// Consumed exactly once per channel, on the first successful delivery.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisBridgePayload {
    /// Rollapp genesis summary.
    pub genesis_info: GenesisInfo,
    /// Full metadata of the rollapp native denom.
    pub native_denom: DenomMetadata,
    /// Transfer backing the genesis accounts; present iff there are any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genesis_transfer: Option<FungibleTokenPacketData>,
}

/// Genesis summary reported by the rollapp.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisInfo {
    /// Checksum of the rollapp genesis file.
    pub genesis_checksum: String,
    /// Account address prefix of the rollapp.
    pub bech32_prefix: String,
    /// Native denom summary.
    pub native_denom: NativeDenom,
    /// Total supply minted at rollapp genesis.
    #[serde(with = "u256_decimal")]
    pub initial_supply: U256,
    /// Hub accounts funded at genesis.
    #[serde(default)]
    pub genesis_accounts: Vec<GenesisAccount>,
}

/// Short description of a native denom.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeDenom {
    /// Base (smallest) unit.
    pub base: String,
    /// Display unit.
    pub display: String,
    /// Exponent of the display unit.
    pub exponent: u32,
}

impl NativeDenom {
    /// Create a native denom summary.
    pub fn new(base: impl Into<String>, display: impl Into<String>, exponent: u32) -> Self {
        Self {
            base: base.into(),
            display: display.into(),
            exponent,
        }
    }
}

/// Full denomination metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenomMetadata {
    /// Base unit.
    pub base: String,
    /// Display unit.
    pub display: String,
    /// Human-readable name.
    pub name: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Units ordered by increasing exponent; the first is the base at 0.
    pub denom_units: Vec<DenomUnit>,
}

impl DenomMetadata {
    /// Find a unit by denom.
    pub fn unit(&self, denom: &str) -> Option<&DenomUnit> {
        self.denom_units.iter().find(|u| u.denom == denom)
    }
}

/// One unit of a denomination.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenomUnit {
    /// Unit name.
    pub denom: String,
    /// Power of ten relative to the base unit.
    pub exponent: u32,
    /// Alternative names.
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl DenomUnit {
    /// Create a unit without aliases.
    pub fn new(denom: impl Into<String>, exponent: u32) -> Self {
        Self {
            denom: denom.into(),
            exponent,
            aliases: Vec::new(),
        }
    }
}

/// Hub account funded at genesis.
///
/// Addresses are not required to be unique.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisAccount {
    /// Bech32 account address.
    pub address: String,
    /// Amount of the native base denom.
    #[serde(with = "u256_decimal")]
    pub amount: U256,
}

impl GenesisAccount {
    /// Create a genesis account.
    pub fn new(address: impl Into<String>, amount: U256) -> Self {
        Self {
            address: address.into(),
            amount,
        }
    }
}

/// Gate record for one channel.
///
/// Created when the channel opens, flipped once by the executor, never
/// deleted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelGenesisState {
    /// Hub channel.
    pub channel_id: ChannelId,
    /// Rollapp on the other end.
    pub rollapp_id: RollappId,
    /// Whether ordinary transfers are allowed. Monotonic.
    pub transfer_enabled: bool,
}

impl ChannelGenesisState {
    /// State for a freshly opened channel.
    pub fn new(channel_id: impl Into<ChannelId>, rollapp_id: impl Into<RollappId>) -> Self {
        Self {
            channel_id: channel_id.into(),
            rollapp_id: rollapp_id.into(),
            transfer_enabled: false,
        }
    }

    /// Current gate state.
    pub fn gate_state(&self) -> GateState {
        if self.transfer_enabled {
            GateState::Bridged
        } else {
            GateState::AwaitingGenesis
        }
    }

    /// Flip the gate to `Bridged`.
    pub fn enable_transfers(&mut self) -> Result<(), GenesisBridgeError> {
        if !self.gate_state().can_transition_to(GateState::Bridged) {
            return Err(GenesisBridgeError::AlreadyBridged(self.channel_id.clone()));
        }
        self.transfer_enabled = true;
        Ok(())
    }
}

/// Genesis configuration the rollapp committed on the hub before launch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommittedGenesisConfig {
    /// Genesis file checksum.
    pub checksum: String,
    /// Account address prefix.
    pub bech32_prefix: String,
    /// Native denom summary.
    pub native_denom: NativeDenom,
    /// Initial supply.
    #[serde(with = "u256_decimal")]
    pub initial_supply: U256,
    /// Hub accounts to fund.
    pub genesis_accounts: Vec<GenesisAccount>,
}

/// Token sale plan created for a rollapp before its launch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalePlan {
    /// Plan identifier.
    pub plan_id: u64,
    /// Rollapp the plan sells.
    pub rollapp_id: RollappId,
    /// Hub account that receives the plan's genesis allocation.
    pub holding_account: String,
    /// Amount of the rollapp token the plan sells.
    #[serde(with = "u256_decimal")]
    pub total_allocation: U256,
    /// Bridged denom the plan settled in, once settled.
    pub settled_denom: Option<String>,
}

impl SalePlan {
    /// Whether the plan has been settled.
    pub fn is_settled(&self) -> bool {
        self.settled_denom.is_some()
    }
}

/// Payload that passed every validator check.
///
/// Only the validator constructs this type; the executor accepts nothing
/// else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedPayload {
    payload: GenesisBridgePayload,
    genesis_accounts_total: U256,
}

impl ValidatedPayload {
    pub(crate) fn new(payload: GenesisBridgePayload, genesis_accounts_total: U256) -> Self {
        Self {
            payload,
            genesis_accounts_total,
        }
    }

    /// Validated payload.
    pub fn payload(&self) -> &GenesisBridgePayload {
        &self.payload
    }

    /// Genesis accounts to fund.
    pub fn genesis_accounts(&self) -> &[GenesisAccount] {
        &self.payload.genesis_info.genesis_accounts
    }

    /// Sum of all genesis account amounts.
    pub fn genesis_accounts_total(&self) -> U256 {
        self.genesis_accounts_total
    }

    /// Whether a genesis transfer accompanied the payload.
    pub fn has_transfer(&self) -> bool {
        self.payload.genesis_transfer.is_some()
    }
}
