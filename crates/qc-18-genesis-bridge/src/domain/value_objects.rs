//! # Domain Value Objects
//!
//! Identifiers, the per-channel gate state machine and packet classes.

use primitive_types::U256;
use serde::{Deserialize, Serialize};

/// Channel identifier on the hub (e.g. `channel-0`).
pub type ChannelId = String;

/// Rollapp (chain) identifier (e.g. `rollapp_1234-1`).
pub type RollappId = String;

/// Per-channel gate state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateState {
    /// Channel open, genesis payload not yet applied.
    #[default]
    AwaitingGenesis,
    /// Genesis applied; ordinary traffic allowed. Terminal.
    Bridged,
}

impl GateState {
    /// Check if transition is valid.
    pub fn can_transition_to(&self, next: GateState) -> bool {
        matches!((self, next), (Self::AwaitingGenesis, Self::Bridged))
    }

    /// Check if terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Bridged)
    }
}

/// How the gate treats an inbound packet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PacketClass {
    /// Genesis-shaped packet on a channel awaiting genesis.
    GenesisCandidate,
    /// Any other packet on a channel awaiting genesis.
    OrdinaryRejected,
    /// Channel is bridged (or not gated at all).
    OrdinaryAllowed,
}

/// Serde adapter encoding `U256` as a decimal string.
pub mod u256_decimal {
    use primitive_types::U256;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    /// Serialize as a decimal string.
    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    /// Deserialize from a decimal string.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_decimal(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid unsigned integer: {raw:?}")))
    }
}

/// Parse a non-empty decimal string into `U256`.
pub fn parse_decimal(raw: &str) -> Option<U256> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    U256::from_dec_str(raw).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_awaiting_to_bridged() {
        assert!(GateState::AwaitingGenesis.can_transition_to(GateState::Bridged));
    }

    #[test]
    fn test_gate_bridged_is_terminal() {
        assert!(GateState::Bridged.is_terminal());
        assert!(!GateState::Bridged.can_transition_to(GateState::AwaitingGenesis));
        assert!(!GateState::Bridged.can_transition_to(GateState::Bridged));
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("100000"), Some(U256::from(100_000u64)));
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("-5"), None);
        assert_eq!(parse_decimal("1e18"), None);
        assert_eq!(parse_decimal(" 1"), None);
    }

    #[test]
    fn test_parse_decimal_overflow() {
        let too_big = format!("{}0", U256::MAX);
        assert_eq!(parse_decimal(&too_big), None);
    }
}
