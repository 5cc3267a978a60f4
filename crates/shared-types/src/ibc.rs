//! # Inter-Chain Packet Types
//!
//! Transport-level types exchanged over a channel between the hub and a
//! rollapp. The relayer layer owns ordering, sequencing and delivery; these
//! types only describe what it hands to a receiving subsystem and what the
//! subsystem commits back.
//!
//! ## Acknowledgement encoding
//!
//! | Outcome | JSON |
//! |---------|------|
//! | Success | `{"result":"<base64 marker>"}` |
//! | Failure | `{"error":{"code":"...","message":"..."}}` |
//!
//! The transport commits `SHA-256(json)` together with a commitment version.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::entities::Hash;

/// A packet delivered on a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Packet {
    /// Transport-assigned sequence number.
    pub sequence: u64,
    /// Port on the sending chain.
    pub source_port: String,
    /// Channel on the sending chain.
    pub source_channel: String,
    /// Port on the receiving chain.
    pub destination_port: String,
    /// Channel on the receiving chain.
    pub destination_channel: String,
    /// Opaque application payload.
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
    /// Timeout height on the receiving chain (0 = disabled).
    pub timeout_height: u64,
    /// Timeout timestamp in nanoseconds (0 = disabled).
    pub timeout_timestamp: u64,
}

/// ICS-20 fungible token transfer body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FungibleTokenPacketData {
    /// Denomination as seen by the sender.
    pub denom: String,
    /// Decimal string amount.
    pub amount: String,
    /// Sender address on the source chain.
    pub sender: String,
    /// Receiver address on the destination chain.
    pub receiver: String,
    /// Free-form memo.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub memo: String,
}

impl FungibleTokenPacketData {
    /// Create transfer data without a memo.
    pub fn new(
        denom: impl Into<String>,
        amount: impl Into<String>,
        sender: impl Into<String>,
        receiver: impl Into<String>,
    ) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.into(),
            sender: sender.into(),
            receiver: receiver.into(),
            memo: String::new(),
        }
    }

    /// Encode as packet data.
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Decode from packet data.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

/// Structured error carried by a failed acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AckError {
    /// Short machine-readable code (snake_case).
    pub code: String,
    /// Human-readable description.
    pub message: String,
}

/// Acknowledgement written by the receiving chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Acknowledgement {
    /// Packet processed; carries the application's result marker.
    Result(#[serde(with = "base64_bytes")] Vec<u8>),
    /// Packet rejected; no state from it was committed.
    Error(AckError),
}

impl Acknowledgement {
    /// Successful acknowledgement with the given result marker.
    pub fn success(result: impl Into<Vec<u8>>) -> Self {
        Self::Result(result.into())
    }

    /// Error acknowledgement.
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error(AckError {
            code: code.into(),
            message: message.into(),
        })
    }

    /// Whether this acknowledges success.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Result(_))
    }

    /// Error details, if this is an error acknowledgement.
    pub fn error_details(&self) -> Option<&AckError> {
        match self {
            Self::Error(err) => Some(err),
            Self::Result(_) => None,
        }
    }

    /// Canonical JSON encoding.
    pub fn to_bytes(&self) -> Vec<u8> {
        // Both variants hold only strings and bytes; encoding cannot fail.
        serde_json::to_vec(self).unwrap_or_default()
    }

    /// Decode from the canonical JSON encoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Content-addressed commitment stored by the transport.
    pub fn commitment(&self, version: u8) -> AckCommitment {
        let digest: Hash = Sha256::digest(self.to_bytes()).into();
        AckCommitment { version, digest }
    }
}

/// Versioned commitment over an acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AckCommitment {
    /// Commitment scheme version.
    pub version: u8,
    /// SHA-256 of the canonical acknowledgement bytes.
    pub digest: Hash,
}

mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded.as_bytes()).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_ack_json() {
        let ack = Acknowledgement::success(vec![1u8]);
        assert_eq!(ack.to_bytes(), br#"{"result":"AQ=="}"#.to_vec());
        assert!(ack.is_success());
    }

    #[test]
    fn test_error_ack_json() {
        let ack = Acknowledgement::error("checksum_mismatch", "Checksum mismatch");
        let json = String::from_utf8(ack.to_bytes()).unwrap();
        assert_eq!(
            json,
            r#"{"error":{"code":"checksum_mismatch","message":"Checksum mismatch"}}"#
        );
        assert_eq!(ack.error_details().unwrap().code, "checksum_mismatch");
    }

    #[test]
    fn test_ack_decode() {
        let ack = Acknowledgement::from_bytes(br#"{"result":"AQ=="}"#).unwrap();
        assert_eq!(ack, Acknowledgement::success(vec![1u8]));
    }

    #[test]
    fn test_commitment_is_deterministic() {
        let a = Acknowledgement::success(vec![1u8]).commitment(1);
        let b = Acknowledgement::success(vec![1u8]).commitment(1);
        assert_eq!(a, b);
        assert_ne!(a, Acknowledgement::error("x", "y").commitment(1));
        assert_ne!(a, Acknowledgement::success(vec![1u8]).commitment(2));
    }

    #[test]
    fn test_commitment_matches_sha256_of_json() {
        let ack = Acknowledgement::success(vec![1u8]);
        let expected: Hash = Sha256::digest(br#"{"result":"AQ=="}"#).into();
        assert_eq!(ack.commitment(1).digest, expected);
    }

    #[test]
    fn test_transfer_data_memo_omitted() {
        let data = FungibleTokenPacketData::new("urax", "100", "a", "b");
        let json = String::from_utf8(data.to_bytes().unwrap()).unwrap();
        assert!(!json.contains("memo"));
        assert_eq!(FungibleTokenPacketData::from_bytes(json.as_bytes()).unwrap(), data);
    }

    #[test]
    fn test_packet_data_base64() {
        let packet = Packet {
            sequence: 1,
            source_port: "transfer".into(),
            source_channel: "channel-0".into(),
            destination_port: "transfer".into(),
            destination_channel: "channel-0".into(),
            data: b"{}".to_vec(),
            timeout_height: 0,
            timeout_timestamp: 0,
        };
        let json = serde_json::to_string(&packet).unwrap();
        assert!(json.contains(r#""data":"e30=""#));
    }
}
