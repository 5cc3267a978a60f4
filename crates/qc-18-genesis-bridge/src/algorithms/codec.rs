//! # Genesis Payload Codec
//!
//! JSON encoding of [`GenesisBridgePayload`]. Structural only: any semantic
//! check belongs to the validator.

use crate::domain::{GenesisBridgeError, GenesisBridgePayload};

/// Top-level key that marks a packet body as a genesis payload.
pub const GENESIS_INFO_KEY: &str = "genesis_info";

/// Decode a genesis payload from packet data.
pub fn decode_payload(bytes: &[u8]) -> Result<GenesisBridgePayload, GenesisBridgeError> {
    serde_json::from_slice(bytes).map_err(|e| GenesisBridgeError::MalformedPayload(e.to_string()))
}

/// Encode a genesis payload as packet data.
pub fn encode_payload(payload: &GenesisBridgePayload) -> Result<Vec<u8>, GenesisBridgeError> {
    serde_json::to_vec(payload).map_err(|e| GenesisBridgeError::MalformedPayload(e.to_string()))
}

/// Whether packet data looks like a genesis payload.
///
/// A JSON object with a top-level `genesis_info` key. The body is not
/// otherwise inspected, so a broken genesis payload is still routed to the
/// validator and rejected with a precise error.
pub fn is_genesis_shaped(bytes: &[u8]) -> bool {
    match serde_json::from_slice::<serde_json::Value>(bytes) {
        Ok(serde_json::Value::Object(map)) => map.contains_key(GENESIS_INFO_KEY),
        _ => false,
    }
}
