//! # Acknowledgement Builder
//!
//! Maps a packet outcome to the acknowledgement written back to the rollapp.

use shared_types::Acknowledgement;

use crate::domain::GenesisBridgeError;

/// Fixed "result succeeded" marker carried by every success acknowledgement.
pub const SUCCESS_MARKER: [u8; 1] = [0x01];

/// Success acknowledgement.
pub fn success_acknowledgement() -> Acknowledgement {
    Acknowledgement::success(SUCCESS_MARKER.to_vec())
}

/// Error acknowledgement for `err`.
pub fn error_acknowledgement(err: &GenesisBridgeError) -> Acknowledgement {
    Acknowledgement::error(err.code(), err.to_string())
}

/// Acknowledgement for an outcome.
pub fn build_acknowledgement<T>(outcome: &Result<T, GenesisBridgeError>) -> Acknowledgement {
    match outcome {
        Ok(_) => success_acknowledgement(),
        Err(err) => error_acknowledgement(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_is_deterministic() {
        let a = build_acknowledgement::<()>(&Ok(()));
        let b = build_acknowledgement::<()>(&Ok(()));
        assert_eq!(a.commitment(1), b.commitment(1));
        assert_eq!(a.to_bytes(), br#"{"result":"AQ=="}"#.to_vec());
    }

    #[test]
    fn test_error_carries_code_and_message() {
        let ack = build_acknowledgement::<()>(&Err(GenesisBridgeError::SupplyMismatch(
            "initial supply 1 does not match committed 2".into(),
        )));
        let details = ack.error_details().unwrap();
        assert_eq!(details.code, "supply_mismatch");
        assert!(details.message.contains("initial supply 1"));
    }

    #[test]
    fn test_bridge_not_established_message() {
        let ack = error_acknowledgement(&GenesisBridgeError::BridgeNotEstablished(
            "channel-0".into(),
        ));
        let details = ack.error_details().unwrap();
        assert_eq!(details.code, "bridge_not_established");
        assert!(details.message.contains("bridge not yet established"));
    }
}
