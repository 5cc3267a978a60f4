//! # Algorithms Module
//!
//! Pure functions of the Genesis Bridge: payload codec, validation, bridged
//! denom derivation and acknowledgement building.

pub mod ack;
pub mod codec;
pub mod denom;
pub mod validator;

pub use ack::{
    build_acknowledgement, error_acknowledgement, success_acknowledgement, SUCCESS_MARKER,
};
pub use codec::{decode_payload, encode_payload, is_genesis_shaped, GENESIS_INFO_KEY};
pub use denom::{bridged_denom, hub_denom_metadata, BRIDGED_DENOM_PREFIX};
pub use validator::{sum_genesis_accounts, validate_payload};
