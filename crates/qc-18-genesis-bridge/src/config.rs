//! # Genesis Bridge Configuration
//!
//! Configuration for the Genesis Bridge service.

use serde::{Deserialize, Serialize};
use std::env;

/// Default port carrying fungible transfers and the genesis payload.
pub const DEFAULT_TRANSFER_PORT: &str = "transfer";

/// Default upper bound on genesis accounts in one payload.
pub const DEFAULT_MAX_GENESIS_ACCOUNTS: usize = 100;

/// Default acknowledgement commitment version.
pub const DEFAULT_ACK_COMMITMENT_VERSION: u8 = 1;

/// Genesis bridge configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisBridgeConfig {
    /// Port whose packets may carry the genesis payload.
    pub transfer_port: String,

    /// Maximum number of genesis accounts accepted in one payload.
    pub max_genesis_accounts: usize,

    /// Version stamped on acknowledgement commitments.
    pub ack_commitment_version: u8,

    /// Hub recipient the genesis transfer must name, if any.
    pub require_transfer_receiver: Option<String>,
}

impl Default for GenesisBridgeConfig {
    fn default() -> Self {
        Self {
            transfer_port: DEFAULT_TRANSFER_PORT.to_string(),
            max_genesis_accounts: DEFAULT_MAX_GENESIS_ACCOUNTS,
            ack_commitment_version: DEFAULT_ACK_COMMITMENT_VERSION,
            require_transfer_receiver: None,
        }
    }
}

impl GenesisBridgeConfig {
    /// Create a config for testing (small account bound).
    pub fn for_testing() -> Self {
        Self {
            max_genesis_accounts: 8,
            ..Self::default()
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `QC_GENESIS_BRIDGE_TRANSFER_PORT`: Transfer port (default: transfer)
    /// - `QC_GENESIS_BRIDGE_MAX_ACCOUNTS`: Account bound (default: 100)
    /// - `QC_GENESIS_BRIDGE_ACK_VERSION`: Commitment version (default: 1)
    /// - `QC_GENESIS_BRIDGE_TRANSFER_RECEIVER`: Required transfer receiver (default: unset)
    pub fn from_env() -> Self {
        Self {
            transfer_port: env::var("QC_GENESIS_BRIDGE_TRANSFER_PORT")
                .unwrap_or_else(|_| DEFAULT_TRANSFER_PORT.to_string()),

            max_genesis_accounts: env::var("QC_GENESIS_BRIDGE_MAX_ACCOUNTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_GENESIS_ACCOUNTS),

            ack_commitment_version: env::var("QC_GENESIS_BRIDGE_ACK_VERSION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_ACK_COMMITMENT_VERSION),

            require_transfer_receiver: env::var("QC_GENESIS_BRIDGE_TRANSFER_RECEIVER")
                .ok()
                .filter(|v| !v.is_empty()),
        }
    }

    /// Set the receiver the genesis transfer must name.
    pub fn with_transfer_receiver(mut self, receiver: impl Into<String>) -> Self {
        self.require_transfer_receiver = Some(receiver.into());
        self
    }
}
