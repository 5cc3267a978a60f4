//! # Domain Errors
//!
//! Error taxonomy for the genesis bridge.
//!
//! Every variant except [`GenesisBridgeError::AlreadyBridged`] and
//! [`GenesisBridgeError::Storage`] is recoverable: it is reported to the
//! rollapp through an error acknowledgement and leaves local state untouched.

use thiserror::Error;

/// Genesis bridge error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenesisBridgeError {
    /// Payload could not be decoded or is structurally unusable.
    #[error("Malformed genesis payload: {0}")]
    MalformedPayload(String),

    /// Checksum differs from the one committed for the rollapp.
    #[error("Genesis checksum mismatch: expected {expected}, got {got}")]
    ChecksumMismatch {
        /// Committed checksum
        expected: String,
        /// Checksum in the payload
        got: String,
    },

    /// Bech32 prefix differs from the one committed for the rollapp.
    #[error("Bech32 prefix mismatch: expected {expected}, got {got}")]
    Bech32PrefixMismatch {
        /// Committed prefix
        expected: String,
        /// Prefix in the payload
        got: String,
    },

    /// Native denom or its metadata is inconsistent.
    #[error("Denom mismatch: {0}")]
    DenomMismatch(String),

    /// Supply figures do not add up.
    #[error("Supply mismatch: {0}")]
    SupplyMismatch(String),

    /// Genesis transfer present without accounts, or missing with accounts.
    #[error(
        "Genesis transfer presence mismatch: {accounts} accounts, transfer: {transfer_present}"
    )]
    TransferPresenceMismatch {
        /// Number of genesis accounts in the payload
        accounts: usize,
        /// Whether the payload carried a transfer
        transfer_present: bool,
    },

    /// A genesis account is not usable.
    #[error("Malformed genesis account #{index} ({address}): {reason}")]
    MalformedAccount {
        /// Position in the account list
        index: usize,
        /// Offending address
        address: String,
        /// What is wrong with it
        reason: String,
    },

    /// Genesis accounts differ from the committed genesis info.
    #[error("Genesis accounts do not match the committed genesis info")]
    GenesisAccountsMismatch,

    /// Genesis transfer names an unexpected receiver.
    #[error("Genesis transfer receiver mismatch: expected {expected}, got {got}")]
    TransferReceiverMismatch {
        /// Configured hub recipient
        expected: String,
        /// Receiver in the transfer
        got: String,
    },

    /// No committed genesis configuration for the rollapp.
    #[error("Rollapp not found: {0}")]
    RollappNotFound(String),

    /// Denom metadata already registered with different content.
    #[error("Denom metadata conflict for {base}")]
    RegistryConflict {
        /// Base denom of the conflicting metadata
        base: String,
    },

    /// A ledger credit failed.
    #[error("Ledger failure: {0}")]
    LedgerFailure(String),

    /// Sale plan settlement failed.
    #[error("Sale plan settlement failed: {0}")]
    SettlementFailure(String),

    /// Rollapp already has another canonical channel.
    #[error("Rollapp {rollapp_id} already bound to channel {existing}")]
    CanonicalChannelConflict {
        /// Rollapp being bound
        rollapp_id: String,
        /// Channel it is already bound to
        existing: String,
    },

    /// Channel opened for a different rollapp than requested.
    #[error("Channel {channel_id} belongs to rollapp {bound}, not {requested}")]
    ChannelRollappConflict {
        /// Channel being opened
        channel_id: String,
        /// Rollapp the channel is tracked for
        bound: String,
        /// Rollapp requested now
        requested: String,
    },

    /// Ordinary traffic on a channel still awaiting genesis.
    #[error("Transfers disabled: bridge not yet established on channel {0}")]
    BridgeNotEstablished(String),

    /// Genesis payload on a channel that finished genesis.
    #[error("Genesis already completed on channel {0}")]
    GenesisAlreadyCompleted(String),

    /// `mark_bridged` on a bridged channel. Indicates a gate or transport bug.
    #[error("Channel {0} is already bridged")]
    AlreadyBridged(String),

    /// Backing store failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl GenesisBridgeError {
    /// Machine-readable code carried in error acknowledgements.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedPayload(_) => "malformed_payload",
            Self::ChecksumMismatch { .. } => "checksum_mismatch",
            Self::Bech32PrefixMismatch { .. } => "bech32_prefix_mismatch",
            Self::DenomMismatch(_) => "denom_mismatch",
            Self::SupplyMismatch(_) => "supply_mismatch",
            Self::TransferPresenceMismatch { .. } => "transfer_presence_mismatch",
            Self::MalformedAccount { .. } => "malformed_account",
            Self::GenesisAccountsMismatch => "genesis_accounts_mismatch",
            Self::TransferReceiverMismatch { .. } => "transfer_receiver_mismatch",
            Self::RollappNotFound(_) => "rollapp_not_found",
            Self::RegistryConflict { .. } => "registry_conflict",
            Self::LedgerFailure(_) => "ledger_failure",
            Self::SettlementFailure(_) => "settlement_failure",
            Self::CanonicalChannelConflict { .. } => "canonical_channel_conflict",
            Self::ChannelRollappConflict { .. } => "channel_rollapp_conflict",
            Self::BridgeNotEstablished(_) => "bridge_not_established",
            Self::GenesisAlreadyCompleted(_) => "genesis_already_completed",
            Self::AlreadyBridged(_) => "already_bridged",
            Self::Storage(_) => "storage_error",
        }
    }

    /// Whether this error is a host fault rather than a protocol rejection.
    ///
    /// Fatal errors are returned to the host instead of being acknowledged.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::AlreadyBridged(_) | Self::Storage(_))
    }
}

/// Key-value store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IOError {
        /// Underlying failure
        message: String,
    },
    /// Stored bytes could not be decoded.
    #[error("KV store corruption: {message}")]
    CorruptionError {
        /// Underlying failure
        message: String,
    },
}

impl From<KVStoreError> for GenesisBridgeError {
    fn from(err: KVStoreError) -> Self {
        GenesisBridgeError::Storage(err.to_string())
    }
}
