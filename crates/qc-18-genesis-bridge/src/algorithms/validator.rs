//! # Genesis Payload Validator
//!
//! Checks a decoded payload against the configuration the rollapp committed
//! on the hub. No side effects.
//!
//! ## Check order
//!
//! 1. Checksum
//! 2. Bech32 prefix
//! 3. Native denom, metadata and transfer denom
//! 4. Initial supply
//! 5. Transfer presence
//! 6. Account shape (count bound, address, amount)
//! 7. Accounts equal the committed accounts
//! 8. Supply arithmetic and transfer amount
//! 9. Transfer receiver (when configured)
//!
//! The first failing check decides the error.

use primitive_types::U256;

use crate::config::GenesisBridgeConfig;
use crate::domain::{
    invariant_account_well_formed, invariant_bech32_prefix_match, invariant_checksum_match,
    invariant_initial_supply_match, invariant_metadata_consistent, invariant_native_denom_match,
    invariant_transfer_presence, parse_decimal, CommittedGenesisConfig, GenesisAccount,
    GenesisBridgeError, GenesisBridgePayload, ValidatedPayload,
};

/// Sum of genesis account amounts, `None` on overflow.
pub fn sum_genesis_accounts(accounts: &[GenesisAccount]) -> Option<U256> {
    accounts
        .iter()
        .try_fold(U256::zero(), |acc, account| acc.checked_add(account.amount))
}

/// Validate a payload against the committed rollapp configuration.
pub fn validate_payload(
    payload: GenesisBridgePayload,
    committed: &CommittedGenesisConfig,
    config: &GenesisBridgeConfig,
) -> Result<ValidatedPayload, GenesisBridgeError> {
    let info = &payload.genesis_info;

    invariant_checksum_match(&committed.checksum, &info.genesis_checksum)?;
    invariant_bech32_prefix_match(&committed.bech32_prefix, &info.bech32_prefix)?;

    invariant_native_denom_match(&committed.native_denom, &info.native_denom)?;
    invariant_metadata_consistent(&payload.native_denom, &info.native_denom)?;
    if let Some(transfer) = &payload.genesis_transfer {
        if transfer.denom != info.native_denom.base {
            return Err(GenesisBridgeError::DenomMismatch(format!(
                "genesis transfer denom {} is not native base {}",
                transfer.denom, info.native_denom.base
            )));
        }
    }

    invariant_initial_supply_match(committed.initial_supply, info.initial_supply)?;
    invariant_transfer_presence(&info.genesis_accounts, payload.genesis_transfer.as_ref())?;

    if info.genesis_accounts.len() > config.max_genesis_accounts {
        return Err(GenesisBridgeError::MalformedPayload(format!(
            "{} genesis accounts exceed the limit of {}",
            info.genesis_accounts.len(),
            config.max_genesis_accounts
        )));
    }
    for (index, account) in info.genesis_accounts.iter().enumerate() {
        invariant_account_well_formed(index, account, &info.bech32_prefix)?;
    }

    if info.genesis_accounts != committed.genesis_accounts {
        return Err(GenesisBridgeError::GenesisAccountsMismatch);
    }

    let total = sum_genesis_accounts(&info.genesis_accounts).ok_or_else(|| {
        GenesisBridgeError::SupplyMismatch("genesis account total overflows".into())
    })?;
    if total > info.initial_supply {
        return Err(GenesisBridgeError::SupplyMismatch(format!(
            "genesis accounts total {total} exceeds initial supply {}",
            info.initial_supply
        )));
    }

    if let Some(transfer) = &payload.genesis_transfer {
        let amount = parse_decimal(&transfer.amount).ok_or_else(|| {
            GenesisBridgeError::MalformedPayload(format!(
                "genesis transfer amount {:?} is not an unsigned integer",
                transfer.amount
            ))
        })?;
        if amount != total {
            return Err(GenesisBridgeError::SupplyMismatch(format!(
                "genesis transfer amount {amount} does not match genesis accounts total {total}"
            )));
        }

        if let Some(expected) = &config.require_transfer_receiver {
            if &transfer.receiver != expected {
                return Err(GenesisBridgeError::TransferReceiverMismatch {
                    expected: expected.clone(),
                    got: transfer.receiver.clone(),
                });
            }
        }
    }

    Ok(ValidatedPayload::new(payload, total))
}
