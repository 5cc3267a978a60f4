//! # Domain Invariants
//!
//! Business rules a genesis payload must satisfy before any state is touched.
//! Each rule is an independent predicate over immutable inputs.

use bech32::{FromBase32, Variant};
use primitive_types::U256;
use shared_types::FungibleTokenPacketData;

use super::entities::{ChannelGenesisState, DenomMetadata, GenesisAccount, NativeDenom};
use super::errors::GenesisBridgeError;

/// Accepted raw address lengths: user accounts and module/contract accounts.
pub const ACCOUNT_ADDRESS_LENGTHS: [usize; 2] = [20, 32];

/// Invariant: checksum equals the one committed for the rollapp.
pub fn invariant_checksum_match(committed: &str, got: &str) -> Result<(), GenesisBridgeError> {
    if committed != got {
        return Err(GenesisBridgeError::ChecksumMismatch {
            expected: committed.to_string(),
            got: got.to_string(),
        });
    }
    Ok(())
}

/// Invariant: bech32 prefix equals the one committed for the rollapp.
pub fn invariant_bech32_prefix_match(
    committed: &str,
    got: &str,
) -> Result<(), GenesisBridgeError> {
    if committed != got {
        return Err(GenesisBridgeError::Bech32PrefixMismatch {
            expected: committed.to_string(),
            got: got.to_string(),
        });
    }
    Ok(())
}

/// Invariant: declared native denom equals the committed one.
pub fn invariant_native_denom_match(
    committed: &NativeDenom,
    got: &NativeDenom,
) -> Result<(), GenesisBridgeError> {
    if committed != got {
        return Err(GenesisBridgeError::DenomMismatch(format!(
            "native denom {}/{}/{} does not match committed {}/{}/{}",
            got.base,
            got.display,
            got.exponent,
            committed.base,
            committed.display,
            committed.exponent
        )));
    }
    Ok(())
}

/// Invariant: metadata describes the declared native denom.
///
/// Same base, a unit matching display and exponent, and a well-formed unit
/// list (base first at exponent 0, strictly increasing exponents, display
/// among the units).
pub fn invariant_metadata_consistent(
    metadata: &DenomMetadata,
    native: &NativeDenom,
) -> Result<(), GenesisBridgeError> {
    if metadata.base != native.base {
        return Err(GenesisBridgeError::DenomMismatch(format!(
            "metadata base {} differs from native base {}",
            metadata.base, native.base
        )));
    }

    let first = metadata
        .denom_units
        .first()
        .ok_or_else(|| GenesisBridgeError::DenomMismatch("metadata has no denom units".into()))?;
    if first.denom != metadata.base || first.exponent != 0 {
        return Err(GenesisBridgeError::DenomMismatch(format!(
            "first denom unit must be {} with exponent 0",
            metadata.base
        )));
    }

    if metadata
        .denom_units
        .windows(2)
        .any(|pair| pair[1].exponent <= pair[0].exponent)
    {
        return Err(GenesisBridgeError::DenomMismatch(
            "denom unit exponents must be strictly increasing".into(),
        ));
    }

    if metadata.unit(&metadata.display).is_none() {
        return Err(GenesisBridgeError::DenomMismatch(format!(
            "display {} is not a denom unit",
            metadata.display
        )));
    }

    let matches_native = metadata
        .denom_units
        .iter()
        .any(|u| u.denom == native.display && u.exponent == native.exponent);
    if !matches_native {
        return Err(GenesisBridgeError::DenomMismatch(format!(
            "no denom unit {} with exponent {}",
            native.display, native.exponent
        )));
    }
    Ok(())
}

/// Invariant: declared initial supply equals the committed one.
pub fn invariant_initial_supply_match(
    committed: U256,
    got: U256,
) -> Result<(), GenesisBridgeError> {
    if committed != got {
        return Err(GenesisBridgeError::SupplyMismatch(format!(
            "initial supply {got} does not match committed {committed}"
        )));
    }
    Ok(())
}

/// Invariant: a transfer is present if and only if there are genesis accounts.
pub fn invariant_transfer_presence(
    accounts: &[GenesisAccount],
    transfer: Option<&FungibleTokenPacketData>,
) -> Result<(), GenesisBridgeError> {
    if accounts.is_empty() == transfer.is_none() {
        return Ok(());
    }
    Err(GenesisBridgeError::TransferPresenceMismatch {
        accounts: accounts.len(),
        transfer_present: transfer.is_some(),
    })
}

/// Invariant: account address is a bech32 account under `prefix` and the
/// amount is non-zero.
pub fn invariant_account_well_formed(
    index: usize,
    account: &GenesisAccount,
    prefix: &str,
) -> Result<(), GenesisBridgeError> {
    let malformed = |reason: String| GenesisBridgeError::MalformedAccount {
        index,
        address: account.address.clone(),
        reason,
    };

    if account.amount.is_zero() {
        return Err(malformed("amount must be positive".into()));
    }

    let (hrp, data, variant) =
        bech32::decode(&account.address).map_err(|e| malformed(format!("invalid bech32: {e}")))?;
    if variant != Variant::Bech32 {
        return Err(malformed("bech32m addresses are not accounts".into()));
    }
    if hrp != prefix.to_lowercase() {
        return Err(malformed(format!("prefix {hrp} is not {prefix}")));
    }
    let bytes =
        Vec::<u8>::from_base32(&data).map_err(|e| malformed(format!("invalid base32 data: {e}")))?;
    if !ACCOUNT_ADDRESS_LENGTHS.contains(&bytes.len()) {
        return Err(malformed(format!(
            "address length {} is not one of {:?}",
            bytes.len(),
            ACCOUNT_ADDRESS_LENGTHS
        )));
    }
    Ok(())
}

/// Invariant: the channel has not completed genesis.
pub fn invariant_transfer_not_enabled(
    state: &ChannelGenesisState,
) -> Result<(), GenesisBridgeError> {
    if state.transfer_enabled {
        return Err(GenesisBridgeError::GenesisAlreadyCompleted(
            state.channel_id.clone(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::DenomUnit;
    use bech32::ToBase32;

    fn address(prefix: &str, fill: u8, len: usize) -> String {
        bech32::encode(prefix, vec![fill; len].to_base32(), Variant::Bech32).unwrap()
    }

    fn metadata() -> DenomMetadata {
        DenomMetadata {
            base: "arax".into(),
            display: "RAX".into(),
            name: "arax".into(),
            symbol: "RAX".into(),
            denom_units: vec![DenomUnit::new("arax", 0), DenomUnit::new("RAX", 18)],
        }
    }

    fn native() -> NativeDenom {
        NativeDenom::new("arax", "RAX", 18)
    }

    #[test]
    fn test_checksum_match() {
        assert!(invariant_checksum_match("checksum", "checksum").is_ok());
        assert!(matches!(
            invariant_checksum_match("checksum", "other"),
            Err(GenesisBridgeError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_native_denom_mismatch() {
        let mut got = native();
        got.base = "wrong".into();
        assert!(matches!(
            invariant_native_denom_match(&native(), &got),
            Err(GenesisBridgeError::DenomMismatch(_))
        ));
    }

    #[test]
    fn test_metadata_consistent() {
        assert!(invariant_metadata_consistent(&metadata(), &native()).is_ok());
    }

    #[test]
    fn test_metadata_wrong_base() {
        let mut meta = metadata();
        meta.base = "wrong".into();
        meta.denom_units[0].denom = "wrong".into();
        assert!(invariant_metadata_consistent(&meta, &native()).is_err());
    }

    #[test]
    fn test_metadata_wrong_exponent() {
        let mut meta = metadata();
        meta.denom_units[1].exponent = 6;
        assert!(invariant_metadata_consistent(&meta, &native()).is_err());
    }

    #[test]
    fn test_metadata_unordered_units() {
        let mut meta = metadata();
        meta.denom_units.push(DenomUnit::new("mrax", 3));
        assert!(invariant_metadata_consistent(&meta, &native()).is_err());
    }

    #[test]
    fn test_metadata_display_not_a_unit() {
        let mut meta = metadata();
        meta.display = "XRAX".into();
        assert!(invariant_metadata_consistent(&meta, &native()).is_err());
    }

    #[test]
    fn test_metadata_empty_units() {
        let mut meta = metadata();
        meta.denom_units.clear();
        assert!(invariant_metadata_consistent(&meta, &native()).is_err());
    }

    #[test]
    fn test_transfer_presence() {
        let accounts = vec![GenesisAccount::new(address("ethm", 1, 20), U256::one())];
        let transfer = FungibleTokenPacketData::new("arax", "1", "s", "r");

        assert!(invariant_transfer_presence(&[], None).is_ok());
        assert!(invariant_transfer_presence(&accounts, Some(&transfer)).is_ok());
        assert!(invariant_transfer_presence(&accounts, None).is_err());
        assert!(invariant_transfer_presence(&[], Some(&transfer)).is_err());
    }

    #[test]
    fn test_account_well_formed() {
        let account = GenesisAccount::new(address("ethm", 7, 20), U256::from(10u64));
        assert!(invariant_account_well_formed(0, &account, "ethm").is_ok());

        let module = GenesisAccount::new(address("ethm", 7, 32), U256::from(10u64));
        assert!(invariant_account_well_formed(0, &module, "ethm").is_ok());
    }

    #[test]
    fn test_account_wrong_prefix() {
        let account = GenesisAccount::new(address("dym", 7, 20), U256::from(10u64));
        let err = invariant_account_well_formed(3, &account, "ethm").unwrap_err();
        assert!(matches!(err, GenesisBridgeError::MalformedAccount { index: 3, .. }));
    }

    #[test]
    fn test_account_zero_amount() {
        let account = GenesisAccount::new(address("ethm", 7, 20), U256::zero());
        assert!(invariant_account_well_formed(0, &account, "ethm").is_err());
    }

    #[test]
    fn test_account_garbage_address() {
        let account = GenesisAccount::new("not-an-address", U256::one());
        assert!(invariant_account_well_formed(0, &account, "ethm").is_err());
    }

    #[test]
    fn test_account_wrong_length() {
        let account = GenesisAccount::new(address("ethm", 7, 8), U256::one());
        assert!(invariant_account_well_formed(0, &account, "ethm").is_err());
    }

    #[test]
    fn test_transfer_not_enabled() {
        let mut state = ChannelGenesisState::new("channel-0", "rollapp_1-1");
        assert!(invariant_transfer_not_enabled(&state).is_ok());
        state.transfer_enabled = true;
        assert!(matches!(
            invariant_transfer_not_enabled(&state),
            Err(GenesisBridgeError::GenesisAlreadyCompleted(_))
        ));
    }
}
