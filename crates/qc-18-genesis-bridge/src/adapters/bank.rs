//! # Bank Adapters
//!
//! Store-backed denom metadata registry and ledger. Balances and supplies are
//! kept as 32-byte big-endian integers.

use std::collections::BTreeSet;

use primitive_types::U256;

use crate::domain::{DenomMetadata, GenesisBridgeError, KVStoreError};
use crate::ports::{DenomRegistry, KeyValueStore, Ledger};

use super::store::{read_record, write_record};

const METADATA_PREFIX: &str = "bank/metadata/";
const BALANCE_PREFIX: &str = "bank/balance/";
const SUPPLY_PREFIX: &str = "bank/supply/";

fn metadata_key(base: &str) -> Vec<u8> {
    format!("{METADATA_PREFIX}{base}").into_bytes()
}

fn balance_key(address: &str, denom: &str) -> Vec<u8> {
    format!("{BALANCE_PREFIX}{address}/{denom}").into_bytes()
}

fn supply_key(denom: &str) -> Vec<u8> {
    format!("{SUPPLY_PREFIX}{denom}").into_bytes()
}

fn read_amount(store: &dyn KeyValueStore, key: &[u8]) -> Result<U256, GenesisBridgeError> {
    match store.get(key)? {
        None => Ok(U256::zero()),
        Some(bytes) if bytes.len() == 32 => Ok(U256::from_big_endian(&bytes)),
        Some(bytes) => Err(KVStoreError::CorruptionError {
            message: format!(
                "{}: expected 32 bytes, found {}",
                String::from_utf8_lossy(key),
                bytes.len()
            ),
        }
        .into()),
    }
}

fn write_amount(
    store: &mut dyn KeyValueStore,
    key: &[u8],
    amount: U256,
) -> Result<(), GenesisBridgeError> {
    let mut bytes = [0u8; 32];
    amount.to_big_endian(&mut bytes);
    store.put(key, &bytes)?;
    Ok(())
}

/// Denom metadata registry over a key-value store.
#[derive(Clone, Debug, Default)]
pub struct KvDenomRegistry;

impl KvDenomRegistry {
    /// Create the registry.
    pub fn new() -> Self {
        Self
    }
}

impl DenomRegistry for KvDenomRegistry {
    fn register(
        &self,
        store: &mut dyn KeyValueStore,
        metadata: &DenomMetadata,
    ) -> Result<(), GenesisBridgeError> {
        let key = metadata_key(&metadata.base);
        match read_record::<DenomMetadata>(store, &key)? {
            Some(existing) if &existing == metadata => Ok(()),
            Some(_) => Err(GenesisBridgeError::RegistryConflict {
                base: metadata.base.clone(),
            }),
            None => write_record(store, &key, metadata),
        }
    }

    fn metadata(
        &self,
        store: &dyn KeyValueStore,
        base: &str,
    ) -> Result<Option<DenomMetadata>, GenesisBridgeError> {
        read_record(store, &metadata_key(base))
    }
}

/// Ledger over a key-value store.
///
/// Addresses on the blocked list cannot receive funds (module accounts and
/// sanctioned addresses on a real hub).
#[derive(Clone, Debug, Default)]
pub struct KvLedger {
    blocked: BTreeSet<String>,
}

impl KvLedger {
    /// Create a ledger with no blocked addresses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse credits to `address`.
    pub fn with_blocked_address(mut self, address: impl Into<String>) -> Self {
        self.blocked.insert(address.into());
        self
    }

    /// Total amount of `denom` credited so far.
    pub fn supply(
        &self,
        store: &dyn KeyValueStore,
        denom: &str,
    ) -> Result<U256, GenesisBridgeError> {
        read_amount(store, &supply_key(denom))
    }
}

impl Ledger for KvLedger {
    fn credit(
        &self,
        store: &mut dyn KeyValueStore,
        address: &str,
        denom: &str,
        amount: U256,
    ) -> Result<(), GenesisBridgeError> {
        if self.blocked.contains(address) {
            return Err(GenesisBridgeError::LedgerFailure(format!(
                "{address} is not allowed to receive funds"
            )));
        }

        let balance_at = balance_key(address, denom);
        let balance = read_amount(store, &balance_at)?
            .checked_add(amount)
            .ok_or_else(|| {
                GenesisBridgeError::LedgerFailure(format!("balance of {address} overflows"))
            })?;
        let supply_at = supply_key(denom);
        let supply = read_amount(store, &supply_at)?
            .checked_add(amount)
            .ok_or_else(|| {
                GenesisBridgeError::LedgerFailure(format!("supply of {denom} overflows"))
            })?;

        write_amount(store, &balance_at, balance)?;
        write_amount(store, &supply_at, supply)
    }

    fn balance(
        &self,
        store: &dyn KeyValueStore,
        address: &str,
        denom: &str,
    ) -> Result<U256, GenesisBridgeError> {
        read_amount(store, &balance_key(address, denom))
    }
}
