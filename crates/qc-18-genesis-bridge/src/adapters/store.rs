//! # Key-Value Store Adapters
//!
//! - [`InMemoryKVStore`]: ordered in-memory store for tests and embedding.
//! - [`CacheStore`]: transaction scope over any store. Writes are buffered
//!   and reach the parent in one atomic batch on [`CacheStore::commit`];
//!   dropping the scope discards them.

use std::collections::BTreeMap;

use serde::{de::DeserializeOwned, Serialize};

use crate::domain::{GenesisBridgeError, KVStoreError};
use crate::ports::{BatchOperation, KeyValueStore};

/// In-memory key-value store.
#[derive(Debug, Default, Clone)]
pub struct InMemoryKVStore {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl InMemoryKVStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl KeyValueStore for InMemoryKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.data.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        self.data.remove(key);
        Ok(())
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        for op in operations {
            match op {
                BatchOperation::Put { key, value } => {
                    self.data.insert(key, value);
                }
                BatchOperation::Delete { key } => {
                    self.data.remove(&key);
                }
            }
        }
        Ok(())
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.data.contains_key(key))
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, KVStoreError> {
        Ok(self
            .data
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

/// Transaction scope over a parent store.
///
/// Reads see the scope's own writes first, then the parent. Nothing reaches
/// the parent until [`commit`](Self::commit).
pub struct CacheStore<'a> {
    parent: &'a mut dyn KeyValueStore,
    /// `None` marks a delete.
    writes: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

impl<'a> CacheStore<'a> {
    /// Open a scope over `parent`.
    pub fn new(parent: &'a mut dyn KeyValueStore) -> Self {
        Self {
            parent,
            writes: BTreeMap::new(),
        }
    }

    /// Number of buffered writes.
    pub fn pending_writes(&self) -> usize {
        self.writes.len()
    }

    /// Flush every buffered write to the parent in one atomic batch.
    pub fn commit(self) -> Result<(), KVStoreError> {
        if self.writes.is_empty() {
            return Ok(());
        }
        let operations = self
            .writes
            .into_iter()
            .map(|(key, value)| match value {
                Some(value) => BatchOperation::put(key, value),
                None => BatchOperation::delete(key),
            })
            .collect();
        self.parent.atomic_batch_write(operations)
    }

    /// Drop every buffered write.
    pub fn discard(self) {}
}

impl KeyValueStore for CacheStore<'_> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        match self.writes.get(key) {
            Some(buffered) => Ok(buffered.clone()),
            None => self.parent.get(key),
        }
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.writes.insert(key.to_vec(), Some(value.to_vec()));
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        self.writes.insert(key.to_vec(), None);
        Ok(())
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        for op in operations {
            match op {
                BatchOperation::Put { key, value } => {
                    self.writes.insert(key, Some(value));
                }
                BatchOperation::Delete { key } => {
                    self.writes.insert(key, None);
                }
            }
        }
        Ok(())
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, KVStoreError> {
        let mut merged: BTreeMap<Vec<u8>, Vec<u8>> =
            self.parent.prefix_scan(prefix)?.into_iter().collect();
        for (key, value) in self
            .writes
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix))
        {
            match value {
                Some(value) => {
                    merged.insert(key.clone(), value.clone());
                }
                None => {
                    merged.remove(key);
                }
            }
        }
        Ok(merged.into_iter().collect())
    }
}

/// Read a bincode record.
pub fn read_record<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &[u8],
) -> Result<Option<T>, GenesisBridgeError> {
    let Some(bytes) = store.get(key)? else {
        return Ok(None);
    };
    let value = bincode::deserialize(&bytes).map_err(|e| KVStoreError::CorruptionError {
        message: format!("{}: {e}", String::from_utf8_lossy(key)),
    })?;
    Ok(Some(value))
}

/// Write a bincode record.
pub fn write_record<T: Serialize>(
    store: &mut dyn KeyValueStore,
    key: &[u8],
    value: &T,
) -> Result<(), GenesisBridgeError> {
    let bytes = bincode::serialize(value).map_err(|e| KVStoreError::CorruptionError {
        message: format!("{}: {e}", String::from_utf8_lossy(key)),
    })?;
    store.put(key, &bytes)?;
    Ok(())
}
