/*!
 * Hash Set Records
 * Unique string keys mapped to owned records
 */

use super::value::{Record, RecordKind};
use crate::core::errors::{RecordError, RecordResult};
use crate::core::types::RecordType;
use ahash::HashMap;

impl Record {
    fn table(&self) -> RecordResult<&HashMap<String, Record>> {
        match &self.kind {
            RecordKind::HashSet(map) => Ok(map),
            _ => Err(self.mismatch(RecordType::HashSet)),
        }
    }

    fn table_mut(&mut self) -> RecordResult<&mut HashMap<String, Record>> {
        let actual = self.record_type();
        match &mut self.kind {
            RecordKind::HashSet(map) => Ok(map),
            _ => Err(RecordError::mismatch(RecordType::HashSet, actual)),
        }
    }

    /// Install `value` under `key`
    ///
    /// An existing value for the key is freed before the new one is installed.
    pub fn hash_set_set(&mut self, key: impl Into<String>, value: Record) -> RecordResult<()> {
        let map = self.table_mut()?;
        let key = key.into();
        if let Some(old) = map.remove(&key) {
            drop(old);
        }
        map.insert(key, value);
        Ok(())
    }

    pub fn hash_set_get(&self, key: &str) -> RecordResult<Option<&Record>> {
        Ok(self.table()?.get(key))
    }

    pub fn hash_set_get_mut(&mut self, key: &str) -> RecordResult<Option<&mut Record>> {
        Ok(self.table_mut()?.get_mut(key))
    }

    /// Detach the value under `key`, ownership moves to the caller
    pub fn hash_set_remove(&mut self, key: &str) -> RecordResult<Option<Record>> {
        Ok(self.table_mut()?.remove(key))
    }

    pub fn hash_set_len(&self) -> RecordResult<usize> {
        self.table().map(|map| map.len())
    }

    /// Snapshot of all keys, independent of later mutation of the set
    pub fn hash_set_keys(&self) -> RecordResult<Vec<String>> {
        Ok(self.table()?.keys().cloned().collect())
    }
}
