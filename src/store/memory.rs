use std::collections::BTreeMap;
use std::sync::Mutex;

use super::{check_quota, KeyedRecordStore, StoreError, DEFAULT_QUOTA_BYTES};

/// Process-local store. Lives as long as the value does; used for simulated
/// documents and tests.
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
    quota: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_quota(DEFAULT_QUOTA_BYTES)
    }

    pub fn with_quota(quota: u64) -> Self {
        MemoryStore {
            entries: Mutex::new(BTreeMap::new()),
            quota,
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>, StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn usage(map: &BTreeMap<String, String>) -> u64 {
    map.iter().map(|(k, v)| (k.len() + v.len()) as u64).sum()
}

impl KeyedRecordStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut map = self.lock()?;
        let previous = map.get(key).map(|v| v.len() as u64);
        check_quota(key, value, previous, usage(&map), self.quota)?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.lock()?.keys().cloned().collect())
    }

    fn usage_bytes(&self) -> Result<u64, StoreError> {
        let map = self.lock()?;
        Ok(usage(&map))
    }

    fn quota_bytes(&self) -> u64 {
        self.quota
    }
}
