use std::fmt;

pub mod memory;
pub mod sqlite;

/// Typical per-origin capacity of a browser-style local store.
pub const DEFAULT_QUOTA_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The write would push the stored bytes past the capacity limit.
    QuotaExceeded { key: String, needed: u64, quota: u64 },
    /// The backend could not be reached or rejected the operation.
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::QuotaExceeded { key, needed, quota } => write!(
                f,
                "quota exceeded writing '{}': {} bytes needed, {} allowed",
                key, needed, quota
            ),
            StoreError::Unavailable(msg) => write!(f, "store unavailable: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Synchronous string-to-string persistent store.
/// Implementations: `SqliteStore` (durable, server side) and `MemoryStore`.
/// Callers own JSON encoding; there are no transactions and no expiry.
pub trait KeyedRecordStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
    fn keys(&self) -> Result<Vec<String>, StoreError>;
    /// Bytes currently held, counting both keys and values.
    fn usage_bytes(&self) -> Result<u64, StoreError>;
    fn quota_bytes(&self) -> u64;

    fn contains(&self, key: &str) -> bool {
        matches!(self.get(key), Ok(Some(_)))
    }
}

/// Size check shared by the implementations. `previous` is the length of the
/// value being replaced, if any.
pub(crate) fn check_quota(
    key: &str,
    value: &str,
    previous: Option<u64>,
    usage: u64,
    quota: u64,
) -> Result<(), StoreError> {
    let entry = (key.len() + value.len()) as u64;
    let freed = previous.map(|len| len + key.len() as u64).unwrap_or(0);
    let needed = usage.saturating_sub(freed) + entry;
    if needed > quota {
        return Err(StoreError::QuotaExceeded {
            key: key.to_string(),
            needed,
            quota,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryStore;
    use super::sqlite::SqliteStore;
    use super::*;

    fn test_sqlite(quota: u64) -> SqliteStore {
        let manager = r2d2_sqlite::SqliteConnectionManager::memory();
        let pool = r2d2::Pool::builder()
            .max_size(1)
            .build(manager)
            .expect("Failed to create in-memory pool");
        crate::db::run_migrations(&pool).expect("migrations failed");
        SqliteStore::with_quota(pool, quota)
    }

    fn backends(quota: u64) -> Vec<Box<dyn KeyedRecordStore>> {
        vec![
            Box::new(MemoryStore::with_quota(quota)),
            Box::new(test_sqlite(quota)),
        ]
    }

    #[test]
    fn test_get_set_remove() {
        for s in backends(DEFAULT_QUOTA_BYTES) {
            assert_eq!(s.get("skills").unwrap(), None);
            s.set("skills", "[]").unwrap();
            assert_eq!(s.get("skills").unwrap(), Some("[]".to_string()));
            assert!(s.contains("skills"));
            s.remove("skills").unwrap();
            assert!(!s.contains("skills"));
        }
    }

    #[test]
    fn test_overwrite_replaces_value() {
        for s in backends(DEFAULT_QUOTA_BYTES) {
            s.set("siteConfig", "{\"a\":1}").unwrap();
            s.set("siteConfig", "{\"a\":2}").unwrap();
            assert_eq!(s.get("siteConfig").unwrap().unwrap(), "{\"a\":2}");
            assert_eq!(s.keys().unwrap(), vec!["siteConfig".to_string()]);
        }
    }

    #[test]
    fn test_usage_counts_keys_and_values() {
        for s in backends(DEFAULT_QUOTA_BYTES) {
            s.set("ab", "1234").unwrap();
            s.set("c", "56").unwrap();
            assert_eq!(s.usage_bytes().unwrap(), 9);
        }
    }

    #[test]
    fn test_quota_rejects_oversized_write() {
        for s in backends(16) {
            s.set("k", "0123456789").unwrap();
            let err = s.set("other", "0123456789").unwrap_err();
            assert!(matches!(err, StoreError::QuotaExceeded { quota: 16, .. }));
            // The failed write leaves the store untouched
            assert_eq!(s.get("other").unwrap(), None);
            assert_eq!(s.get("k").unwrap().unwrap(), "0123456789");
        }
    }

    #[test]
    fn test_quota_accounts_for_replaced_value() {
        for s in backends(16) {
            s.set("k", "0123456789").unwrap();
            // Replacing frees the previous value first
            s.set("k", "abcdefghijklmno").unwrap();
            assert_eq!(s.usage_bytes().unwrap(), 16);
        }
    }

    #[test]
    fn test_sqlite_concurrent_writers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folio.db");
        let store = std::sync::Arc::new(
            SqliteStore::open(&path.to_string_lossy(), DEFAULT_QUOTA_BYTES).unwrap(),
        );

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = store.clone();
                std::thread::spawn(move || {
                    (0..50)
                        .filter(|i| store.set(&format!("key-{}-{}", t, i % 5), &i.to_string()).is_err())
                        .count()
                })
            })
            .collect();
        let failed: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();

        assert_eq!(failed, 0);
        assert_eq!(store.keys().unwrap().len(), 40);
        assert_eq!(store.get("key-3-4").unwrap().unwrap(), "49");
    }
}
