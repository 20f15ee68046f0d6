//! In-process store for tests and local development.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::repositories::{KeyValueStore, StoreError, StoreResult};

/// A [`KeyValueStore`] kept in process memory.
///
/// Mirrors the Redis semantics the services depend on: `set_if_absent` and
/// `increment` are atomic under the write lock, and `increment` rejects
/// values that are not integers. Data is lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        debug!("Using MemoryStore (data is not persisted)");
        Self::default()
    }

    /// Number of keys currently stored.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn set_if_absent(&self, key: &str, value: &str) -> StoreResult<bool> {
        match self.entries.write().await.entry(key.to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(value.to_string());
                Ok(true)
            }
            Entry::Occupied(_) => Ok(false),
        }
    }

    async fn increment(&self, key: &str) -> StoreResult<i64> {
        let mut entries = self.entries.write().await;

        let current = match entries.get(key) {
            Some(raw) => raw.parse::<i64>().map_err(|_| StoreError::NotAnInteger {
                key: key.to_string(),
            })?,
            None => 0,
        };

        let next = current.checked_add(1).ok_or_else(|| StoreError::Operation {
            op: "INCR",
            message: "increment or decrement would overflow".to_string(),
        })?;
        entries.insert(key.to_string(), next.to_string());
        Ok(next)
    }

    async fn list_keys_by_prefix(&self, prefix: &str) -> StoreResult<Vec<String>> {
        let entries = self.entries.read().await;

        Ok(entries
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.clone())
            .collect())
    }

    async fn delete_by_prefix(&self, prefix: &str) -> StoreResult<u64> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        Ok((before - entries.len()) as u64)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_get_missing_key() {
        let store = MemoryStore::new();
        assert_eq!(store.get("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let store = MemoryStore::new();
        store.set("k", "v1").await.unwrap();
        store.set("k", "v2").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some("v2".to_string()));
    }

    #[tokio::test]
    async fn test_set_if_absent_only_first_wins() {
        let store = MemoryStore::new();
        assert!(store.set_if_absent("k", "first").await.unwrap());
        assert!(!store.set_if_absent("k", "second").await.unwrap());
        assert_eq!(store.get("k").await.unwrap(), Some("first".to_string()));
    }

    #[tokio::test]
    async fn test_increment_creates_and_counts() {
        let store = MemoryStore::new();
        assert_eq!(store.increment("c").await.unwrap(), 1);
        assert_eq!(store.increment("c").await.unwrap(), 2);
        assert_eq!(store.get("c").await.unwrap(), Some("2".to_string()));
    }

    #[tokio::test]
    async fn test_increment_overflow_is_an_error() {
        let store = MemoryStore::new();
        store.set("c", &i64::MAX.to_string()).await.unwrap();

        let result = store.increment("c").await;

        assert!(matches!(
            result,
            Err(StoreError::Operation { op: "INCR", .. })
        ));
        assert_eq!(store.get("c").await.unwrap(), Some(i64::MAX.to_string()));
    }

    #[tokio::test]
    async fn test_increment_rejects_non_integer() {
        let store = MemoryStore::new();
        store.set("c", "abc").await.unwrap();

        let result = store.increment("c").await;
        assert!(matches!(result, Err(StoreError::NotAnInteger { .. })));
    }

    #[tokio::test]
    async fn test_list_keys_by_prefix_sorted_and_scoped() {
        let store = MemoryStore::new();
        store.set("d:b.com", "1").await.unwrap();
        store.set("d:a.com", "1").await.unwrap();
        store.set("da", "1").await.unwrap();
        store.set("c:x", "1").await.unwrap();

        let keys = store.list_keys_by_prefix("d:").await.unwrap();
        assert_eq!(keys, vec!["d:a.com".to_string(), "d:b.com".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_by_prefix() {
        let store = MemoryStore::new();
        store.set("ns:a", "1").await.unwrap();
        store.set("ns:b", "1").await.unwrap();
        store.set("other:a", "1").await.unwrap();

        assert_eq!(store.delete_by_prefix("ns:").await.unwrap(), 2);
        assert_eq!(store.len().await, 1);
        assert_eq!(store.get("other:a").await.unwrap(), Some("1".to_string()));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_increments_are_not_lost() {
        let store = Arc::new(MemoryStore::new());

        let handles: Vec<_> = (0..50)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.increment("c").await.unwrap() })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.get("c").await.unwrap(), Some("50".to_string()));
    }
}
