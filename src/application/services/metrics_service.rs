//! Domain counter aggregation.

use std::sync::Arc;

use crate::domain::entities::DomainCount;
use crate::domain::repositories::{KeyValueStore, Keyspace, StoreError};
use crate::error::AppError;

/// Number of domains reported when no limit is given.
pub const DEFAULT_TOP_DOMAINS: usize = 3;

/// Service reading and ranking per-domain counters.
///
/// Read-only: counters are only ever written by
/// [`crate::application::services::MappingService`].
pub struct MetricsService {
    store: Arc<dyn KeyValueStore>,
    keyspace: Keyspace,
}

impl MetricsService {
    pub fn new(store: Arc<dyn KeyValueStore>, keyspace: Keyspace) -> Self {
        Self { store, keyspace }
    }

    /// Returns every domain counter, highest count first.
    ///
    /// Equal counts are ordered by domain name ascending. Counters deleted
    /// while the scan is in progress are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on store errors or when a
    /// counter holds a non-integer value.
    pub async fn domain_counts(&self) -> Result<Vec<DomainCount>, AppError> {
        let keys = self
            .store
            .list_keys_by_prefix(&self.keyspace.domain_prefix())
            .await?;

        let mut counts = Vec::with_capacity(keys.len());
        for key in &keys {
            let Some(domain) = self.keyspace.domain_from_key(key) else {
                continue;
            };
            let Some(raw) = self.store.get(key).await? else {
                continue;
            };

            let count = raw
                .parse::<i64>()
                .map_err(|_| StoreError::NotAnInteger { key: key.clone() })?;
            counts.push(DomainCount::new(domain, count));
        }

        counts.sort_by(DomainCount::rank_cmp);
        Ok(counts)
    }

    /// Returns at most `limit` domains with the highest counts.
    pub async fn top_domains(&self, limit: usize) -> Result<Vec<DomainCount>, AppError> {
        let mut counts = self.domain_counts().await?;
        counts.truncate(limit);
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockKeyValueStore;
    use std::collections::HashMap;

    /// Mock store holding the given counters under the default keyspace.
    fn store_with(counters: &[(&str, &str)]) -> MockKeyValueStore {
        let keyspace = Keyspace::default();
        let values: HashMap<String, String> = counters
            .iter()
            .map(|(domain, count)| (keyspace.domain_key(domain), count.to_string()))
            .collect();

        let mut keys: Vec<String> = values.keys().cloned().collect();
        keys.sort();

        let mut store = MockKeyValueStore::new();
        store
            .expect_list_keys_by_prefix()
            .withf(|prefix| prefix == "shortener:domain:")
            .returning(move |_| Ok(keys.clone()));
        store
            .expect_get()
            .returning(move |key| Ok(values.get(key).cloned()));
        store
    }

    fn service(store: MockKeyValueStore) -> MetricsService {
        MetricsService::new(Arc::new(store), Keyspace::default())
    }

    #[tokio::test]
    async fn test_top_domains_ranks_by_count() {
        let store = store_with(&[("c.com", "1"), ("a.com", "3"), ("b.com", "2")]);

        let top = service(store).top_domains(3).await.unwrap();

        assert_eq!(
            top,
            vec![
                DomainCount::new("a.com", 3),
                DomainCount::new("b.com", 2),
                DomainCount::new("c.com", 1),
            ]
        );
    }

    #[tokio::test]
    async fn test_top_domains_respects_limit() {
        let store = store_with(&[
            ("a.com", "5"),
            ("b.com", "4"),
            ("c.com", "3"),
            ("d.com", "2"),
        ]);

        let top = service(store).top_domains(3).await.unwrap();

        assert_eq!(top.len(), 3);
        assert!(top.iter().all(|d| d.domain != "d.com"));
    }

    #[tokio::test]
    async fn test_top_domains_tie_break_by_name() {
        let store = store_with(&[("zeta.io", "2"), ("alpha.io", "2"), ("mid.io", "2")]);

        let top = service(store).top_domains(2).await.unwrap();

        assert_eq!(
            top,
            vec![DomainCount::new("alpha.io", 2), DomainCount::new("mid.io", 2)]
        );
    }

    #[tokio::test]
    async fn test_domain_counts_empty() {
        let store = store_with(&[]);
        let counts = service(store).domain_counts().await.unwrap();
        assert!(counts.is_empty());
    }

    #[tokio::test]
    async fn test_domain_counts_skips_vanished_keys() {
        let mut store = MockKeyValueStore::new();
        store.expect_list_keys_by_prefix().returning(|_| {
            Ok(vec![
                "shortener:domain:a.com".to_string(),
                "shortener:domain:gone.com".to_string(),
            ])
        });
        store.expect_get().returning(|key| {
            if key == "shortener:domain:a.com" {
                Ok(Some("2".to_string()))
            } else {
                Ok(None)
            }
        });

        let counts = service(store).domain_counts().await.unwrap();

        assert_eq!(counts, vec![DomainCount::new("a.com", 2)]);
    }

    #[tokio::test]
    async fn test_domain_counts_rejects_corrupt_counter() {
        let store = store_with(&[("a.com", "not-a-number")]);

        let result = service(store).domain_counts().await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::StoreUnavailable { .. }
        ));
    }

    #[tokio::test]
    async fn test_top_domains_zero_limit() {
        let store = store_with(&[("a.com", "1")]);
        let top = service(store).top_domains(0).await.unwrap();
        assert!(top.is_empty());
    }
}
