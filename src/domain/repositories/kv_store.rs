//! Key-value store contract used by the mapping and metrics services.

use async_trait::async_trait;
use std::time::Duration;

/// Errors raised by a [`KeyValueStore`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store connection error: {0}")]
    Connection(String),

    #[error("Store operation {op} failed: {message}")]
    Operation { op: &'static str, message: String },

    #[error("Store operation {op} timed out after {after:?}")]
    Timeout { op: &'static str, after: Duration },

    #[error("Value at key '{key}' is not an integer")]
    NotAnInteger { key: String },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Plain string key-value store.
///
/// Every method is an independent round-trip: there are no multi-key
/// transactions. The only atomic primitives are [`set_if_absent`] and
/// [`increment`], and the mapping service relies on exactly those two.
///
/// # Implementations
///
/// - [`crate::infrastructure::store::RedisStore`] - Redis over a `ConnectionManager`
/// - [`crate::infrastructure::store::MemoryStore`] - in-process map for tests and local runs
/// - Test mocks available with `cfg(test)`
///
/// [`set_if_absent`]: KeyValueStore::set_if_absent
/// [`increment`]: KeyValueStore::increment
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored at `key`, or `None` when the key does not exist.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` at `key`, overwriting any previous value.
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Stores `value` at `key` only if the key does not exist yet.
    ///
    /// Returns `true` when this call created the key. Atomic with respect to
    /// concurrent callers (Redis `SET NX`).
    async fn set_if_absent(&self, key: &str, value: &str) -> StoreResult<bool>;

    /// Atomically adds one to the integer at `key`, creating it at zero first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotAnInteger`] if the key holds a non-integer value.
    async fn increment(&self, key: &str) -> StoreResult<i64>;

    /// Lists every key starting with `prefix`, sorted ascending.
    async fn list_keys_by_prefix(&self, prefix: &str) -> StoreResult<Vec<String>>;

    /// Deletes every key starting with `prefix` and returns how many were removed.
    async fn delete_by_prefix(&self, prefix: &str) -> StoreResult<u64>;

    /// Checks that the backend answers.
    async fn ping(&self) -> StoreResult<()>;

    /// Short backend name used in logs and health output.
    fn backend(&self) -> &'static str;
}
