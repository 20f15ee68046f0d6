//! Redis-backed store implementation.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisError, RedisResult, aio::ConnectionManager};
use tracing::{debug, error, info, warn};

use crate::domain::repositories::{KeyValueStore, StoreError, StoreResult};

/// Number of keys requested per `SCAN` round-trip and per `DEL` batch.
const SCAN_BATCH: usize = 500;

/// Redis store over a multiplexed `ConnectionManager`.
///
/// Every command is bounded by the configured timeout. Errors are returned to
/// the caller unchanged in meaning; nothing is retried here.
pub struct RedisStore {
    conn: ConnectionManager,
    timeout: Duration,
}

impl RedisStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379/0"`)
    /// - `timeout` - upper bound for the connection attempt and for every later command
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the URL is invalid or the connection
    /// cannot be established, and [`StoreError::Timeout`] if it takes too long.
    pub async fn connect(redis_url: &str, timeout: Duration) -> StoreResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            StoreError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = tokio::time::timeout(timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| StoreError::Timeout {
                op: "CONNECT",
                after: timeout,
            })?
            .map_err(|e| StoreError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let store = Self {
            conn: manager,
            timeout,
        };
        store.ping().await?;

        info!("✓ Connected to Redis");

        Ok(store)
    }

    /// Awaits a Redis command under the store timeout.
    async fn timed<T>(
        &self,
        op: &'static str,
        fut: impl Future<Output = RedisResult<T>>,
    ) -> StoreResult<RedisResult<T>> {
        tokio::time::timeout(self.timeout, fut).await.map_err(|_| {
            warn!(op, timeout_ms = self.timeout.as_millis() as u64, "Redis call timed out");
            StoreError::Timeout {
                op,
                after: self.timeout,
            }
        })
    }

    async fn run<T>(
        &self,
        op: &'static str,
        fut: impl Future<Output = RedisResult<T>>,
    ) -> StoreResult<T> {
        self.timed(op, fut)
            .await?
            .map_err(|e| operation_error(op, e))
    }

    /// Collects all keys matching `prefix` with incremental SCAN.
    async fn scan_prefix(&self, prefix: &str) -> StoreResult<Vec<String>> {
        let pattern = format!("{}*", escape_glob(prefix));
        let mut conn = self.conn.clone();
        let mut cursor: u64 = 0;
        let mut keys = Vec::new();

        loop {
            let mut cmd = redis::cmd("SCAN");
            cmd.arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH);

            let (next, batch): (u64, Vec<String>) =
                self.run("SCAN", cmd.query_async(&mut conn)).await?;
            keys.extend(batch);

            if next == 0 {
                break;
            }
            cursor = next;
        }

        // SCAN may report a key more than once.
        keys.sort();
        keys.dedup();

        debug!(prefix, count = keys.len(), "Redis SCAN complete");
        Ok(keys)
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut conn = self.conn.clone();
        self.run("GET", async move { conn.get::<_, Option<String>>(key).await })
            .await
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        self.run("SET", async move { conn.set::<_, _, ()>(key, value).await })
            .await
    }

    async fn set_if_absent(&self, key: &str, value: &str) -> StoreResult<bool> {
        let mut conn = self.conn.clone();
        self.run("SETNX", async move { conn.set_nx::<_, _, bool>(key, value).await })
            .await
    }

    async fn increment(&self, key: &str) -> StoreResult<i64> {
        let mut conn = self.conn.clone();
        let result = self
            .timed("INCR", async move { conn.incr::<_, _, i64>(key, 1).await })
            .await?;

        result.map_err(|e| {
            if e.detail().is_some_and(|d| d.contains("not an integer")) {
                StoreError::NotAnInteger {
                    key: key.to_string(),
                }
            } else {
                operation_error("INCR", e)
            }
        })
    }

    async fn list_keys_by_prefix(&self, prefix: &str) -> StoreResult<Vec<String>> {
        self.scan_prefix(prefix).await
    }

    async fn delete_by_prefix(&self, prefix: &str) -> StoreResult<u64> {
        let keys = self.scan_prefix(prefix).await?;
        let mut deleted = 0;

        for chunk in keys.chunks(SCAN_BATCH) {
            let mut conn = self.conn.clone();
            let batch = chunk.to_vec();
            deleted += self
                .run("DEL", async move { conn.del::<_, u64>(batch).await })
                .await?;
        }

        info!(prefix, deleted, "Deleted keys by prefix");
        Ok(deleted)
    }

    async fn ping(&self) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        self.run("PING", async move { conn.ping::<()>().await }).await
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}

fn operation_error(op: &'static str, e: RedisError) -> StoreError {
    error!(op, error = %e, "Redis command failed");
    StoreError::Operation {
        op,
        message: e.to_string(),
    }
}

/// Escapes Redis glob metacharacters so `prefix` matches literally.
fn escape_glob(prefix: &str) -> String {
    let mut escaped = String::with_capacity(prefix.len());
    for c in prefix.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
