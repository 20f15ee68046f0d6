#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use redis_shortener::api::routes::api_routes;
use redis_shortener::domain::repositories::{KeyValueStore, StoreError, StoreResult};
use redis_shortener::infrastructure::store::MemoryStore;
use redis_shortener::state::AppState;
use std::sync::Arc;

/// State over a fresh in-memory store, returned alongside for direct inspection.
pub fn create_test_state() -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::with_store(store.clone());
    (state, store)
}

pub fn test_router(state: AppState) -> Router {
    api_routes().with_state(state)
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(test_router(state)).unwrap()
}

/// Shortens `url` through the API and returns the `short_url` field.
pub async fn shorten(server: &TestServer, url: &str) -> String {
    let response = server
        .post("/shorten")
        .json(&serde_json::json!({ "url": url }))
        .await;
    response.assert_status_ok();

    response.json::<serde_json::Value>()["short_url"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Store whose every operation fails as if the backend were down.
pub struct UnreachableStore;

fn unreachable() -> StoreError {
    StoreError::Connection("connection refused".to_string())
}

#[async_trait]
impl KeyValueStore for UnreachableStore {
    async fn get(&self, _key: &str) -> StoreResult<Option<String>> {
        Err(unreachable())
    }

    async fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
        Err(unreachable())
    }

    async fn set_if_absent(&self, _key: &str, _value: &str) -> StoreResult<bool> {
        Err(unreachable())
    }

    async fn increment(&self, _key: &str) -> StoreResult<i64> {
        Err(unreachable())
    }

    async fn list_keys_by_prefix(&self, _prefix: &str) -> StoreResult<Vec<String>> {
        Err(unreachable())
    }

    async fn delete_by_prefix(&self, _prefix: &str) -> StoreResult<u64> {
        Err(unreachable())
    }

    async fn ping(&self) -> StoreResult<()> {
        Err(unreachable())
    }

    fn backend(&self) -> &'static str {
        "unreachable"
    }
}

pub fn unreachable_state() -> AppState {
    AppState::with_store(Arc::new(UnreachableStore))
}
