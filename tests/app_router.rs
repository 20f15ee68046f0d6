mod common;

use axum::http::StatusCode;
use axum::{Router, extract::ConnectInfo};
use axum_test::TestServer;
use redis_shortener::config::{Config, StoreBackend};
use redis_shortener::routes::app_router;
use serde_json::{Value, json};
use std::net::SocketAddr;
use tower::Layer;

#[derive(Clone)]
struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}

fn test_config(rate_limit_burst: u32) -> Config {
    Config {
        redis_url: "redis://localhost:6379/0".to_string(),
        store_backend: StoreBackend::Memory,
        key_namespace: "shortener".to_string(),
        listen_addr: "127.0.0.1:0".to_string(),
        base_url: None,
        log_level: "info".to_string(),
        log_format: "text".to_string(),
        store_timeout_ms: 2000,
        store_connect_retries: 0,
        top_domains_limit: 3,
        // One token per minute, so only the burst is available during a test
        rate_limit_replenish_ms: 60_000,
        rate_limit_burst,
    }
}

/// Serves the full production router, middleware included.
fn app_server(rate_limit_burst: u32) -> TestServer {
    let (state, _store) = common::create_test_state();
    let app = app_router(state, &test_config(rate_limit_burst)).unwrap();

    let router = Router::new()
        .fallback_service(app)
        .layer(MockConnectInfoLayer);

    TestServer::new(router).unwrap()
}

#[tokio::test]
async fn test_app_router_serves_all_routes() {
    let server = app_server(100);

    let short_url = common::shorten(&server, "https://www.github.com").await;
    assert_eq!(short_url, "d0409d29");

    let response = server.get("/d0409d29").await;
    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), "https://www.github.com");

    let response = server.get("/metrics").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({"github.com": 1}));

    server.get("/health").await.assert_status_ok();
}

#[tokio::test]
async fn test_app_router_trims_trailing_slash() {
    let server = app_server(100);

    common::shorten(&server, "https://www.github.com").await;

    let response = server.get("/metrics/").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({"github.com": 1}));

    let response = server.get("/d0409d29/").await;
    assert_eq!(response.status_code(), 301);
}

#[tokio::test]
async fn test_app_router_rate_limits_after_burst() {
    let server = app_server(2);

    server.get("/health").await.assert_status_ok();
    server.get("/health").await.assert_status_ok();

    let response = server.get("/health").await;
    response.assert_status(StatusCode::TOO_MANY_REQUESTS);

    // The limit is per client, not per route
    let response = server
        .post("/shorten")
        .json(&json!({"url": "https://www.github.com"}))
        .await;
    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
}
