//! # Redis Shortener
//!
//! A URL shortening service over a key-value store, built with Axum and Redis.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Mapping entities, the store trait and key layout
//! - **Application Layer** ([`application`]) - Shortening and metrics services
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis and in-memory stores
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Deterministic FNV-1a short codes, idempotent per URL
//! - 301 redirects
//! - Per-domain counters of distinct shortened URLs
//! - Race-free shortening across concurrent requests and replicas
//! - Rate limiting and observability
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379/0"
//! cargo run
//!
//! curl -X POST localhost:8080/shorten -d '{"url":"https://www.github.com"}' \
//!      -H 'content-type: application/json'
//! # {"short_url":"d0409d29"}
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{MappingService, MetricsService};
    pub use crate::domain::entities::{DomainCount, ShortenOutcome, UrlMapping};
    pub use crate::domain::repositories::{KeyValueStore, Keyspace, StoreError};
    pub use crate::error::AppError;
    pub use crate::infrastructure::store::{MemoryStore, RedisStore};
    pub use crate::state::AppState;
}
