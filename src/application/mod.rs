//! Application layer services implementing business logic.
//!
//! Services depend only on the [`crate::domain::repositories::KeyValueStore`]
//! trait and are handed an explicitly constructed store at startup.
//!
//! # Available Services
//!
//! - [`services::mapping_service::MappingService`] - Shorten, resolve and reset
//! - [`services::metrics_service::MetricsService`] - Top domains ranking

pub mod services;
