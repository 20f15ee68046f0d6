//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::application::services::metrics_service::DEFAULT_TOP_DOMAINS;
use crate::application::services::{MappingService, MetricsService};
use crate::config::Config;
use crate::domain::repositories::{KeyValueStore, Keyspace};

/// Services and settings shared across requests.
///
/// Cloning is cheap: services and the store sit behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub mapping_service: Arc<MappingService>,
    pub metrics_service: Arc<MetricsService>,
    /// Kept for health checks.
    pub store: Arc<dyn KeyValueStore>,
    pub base_url: Option<String>,
    pub top_domains_limit: usize,
}

impl AppState {
    /// Wires both services onto one store and keyspace.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        keyspace: Keyspace,
        base_url: Option<String>,
        top_domains_limit: usize,
    ) -> Self {
        let mapping_service = Arc::new(MappingService::with_fnv(store.clone(), keyspace.clone()));
        let metrics_service = Arc::new(MetricsService::new(store.clone(), keyspace));

        Self {
            mapping_service,
            metrics_service,
            store,
            base_url,
            top_domains_limit,
        }
    }

    pub fn from_config(store: Arc<dyn KeyValueStore>, config: &Config) -> Self {
        Self::new(
            store,
            Keyspace::new(config.key_namespace.clone()),
            config.base_url.clone(),
            config.top_domains_limit,
        )
    }

    /// State with the default keyspace, bare codes and the default top limit.
    pub fn with_store(store: Arc<dyn KeyValueStore>) -> Self {
        Self::new(store, Keyspace::default(), None, DEFAULT_TOP_DOMAINS)
    }
}
