//! Business logic services for the application layer.

pub mod mapping_service;
pub mod metrics_service;

pub use mapping_service::MappingService;
pub use metrics_service::MetricsService;
