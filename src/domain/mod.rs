//! Domain layer containing entities and storage contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Key-value store trait and key layout
//!
//! The domain layer has no dependency on infrastructure or HTTP. Business
//! logic lives in [`crate::application::services`].

pub mod entities;
pub mod repositories;
