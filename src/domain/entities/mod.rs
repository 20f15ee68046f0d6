//! Core domain entities.
//!
//! Entities are plain data structures; they live entirely in the external
//! store and are rebuilt from it on every request.
//!
//! - [`UrlMapping`] - original URL and its short code
//! - [`ShortenOutcome`] - mapping plus whether the call created it
//! - [`DomainCount`] - per-domain tally of new mappings

pub mod domain_count;
pub mod mapping;

pub use domain_count::DomainCount;
pub use mapping::{ShortenOutcome, UrlMapping};
