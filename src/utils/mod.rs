//! Utility functions for code generation and URL processing.
//!
//! - [`code_generator`] - Deterministic short code generation
//! - [`url_validator`] - Acceptance rules for submitted URLs
//! - [`extract_domain`] - Domain used for per-domain counters

pub mod code_generator;
pub mod extract_domain;
pub mod url_validator;
