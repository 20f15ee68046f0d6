//! Storage contracts for the domain layer.
//!
//! - [`KeyValueStore`] - the store adapter trait, implemented in
//!   `crate::infrastructure::store`
//! - [`Keyspace`] - how mappings and counters are laid out as keys
//!
//! Mock implementations are auto-generated via `mockall` for testing.

pub mod keyspace;
pub mod kv_store;

pub use keyspace::Keyspace;
pub use kv_store::{KeyValueStore, StoreError, StoreResult};

#[cfg(test)]
pub use kv_store::MockKeyValueStore;
