//! DTOs for the top domains endpoint.

use serde::Deserialize;
use std::collections::BTreeMap;
use validator::Validate;

/// Query parameters for `GET /metrics`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct TopDomainsQuery {
    /// Number of domains to report, the configured default when absent.
    /// Bounded by [`crate::config::MAX_TOP_DOMAINS`].
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<usize>,
}

/// Domain name to number of distinct links created for it.
///
/// JSON objects carry no order; consumers sort by value themselves.
pub type TopDomainsResponse = BTreeMap<String, i64>;
