//! Per-domain shortening counter.

use std::cmp::Ordering;

/// Number of new mappings created for URLs on one domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainCount {
    pub domain: String,
    pub count: i64,
}

impl DomainCount {
    pub fn new(domain: impl Into<String>, count: i64) -> Self {
        Self {
            domain: domain.into(),
            count,
        }
    }

    /// Ranking order: highest count first, ties by domain name ascending.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .count
            .cmp(&self.count)
            .then_with(|| self.domain.cmp(&other.domain))
    }
}
