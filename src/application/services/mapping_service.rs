//! Short link creation and resolution.

use std::sync::Arc;

use metrics::counter;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{ShortenOutcome, UrlMapping};
use crate::domain::repositories::{KeyValueStore, Keyspace};
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, FnvCodeGenerator};
use crate::utils::extract_domain::extract_domain;
use crate::utils::url_validator::validate_url;

/// How many code candidates are tried before giving up on a URL.
pub const MAX_CODE_ATTEMPTS: u32 = 4;

/// Claim rounds per candidate when its key vanishes between SET NX and GET.
const MAX_CLAIM_ROUNDS: usize = 3;

/// Service for creating and resolving short links.
///
/// Holds no state of its own: every mapping and counter lives in the store.
///
/// # Store writes
///
/// A new mapping is written as three independent steps: the reverse mapping
/// `code -> url`, the forward mapping `url -> code`, then the domain counter.
/// Both mapping writes use `set_if_absent`, so only the request that creates
/// the forward mapping increments the counter, even under concurrent
/// shortening of the same URL. A failure between steps is not rolled back;
/// a later shorten of the same URL completes the missing writes.
pub struct MappingService {
    store: Arc<dyn KeyValueStore>,
    generator: Arc<dyn CodeGenerator>,
    keyspace: Keyspace,
}

impl MappingService {
    /// Creates a new mapping service.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        generator: Arc<dyn CodeGenerator>,
        keyspace: Keyspace,
    ) -> Self {
        Self {
            store,
            generator,
            keyspace,
        }
    }

    /// Creates a mapping service using the FNV-1a code generator.
    pub fn with_fnv(store: Arc<dyn KeyValueStore>, keyspace: Keyspace) -> Self {
        Self::new(store, Arc::new(FnvCodeGenerator), keyspace)
    }

    /// Returns the short code for `original_url`, creating the mapping if needed.
    ///
    /// Shortening an already mapped URL returns the stored code and leaves the
    /// domain counter untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidUrl`] if the URL is not an absolute HTTP(S)
    /// URL with a host.
    /// Returns [`AppError::StoreUnavailable`] if any store call fails.
    /// Returns [`AppError::Internal`] if every code candidate is taken by
    /// other URLs.
    pub async fn shorten(&self, original_url: &str) -> Result<ShortenOutcome, AppError> {
        let original_url = original_url.trim();
        let parsed = validate_url(original_url)?;
        let url_key = self.keyspace.url_key(original_url);

        if let Some(code) = self.store.get(&url_key).await? {
            debug!(code = %code, "URL already shortened");
            return Ok(ShortenOutcome {
                mapping: UrlMapping::new(original_url, code),
                created: false,
            });
        }

        let code = self.claim_code(original_url).await?;

        if !self.store.set_if_absent(&url_key, &code).await? {
            // A concurrent request created the forward mapping first and owns the counter.
            counter!("shortener_shorten_race_lost_total").increment(1);
            let winner = self.store.get(&url_key).await?.unwrap_or(code);
            debug!(code = %winner, "Concurrent shorten already created the mapping");
            return Ok(ShortenOutcome {
                mapping: UrlMapping::new(original_url, winner),
                created: false,
            });
        }

        let domain = extract_domain(&parsed);
        let domain_count = self
            .store
            .increment(&self.keyspace.domain_key(&domain))
            .await?;

        counter!("shortener_links_created_total").increment(1);
        info!(code = %code, domain = %domain, domain_count, "Short link created");

        Ok(ShortenOutcome {
            mapping: UrlMapping::new(original_url, code),
            created: true,
        })
    }

    /// Returns the original URL for a short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is unknown.
    /// Returns [`AppError::StoreUnavailable`] on store errors.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        self.store
            .get(&self.keyspace.code_key(code))
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    /// Deletes every mapping and domain counter in the namespace.
    ///
    /// Returns the number of deleted keys.
    pub async fn reset(&self) -> Result<u64, AppError> {
        let mut deleted = 0;
        for prefix in self.keyspace.owned_prefixes() {
            deleted += self.store.delete_by_prefix(&prefix).await?;
        }

        warn!(
            deleted,
            namespace = self.keyspace.namespace(),
            "All mappings and domain counters deleted"
        );
        Ok(deleted)
    }

    /// Claims the reverse mapping for the first free candidate code.
    ///
    /// A candidate already pointing at `original_url` is reused; one pointing
    /// at another URL is a hash collision and the next candidate is tried.
    async fn claim_code(&self, original_url: &str) -> Result<String, AppError> {
        for attempt in 0..MAX_CODE_ATTEMPTS {
            let code = self.generator.candidate(original_url, attempt);
            let code_key = self.keyspace.code_key(&code);

            let Some(existing) = self.claim_candidate(&code_key, original_url).await? else {
                return Ok(code);
            };

            counter!("shortener_code_collisions_total").increment(1);
            warn!(
                code = %code,
                attempt,
                existing_url = %existing,
                "Short code collision, extending code"
            );
        }

        Err(AppError::internal(
            "Failed to allocate a short code",
            json!({ "reason": "Too many collisions", "attempts": MAX_CODE_ATTEMPTS }),
        ))
    }

    /// Atomically claims `code_key` for `original_url`.
    ///
    /// Returns `None` when the key now maps to `original_url`, or the URL of
    /// the other owner on a collision. A key deleted between the claim and the
    /// read-back (external reset) is claimed again with `set_if_absent`.
    async fn claim_candidate(
        &self,
        code_key: &str,
        original_url: &str,
    ) -> Result<Option<String>, AppError> {
        for _ in 0..MAX_CLAIM_ROUNDS {
            if self.store.set_if_absent(code_key, original_url).await? {
                return Ok(None);
            }

            match self.store.get(code_key).await? {
                Some(existing) if existing == original_url => return Ok(None),
                Some(existing) => return Ok(Some(existing)),
                None => debug!(key = code_key, "Code key removed while claiming, retrying"),
            }
        }

        Err(AppError::store_unavailable(
            "Store unavailable",
            json!({ "reason": "Short code key keeps disappearing during claim" }),
        ))
    }
}
