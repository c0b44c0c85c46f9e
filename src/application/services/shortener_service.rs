//! Shorten and lengthen operations over a link store.

use std::sync::Arc;

use tokio_retry::Retry;
use tokio_retry::strategy::FixedInterval;
use tracing::warn;

use crate::application::services::allocator::{Allocation, TokenAllocator};
use crate::domain::codec::TokenCodec;
use crate::domain::entities::LinkRecord;
use crate::domain::repositories::LinkStore;
use crate::error::{Error, Result};
use crate::utils::numeric::is_numeric;

/// Delay between referral-increment retry attempts.
const REFERRAL_RETRY_DELAY_MS: u64 = 50;

/// Retries after the initial referral-increment attempt.
const REFERRAL_RETRIES: usize = 2;

/// Facade for creating and resolving short links.
///
/// Orchestrates store lookups and token allocation, and composes public
/// URLs. All uniqueness handling is delegated to the store's conditional
/// writes; the facade itself is stateless and safe to share across tasks.
pub struct ShortenerService<S: LinkStore, C: TokenCodec> {
    store: Arc<S>,
    allocator: TokenAllocator<S, C>,
    base_url: String,
}

impl<S: LinkStore, C: TokenCodec> ShortenerService<S, C> {
    /// Creates a new service.
    ///
    /// Trailing slashes on `base_url` are trimmed so composed URLs always
    /// carry exactly one separator.
    pub fn new(store: Arc<S>, codec: Arc<C>, base_url: impl Into<String>) -> Self {
        let allocator = TokenAllocator::new(Arc::clone(&store), codec);
        Self {
            store,
            allocator,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Shortens `url`, allocating a token derived from the new row id.
    ///
    /// Idempotent: a URL that is already stored and resolved returns its
    /// existing public URL. A URL left unresolved by an earlier partial
    /// failure resumes allocation instead of inserting a second row.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] for blank input and for purely numeric
    /// strings, which stay reserved inside the token namespace. Returns
    /// [`Error::AllocationExhausted`] when every candidate token for the new
    /// id is taken.
    pub async fn shorten(&self, url: &str) -> Result<String> {
        let url = url.trim();
        if url.is_empty() {
            return Err(Error::invalid_url("URL must not be blank"));
        }
        if is_numeric(url) {
            return Err(Error::invalid_url("purely numeric input is reserved"));
        }

        if let Some(existing) = self.store.find_by_url(url).await? {
            let token = self.token_for(existing).await?;
            return Ok(self.public_url(&token));
        }

        let record = match self.store.insert_placeholder(url).await {
            Ok(record) => record,
            // Lost the insert race. The winner's row may itself still be
            // unresolved, so run the same resume path on it.
            Err(Error::DuplicateUrl) => self
                .store
                .find_by_url(url)
                .await?
                .ok_or_else(|| Error::store("row missing after duplicate-url conflict"))?,
            Err(e) => return Err(e),
        };

        let token = self.token_for(record).await?;
        Ok(self.public_url(&token))
    }

    /// Shortens `url` under a caller-chosen token.
    ///
    /// Idempotent per URL: if `url` already has a resolved token, its
    /// existing public URL is returned, even when that token differs from
    /// the requested one. Custom tokens are never renegotiated; a taken
    /// token is surfaced, not suffixed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] for blank URLs, [`Error::InvalidToken`]
    /// for blank tokens, and [`Error::TokenAlreadyTaken`] when `token`
    /// belongs to a different link.
    pub async fn shorten_by_custom(&self, url: &str, token: &str) -> Result<String> {
        let url = url.trim();
        if url.is_empty() {
            return Err(Error::invalid_url("URL must not be blank"));
        }
        let token = token.trim();
        if token.is_empty() {
            return Err(Error::invalid_token("custom token must not be blank"));
        }

        let placeholder = match self.store.find_by_url(url).await? {
            Some(existing) => match existing.resolved_token {
                Some(existing_token) => return Ok(self.public_url(&existing_token)),
                None => Some(existing),
            },
            None => None,
        };

        if self.store.count_by_token(token).await? > 0 {
            return Err(Error::token_already_taken(token));
        }

        let record = match placeholder {
            Some(record) => record,
            None => match self.store.insert_placeholder(url).await {
                Ok(record) => record,
                Err(Error::DuplicateUrl) => self
                    .store
                    .find_by_url(url)
                    .await?
                    .ok_or_else(|| Error::store("row missing after duplicate-url conflict"))?,
                Err(e) => return Err(e),
            },
        };

        if let Some(existing_token) = &record.resolved_token {
            // The insert race was lost to a caller that already resolved.
            return Ok(self.public_url(existing_token));
        }

        match self.store.set_resolved_token(record.id, token).await {
            Ok(true) => Ok(self.public_url(token)),
            Ok(false) => {
                // Resolved concurrently between our read and the write.
                let fresh = self
                    .store
                    .find_by_url(url)
                    .await?
                    .and_then(|r| r.resolved_token)
                    .ok_or_else(|| Error::store("token missing after concurrent resolve"))?;
                Ok(self.public_url(&fresh))
            }
            Err(Error::TokenCollision { .. }) => Err(Error::token_already_taken(token)),
            Err(e) => Err(e),
        }
    }

    /// Resolves `token` back to its long URL.
    ///
    /// Incrementing the referral counter is a best-effort side channel: it
    /// is retried a bounded number of times and then logged, never allowed
    /// to fail the lookup itself.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for unknown or blank tokens.
    pub async fn lengthen(&self, token: &str) -> Result<String> {
        let token = token.trim();
        if token.is_empty() {
            return Err(Error::not_found(token));
        }

        let record = self
            .store
            .find_by_token(token)
            .await?
            .ok_or_else(|| Error::not_found(token))?;

        let strategy = FixedInterval::from_millis(REFERRAL_RETRY_DELAY_MS).take(REFERRAL_RETRIES);
        let increment = Retry::spawn(strategy, || self.store.increment_referral(record.id));
        if let Err(e) = increment.await {
            warn!(id = record.id, error = %e, "referral increment failed, returning URL anyway");
        }

        Ok(record.url)
    }

    /// Composes the public short URL for `token`.
    pub fn public_url(&self, token: &str) -> String {
        format!("{}/{}", self.base_url, token)
    }

    /// Returns the record's token, resuming allocation on a placeholder.
    async fn token_for(&self, record: LinkRecord) -> Result<String> {
        if let Some(token) = record.resolved_token {
            return Ok(token);
        }

        match self.allocator.resolve(record.id).await? {
            Allocation::Assigned(token) => Ok(token),
            Allocation::AlreadyResolved => self
                .store
                .find_by_url(&record.url)
                .await?
                .and_then(|fresh| fresh.resolved_token)
                .ok_or_else(|| Error::store("token missing after concurrent resolve")),
        }
    }
}
