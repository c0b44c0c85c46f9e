//! Candidate token allocation.

use std::sync::Arc;

use crate::domain::codec::TokenCodec;
use crate::domain::repositories::LinkStore;
use crate::error::{Error, Result};
use tracing::debug;

/// Separator between a base token and its collision suffix.
pub const SUFFIX_DELIMITER: char = '+';

/// Candidates tried per id: the base token plus one per suffix letter.
pub const CANDIDATES_PER_ID: usize = 27;

/// Outcome of a resolution attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Allocation {
    /// This call assigned the token.
    Assigned(String),
    /// Another caller resolved the row first; re-read it for the token.
    AlreadyResolved,
}

/// Assigns short tokens to placeholder rows.
///
/// Candidates for row id `n` are tried in a fixed order: `encode(n)` first,
/// then `encode(n)` with suffixes `+a` through `+z`. Each attempt is one
/// conditional write on the store; a candidate that loses its race simply
/// advances the probe. No locks are taken at any point.
///
/// The suffixed forms exist because custom tokens share the namespace with
/// encoded ids: a custom token `"3"` occupies the base candidate of row 3.
pub struct TokenAllocator<S: LinkStore, C: TokenCodec> {
    store: Arc<S>,
    codec: Arc<C>,
}

impl<S: LinkStore, C: TokenCodec> TokenAllocator<S, C> {
    /// Creates a new allocator over a store and codec.
    pub fn new(store: Arc<S>, codec: Arc<C>) -> Self {
        Self { store, codec }
    }

    /// Resolves a short token for the placeholder row `id`.
    ///
    /// Returns [`Allocation::AlreadyResolved`] when a concurrent caller got
    /// there first; the row then already holds a token and must be re-read.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationExhausted`] when every candidate is held
    /// by another link. The placeholder row stays in place; a later call may
    /// still succeed if a competing token is freed.
    pub async fn resolve(&self, id: i64) -> Result<Allocation> {
        for token in self.candidates(id)? {
            match self.store.set_resolved_token(id, &token).await {
                Ok(true) => {
                    debug!(id, token = %token, "token assigned");
                    return Ok(Allocation::Assigned(token));
                }
                Ok(false) => return Ok(Allocation::AlreadyResolved),
                Err(Error::TokenCollision { .. }) => {
                    debug!(id, token = %token, "token collision, trying next candidate");
                }
                Err(e) => return Err(e),
            }
        }

        Err(Error::AllocationExhausted { id })
    }

    /// Candidate tokens for `id`, in probe order.
    fn candidates(&self, id: i64) -> Result<impl Iterator<Item = String>> {
        let id =
            u64::try_from(id).map_err(|_| Error::store(format!("negative row id {id}")))?;
        let base = self.codec.encode(id);

        Ok(std::iter::once(base.clone())
            .chain(('a'..='z').map(move |suffix| format!("{base}{SUFFIX_DELIMITER}{suffix}"))))
    }
}
