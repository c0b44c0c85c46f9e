//! Store trait for link persistence.

use crate::domain::entities::LinkRecord;
use crate::error::Result;
use async_trait::async_trait;

/// Storage contract for link records.
///
/// All uniqueness guarantees live here: implementations back `url` and
/// `resolved_token` with unique constraints and perform conditional writes,
/// so callers stay correct under concurrency without in-process locks.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkStore`] - PostgreSQL
/// - [`crate::infrastructure::persistence::SqliteLinkStore`] - SQLite
/// - [`crate::infrastructure::persistence::MemoryLinkStore`] - in-process, for tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Finds a record by its long URL.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Store`] on storage failures.
    async fn find_by_url(&self, url: &str) -> Result<Option<LinkRecord>>;

    /// Finds a record by its resolved short token.
    ///
    /// Unresolved placeholders are never returned; their token is `NULL`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Store`] on storage failures.
    async fn find_by_token(&self, token: &str) -> Result<Option<LinkRecord>>;

    /// Counts records holding `token` as their resolved token.
    ///
    /// The unique constraint keeps the result at 0 or 1; callers use it as
    /// an existence probe.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Store`] on storage failures.
    async fn count_by_token(&self, token: &str) -> Result<i64>;

    /// Inserts a placeholder row for `url` and returns the stored record.
    ///
    /// The store generates the opaque auto token and the creation timestamp;
    /// `resolved_token` starts out unassigned.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::DuplicateUrl`] if a row for `url`
    /// already exists, [`crate::error::Error::Store`] on other failures.
    async fn insert_placeholder(&self, url: &str) -> Result<LinkRecord>;

    /// Atomically assigns `token` to row `id` if the row is still unresolved.
    ///
    /// This is the single write the allocation race rides on. Outcomes:
    ///
    /// - `Ok(true)` - the token was assigned by this call
    /// - `Ok(false)` - no row matched: `id` is unknown or already resolved;
    ///   callers re-read the row to pick up the winning token
    /// - `Err(TokenCollision)` - `token` is held by a different row; callers
    ///   move on to their next candidate
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::TokenCollision`] as described above,
    /// [`crate::error::Error::Store`] on other failures.
    async fn set_resolved_token(&self, id: i64, token: &str) -> Result<bool>;

    /// Increments the referral counter of row `id` by one.
    ///
    /// Unknown ids are a no-op; the counter is bookkeeping, not a lookup.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Store`] on storage failures.
    async fn increment_referral(&self, id: i64) -> Result<()>;
}
