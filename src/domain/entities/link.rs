//! Link record representing one stored URL and its token state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One stored link.
///
/// A record starts life as a placeholder: the long URL and a random
/// `auto_token` are known, `resolved_token` is not yet assigned. It becomes
/// addressable once allocation or a custom assignment fills the short token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkRecord {
    pub id: i64,
    pub url: String,
    /// Opaque random token assigned at insert. Never part of a short URL.
    pub auto_token: String,
    /// The short token, once assigned. `None` marks an unresolved placeholder.
    pub resolved_token: Option<String>,
    pub referral_count: i64,
    pub created_at: DateTime<Utc>,
}

impl LinkRecord {
    /// Returns true once a short token has been assigned.
    pub fn is_resolved(&self) -> bool {
        self.resolved_token.is_some()
    }
}
