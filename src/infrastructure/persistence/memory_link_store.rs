//! In-memory implementation of the link store.
//!
//! Backed by a mutex-guarded map. Useful for tests and for embedding the
//! shortener without a database; the conditional-write semantics match the
//! SQL stores so service behavior is identical across backends.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

use crate::domain::entities::LinkRecord;
use crate::domain::repositories::LinkStore;
use crate::error::{Error, Result};
use crate::utils::token_generator::generate_auto_token;

#[derive(Debug, Default)]
struct MemoryState {
    records: BTreeMap<i64, LinkRecord>,
    last_id: i64,
}

/// Link store holding all records in process memory.
#[derive(Debug, Default)]
pub struct MemoryLinkStore {
    state: Mutex<MemoryState>,
}

impl MemoryLinkStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkStore for MemoryLinkStore {
    async fn find_by_url(&self, url: &str) -> Result<Option<LinkRecord>> {
        let state = self.state.lock().await;
        Ok(state.records.values().find(|r| r.url == url).cloned())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<LinkRecord>> {
        let state = self.state.lock().await;
        Ok(state
            .records
            .values()
            .find(|r| r.resolved_token.as_deref() == Some(token))
            .cloned())
    }

    async fn count_by_token(&self, token: &str) -> Result<i64> {
        let state = self.state.lock().await;
        let count = state
            .records
            .values()
            .filter(|r| r.resolved_token.as_deref() == Some(token))
            .count();
        Ok(count as i64)
    }

    async fn insert_placeholder(&self, url: &str) -> Result<LinkRecord> {
        let mut state = self.state.lock().await;

        if state.records.values().any(|r| r.url == url) {
            return Err(Error::DuplicateUrl);
        }

        let id = state.last_id + 1;
        state.last_id = id;

        let record = LinkRecord {
            id,
            url: url.to_string(),
            auto_token: generate_auto_token(),
            resolved_token: None,
            referral_count: 0,
            created_at: Utc::now(),
        };
        state.records.insert(id, record.clone());

        Ok(record)
    }

    async fn set_resolved_token(&self, id: i64, token: &str) -> Result<bool> {
        let mut state = self.state.lock().await;

        // The conditional write only targets unresolved rows, so a missing or
        // already-resolved row is a no-op before any uniqueness check fires.
        match state.records.get(&id) {
            None => return Ok(false),
            Some(record) if record.resolved_token.is_some() => return Ok(false),
            Some(_) => {}
        }

        let taken = state
            .records
            .values()
            .any(|r| r.id != id && r.resolved_token.as_deref() == Some(token));
        if taken {
            return Err(Error::token_collision(token));
        }

        if let Some(record) = state.records.get_mut(&id) {
            record.resolved_token = Some(token.to_string());
        }
        Ok(true)
    }

    async fn increment_referral(&self, id: i64) -> Result<()> {
        let mut state = self.state.lock().await;

        if let Some(record) = state.records.get_mut(&id) {
            record.referral_count += 1;
        }
        Ok(())
    }
}
