//! # Shortlink Core
//!
//! An embeddable URL shortening engine with base-36 tokens and pluggable storage.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Link records, the token codec, and the store trait
//! - **Application Layer** ([`application`]) - Token allocation and the shortener facade
//! - **Infrastructure Layer** ([`infrastructure`]) - PostgreSQL, SQLite and in-memory stores
//!
//! ## Features
//!
//! - Base-36 tokens derived from row ids, with suffixed fallbacks on collision
//! - Custom token assignment with first-writer-wins semantics
//! - Atomicity pushed into the store, so any number of processes can share a table
//! - Referral counting on resolution with bounded retries
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use shortlink_core::config::ShortenerConfig;
//! use shortlink_core::domain::codec::Base36Codec;
//! use shortlink_core::infrastructure::persistence::MemoryLinkStore;
//! use shortlink_core::application::services::ShortenerService;
//!
//! # async fn run() -> shortlink_core::error::Result<()> {
//! let config = ShortenerConfig::new("https://sho.rt");
//! let store = Arc::new(MemoryLinkStore::new());
//! let service = ShortenerService::new(store, Arc::new(Base36Codec), config.base_url);
//!
//! let short = service.shorten("https://example.com/some/long/path").await?;
//! let original = service.lengthen(short.rsplit('/').next().unwrap_or_default()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables via
//! [`config::ShortenerConfig`]. See the [`config`] module for available
//! options, including the legacy schema mapping.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod utils;

pub mod config;

pub use error::Error;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{Allocation, ShortenerService, TokenAllocator};
    pub use crate::config::{LinkSchema, ShortenerConfig};
    pub use crate::domain::codec::{Base36Codec, TokenCodec};
    pub use crate::domain::entities::LinkRecord;
    pub use crate::domain::repositories::LinkStore;
    pub use crate::error::{Error, Result};
    pub use crate::infrastructure::persistence::{MemoryLinkStore, PgLinkStore, SqliteLinkStore};
}
