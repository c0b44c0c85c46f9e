//! Link store implementations.
//!
//! Concrete implementations of the domain store trait using SQLx for the
//! database backends. Every backend enforces uniqueness at the storage level,
//! so concurrent writers race on conditional writes rather than locks.
//!
//! # Stores
//!
//! - [`PgLinkStore`] - PostgreSQL backend
//! - [`SqliteLinkStore`] - SQLite backend for file or in-memory databases
//! - [`MemoryLinkStore`] - Process-local map for tests and embedding

pub mod memory_link_store;
pub mod pg_link_store;
pub mod sqlite_link_store;

pub use memory_link_store::MemoryLinkStore;
pub use pg_link_store::PgLinkStore;
pub use sqlite_link_store::SqliteLinkStore;
