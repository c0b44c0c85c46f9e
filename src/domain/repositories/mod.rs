//! Repository trait definitions for the domain layer.
//!
//! The single [`LinkStore`] trait abstracts link persistence. Concrete
//! implementations live in `crate::infrastructure::persistence`; a mock is
//! auto-generated via `mockall` for unit tests.

pub mod link_store;

pub use link_store::LinkStore;

#[cfg(test)]
pub use link_store::MockLinkStore;
