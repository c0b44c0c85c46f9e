//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating store calls,
//! validation, and allocation rules. Services consume the store trait and
//! provide a clean API for whatever outer layer embeds the crate.
//!
//! # Available Services
//!
//! - [`services::allocator::TokenAllocator`] - Candidate probing and assignment
//! - [`services::shortener_service::ShortenerService`] - Shorten/lengthen facade

pub mod services;
