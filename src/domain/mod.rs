//! Domain layer containing business entities and logic.
//!
//! This module implements the core domain logic following Clean Architecture
//! principles. It defines entities, the codec, and the store interface,
//! independent of infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`codec`] - Deterministic id-to-token conversion
//! - [`repositories`] - Data access trait definitions
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure layers
//! - The store trait defines the contract implemented by the persistence layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])
//!
//! # Allocation Flow
//!
//! 1. A placeholder row is inserted for the long URL
//! 2. Candidate tokens are derived from the row id via [`codec`]
//! 3. Each candidate is claimed with one conditional write on the store
//! 4. The first claim that sticks becomes the link's resolved token

pub mod codec;
pub mod entities;
pub mod repositories;
