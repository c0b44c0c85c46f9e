//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic.
//!
//! # Entity Types
//!
//! - [`LinkRecord`] - One stored URL with its token state and referral count

pub mod link;

pub use link::LinkRecord;
