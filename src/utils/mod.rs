//! Helper functions shared across the crate:
//!
//! - [`token_generator`] - Opaque auto token generation
//! - [`numeric`] - Numeric-string detection for the shorten guard
//! - [`db_error`] - Unique-violation classification for the SQL stores

pub mod db_error;
pub mod numeric;
pub mod token_generator;
