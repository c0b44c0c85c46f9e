//! Business logic services for the application layer.

pub mod allocator;
pub mod shortener_service;

pub use allocator::{Allocation, TokenAllocator};
pub use shortener_service::ShortenerService;
