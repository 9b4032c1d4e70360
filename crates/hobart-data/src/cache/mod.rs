//! Caching layer for close prices and universe listings.

pub mod sqlite;

pub use sqlite::{CacheStats, QuoteCache};
