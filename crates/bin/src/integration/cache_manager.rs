//! Cache manager for market data.
//!
//! Opens the SQLite close cache at a platform-specific default location.

use hobart_data::{DataError, QuoteCache};
use std::path::PathBuf;

/// Get the default cache directory path.
///
/// Uses platform-specific cache directories:
/// - Linux: `~/.cache/hobart/`
/// - macOS: `~/Library/Caches/hobart/`
/// - Windows: `%LOCALAPPDATA%\hobart\cache\`
pub(crate) fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hobart")
}

/// Get the default cache database path.
pub(crate) fn default_cache_path() -> PathBuf {
    default_cache_dir().join("hobart.db")
}

/// Get the configured cache path.
pub(crate) fn get_cache_path() -> PathBuf {
    default_cache_path()
}

/// Open the cache, creating the directory if needed.
pub(crate) fn open_cache() -> Result<QuoteCache, DataError> {
    let cache_path = get_cache_path();

    // Ensure parent directory exists
    if let Some(parent) = cache_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    QuoteCache::new(&cache_path)
}
