//! Data pipeline for fetching universe close prices.
//!
//! Fetches daily closes for every symbol in the universe, using the
//! SQLite cache first and Yahoo Finance for whatever is missing.
//! Freshly fetched data is written back to the cache.

use super::cache_manager;
use chrono::{DateTime, NaiveDate, Utc};
use futures::stream::{self, StreamExt};
use hobart_breadth::StockUniverse;
use hobart_data::{DataError, YahooCloseProvider};
use indicatif::ProgressBar;
use polars::prelude::*;

/// Error type for data pipeline operations.
#[derive(Debug, thiserror::Error)]
pub(crate) enum DataPipelineError {
    /// Data fetch error from Yahoo or the cache.
    #[error("Data fetch error: {0}")]
    Fetch(#[from] DataError),
    /// Polars DataFrame error.
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Configuration for data fetching.
#[derive(Debug, Clone)]
pub(crate) struct FetchConfig {
    /// Whether to use the cache.
    pub use_cache: bool,
    /// Whether to force refresh (ignore cache).
    pub force_refresh: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            use_cache: true,
            force_refresh: false,
        }
    }
}

/// Closes fetched for a universe, plus the symbols that failed.
#[derive(Debug)]
pub(crate) struct FetchedCloses {
    /// Combined frame with columns: symbol, date, close.
    pub frame: DataFrame,
    /// Symbols for which neither the cache nor Yahoo had data.
    pub failures: Vec<String>,
}

/// Convert DateTime<Utc> to NaiveDate for cache lookups.
fn to_naive_date(dt: DateTime<Utc>) -> NaiveDate {
    dt.date_naive()
}

/// Default number of concurrent fetches.
const DEFAULT_CONCURRENCY: usize = 10;

/// Fetch daily closes for all symbols in the universe.
///
/// Checks the SQLite cache first, then fetches missing symbols from
/// Yahoo Finance concurrently and stores the results in the cache.
/// Symbols that fail are reported, not fatal; the call fails only when
/// no symbol yields data at all.
pub(crate) async fn fetch_universe_closes(
    provider: &YahooCloseProvider,
    universe: &StockUniverse,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    config: &FetchConfig,
    progress: Option<&ProgressBar>,
) -> Result<FetchedCloses, DataPipelineError> {
    let symbols = universe.symbols();
    let start_date = to_naive_date(start);
    let end_date = to_naive_date(end);

    let cache = if config.use_cache {
        cache_manager::open_cache().ok()
    } else {
        None
    };

    let mut cached_dfs = Vec::new();
    let mut symbols_to_fetch = Vec::new();

    // Check cache for each symbol
    if let Some(ref cache) = cache {
        if config.force_refresh {
            symbols_to_fetch = symbols;
        } else {
            for symbol in &symbols {
                if cache
                    .has_closes(symbol, start_date, end_date)
                    .unwrap_or(false)
                    && let Ok(df) = cache.get_closes(symbol, start_date, end_date)
                {
                    cached_dfs.push(df.lazy());
                    continue;
                }
                symbols_to_fetch.push(symbol.clone());
            }
        }
    } else {
        symbols_to_fetch = symbols;
    }

    // Update progress bar length based on what we actually need to fetch
    if let Some(pb) = progress {
        let total = cached_dfs.len() + symbols_to_fetch.len();
        pb.set_length(total as u64);
        pb.set_position(cached_dfs.len() as u64);
        if symbols_to_fetch.is_empty() {
            pb.set_message("Loading from cache...");
        } else {
            pb.set_message(format!(
                "Fetching {} symbols ({} concurrent)...",
                symbols_to_fetch.len(),
                DEFAULT_CONCURRENCY
            ));
        }
    }

    // Fetch missing data from Yahoo in parallel. The fetches run
    // concurrently; this loop is the single consumer, so it owns the
    // cache and the result collections outright.
    let mut failures = Vec::new();
    let mut fetched_dfs = Vec::new();
    let mut pending = stream::iter(symbols_to_fetch)
        .map(|symbol| async move {
            match provider.fetch_closes(&symbol, start, end).await {
                Ok(df) => Ok((symbol, df)),
                Err(e) => Err((symbol, e)),
            }
        })
        .buffer_unordered(DEFAULT_CONCURRENCY);

    while let Some(result) = pending.next().await {
        match result {
            Ok((symbol, df)) => {
                if let Some(ref cache) = cache
                    && let Err(e) = cache.put_closes(&df)
                {
                    eprintln!("Warning: Failed to cache closes for {}: {}", symbol, e);
                }
                fetched_dfs.push(df.lazy());
                if let Some(pb) = progress {
                    pb.inc(1);
                }
            }
            Err((symbol, e)) => {
                if let Some(pb) = progress {
                    pb.suspend(|| {
                        eprintln!("Warning: Failed to fetch data for {}: {}", symbol, e);
                    });
                    pb.inc(1);
                } else {
                    eprintln!("Warning: Failed to fetch data for {}: {}", symbol, e);
                }
                failures.push(symbol);
            }
        }
    }

    // Combine cached and fetched data
    let all_dfs: Vec<_> = cached_dfs.into_iter().chain(fetched_dfs).collect();

    if all_dfs.is_empty() {
        return Err(DataPipelineError::Fetch(DataError::MissingData {
            symbol: "batch".to_string(),
            reason: "No data fetched for any symbol".to_string(),
        }));
    }

    let combined = concat(all_dfs, UnionArgs::default())?.collect()?;

    failures.sort();
    Ok(FetchedCloses {
        frame: combined,
        failures,
    })
}

/// Get cache statistics if cache is available.
pub(crate) fn get_cache_stats() -> Option<(usize, usize)> {
    cache_manager::open_cache()
        .ok()
        .and_then(|cache| cache.stats().ok())
        .map(|stats| (stats.close_rows, stats.symbols))
}

/// Print cache location info.
pub(crate) fn print_cache_info() {
    let path = cache_manager::get_cache_path();
    println!("  Cache location: {}", path.display());
    if let Some((rows, symbols)) = get_cache_stats() {
        println!("  Cached data: {} closes for {} symbols", rows, symbols);
    }
}
