//! SQLite caching layer for close prices.
//!
//! An explicit, caller-supplied cache keyed by symbol and date range. The
//! breadth core never sees it; callers consult the cache first, fetch the
//! misses, and write them back.

use crate::error::{DataError, Result};
use chrono::{NaiveDate, Utc};
use polars::prelude::*;
use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// SQLite cache for close prices and universe listings.
#[derive(Debug)]
pub struct QuoteCache {
    conn: Connection,
}

/// Summary statistics over the cache contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Number of cached close observations.
    pub close_rows: usize,
    /// Number of distinct symbols with cached closes.
    pub symbols: usize,
    /// Number of universe entries stored.
    pub universe_entries: usize,
}

impl QuoteCache {
    /// Open (or create) a cache at the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let cache = Self { conn };
        cache.initialize_schema()?;
        Ok(cache)
    }

    /// Create an in-memory cache (useful for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let cache = Self { conn };
        cache.initialize_schema()?;
        Ok(cache)
    }

    fn initialize_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS closes (
                symbol TEXT NOT NULL,
                date TEXT NOT NULL,
                close REAL NOT NULL,
                cached_at TEXT NOT NULL,
                PRIMARY KEY (symbol, date)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_closes_symbol_date ON closes(symbol, date)",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS universe (
                symbol TEXT PRIMARY KEY,
                sector TEXT NOT NULL,
                added_at TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    /// Check whether the cache plausibly covers a symbol and date range.
    ///
    /// Compares the cached row count against ~70% of the calendar days in
    /// the range, the same heuristic margin markets leave for weekends and
    /// holidays.
    pub fn has_closes(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM closes WHERE symbol = ?1 AND date >= ?2 AND date <= ?3",
            params![symbol, start.to_string(), end.to_string()],
            |row| row.get(0),
        )?;

        let days = (end - start).num_days();
        let expected_count = (days as f64 * 0.7) as i64;

        Ok(count >= expected_count.max(1))
    }

    /// Get cached closes for a symbol and date range.
    ///
    /// Returns a frame with columns symbol, date, close, the same shape
    /// the Yahoo provider produces, so the two concatenate cleanly.
    pub fn get_closes(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<DataFrame> {
        let mut stmt = self.conn.prepare(
            "SELECT symbol, date, close
             FROM closes
             WHERE symbol = ?1 AND date >= ?2 AND date <= ?3
             ORDER BY date ASC",
        )?;

        let mut symbols = Vec::new();
        let mut dates = Vec::new();
        let mut closes = Vec::new();

        let rows = stmt.query_map(params![symbol, start.to_string(), end.to_string()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, f64>(2)?,
            ))
        })?;

        for row in rows {
            let (sym, date, close) = row?;
            symbols.push(sym);
            dates.push(date);
            closes.push(close);
        }

        if dates.is_empty() {
            return Err(DataError::MissingData {
                symbol: symbol.to_string(),
                reason: "No cached data found".to_string(),
            });
        }

        let df = DataFrame::new(vec![
            Series::new("symbol".into(), symbols).into(),
            Series::new("date".into(), dates).into(),
            Series::new("close".into(), closes).into(),
        ])?;

        // Convert date strings to Date type
        let df = df
            .lazy()
            .with_column(col("date").cast(DataType::Date))
            .collect()?;

        Ok(df)
    }

    /// Store closes in the cache from a symbol/date/close frame.
    pub fn put_closes(&self, df: &DataFrame) -> Result<()> {
        let cached_at = Utc::now().to_rfc3339();

        let symbols = df.column("symbol")?.str()?.clone();
        let dates = df.column("date")?.cast(&DataType::String)?;
        let dates = dates.str()?;
        let closes = df.column("close")?.f64()?.clone();

        let tx = self.conn.unchecked_transaction()?;

        for i in 0..df.height() {
            let symbol = symbols
                .get(i)
                .ok_or_else(|| DataError::Parse("Missing symbol".to_string()))?;
            let date = dates
                .get(i)
                .ok_or_else(|| DataError::Parse("Missing date".to_string()))?;
            let close = closes
                .get(i)
                .ok_or_else(|| DataError::Parse("Missing close".to_string()))?;

            tx.execute(
                "INSERT OR REPLACE INTO closes (symbol, date, close, cached_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![symbol, date, close, cached_at],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    /// Store a universe listing, replacing any previous entries.
    pub fn save_universe(&self, entries: &[(String, String)]) -> Result<()> {
        let added_at = Utc::now().to_rfc3339();
        let tx = self.conn.unchecked_transaction()?;

        tx.execute("DELETE FROM universe", [])?;
        for (symbol, sector) in entries {
            tx.execute(
                "INSERT OR REPLACE INTO universe (symbol, sector, added_at)
                 VALUES (?1, ?2, ?3)",
                params![symbol, sector, added_at],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    /// Load the stored universe listing, ordered by symbol.
    pub fn load_universe(&self) -> Result<Vec<(String, String)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT symbol, sector FROM universe ORDER BY symbol")?;

        let entries = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<std::result::Result<Vec<(String, String)>, _>>()?;

        Ok(entries)
    }

    /// Summary statistics over the cache contents.
    pub fn stats(&self) -> Result<CacheStats> {
        let close_rows: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM closes", [], |row| row.get(0))?;
        let symbols: i64 = self.conn.query_row(
            "SELECT COUNT(DISTINCT symbol) FROM closes",
            [],
            |row| row.get(0),
        )?;
        let universe_entries: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM universe", [], |row| row.get(0))?;

        Ok(CacheStats {
            close_rows: close_rows as usize,
            symbols: symbols as usize,
            universe_entries: universe_entries as usize,
        })
    }

    /// Delete all cached data.
    pub fn clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM closes", [])?;
        self.conn.execute("DELETE FROM universe", [])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closes_frame(rows: &[(&str, &str, f64)]) -> DataFrame {
        let symbols: Vec<&str> = rows.iter().map(|r| r.0).collect();
        let dates: Vec<&str> = rows.iter().map(|r| r.1).collect();
        let closes: Vec<f64> = rows.iter().map(|r| r.2).collect();

        DataFrame::new(vec![
            Series::new("symbol".into(), symbols).into(),
            Series::new("date".into(), dates).into(),
            Series::new("close".into(), closes).into(),
        ])
        .unwrap()
    }

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn test_put_and_get_closes() {
        let cache = QuoteCache::in_memory().unwrap();
        cache
            .put_closes(&closes_frame(&[
                ("AAPL", "2024-01-02", 185.0),
                ("AAPL", "2024-01-03", 186.5),
            ]))
            .unwrap();

        let df = cache.get_closes("AAPL", d(1), d(31)).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.get_column_names(), vec!["symbol", "date", "close"]);
    }

    #[test]
    fn test_get_closes_empty_is_missing_data() {
        let cache = QuoteCache::in_memory().unwrap();
        let result = cache.get_closes("AAPL", d(1), d(31));
        assert!(matches!(result, Err(DataError::MissingData { .. })));
    }

    #[test]
    fn test_put_closes_replaces_duplicates() {
        let cache = QuoteCache::in_memory().unwrap();
        cache
            .put_closes(&closes_frame(&[("AAPL", "2024-01-02", 185.0)]))
            .unwrap();
        cache
            .put_closes(&closes_frame(&[("AAPL", "2024-01-02", 190.0)]))
            .unwrap();

        let stats = cache.stats().unwrap();
        assert_eq!(stats.close_rows, 1);
        assert_eq!(stats.symbols, 1);
    }

    #[test]
    fn test_has_closes_heuristic() {
        let cache = QuoteCache::in_memory().unwrap();
        assert!(!cache.has_closes("AAPL", d(1), d(31)).unwrap());

        // 22 rows over a 30-day window clears the 70% margin.
        let rows: Vec<(String, String, f64)> = (0..22)
            .map(|i| {
                (
                    "AAPL".to_string(),
                    format!("2024-01-{:02}", i + 2),
                    100.0 + i as f64,
                )
            })
            .collect();
        let refs: Vec<(&str, &str, f64)> = rows
            .iter()
            .map(|(s, date, c)| (s.as_str(), date.as_str(), *c))
            .collect();
        cache.put_closes(&closes_frame(&refs)).unwrap();

        assert!(cache.has_closes("AAPL", d(1), d(31)).unwrap());
    }

    #[test]
    fn test_universe_round_trip() {
        let cache = QuoteCache::in_memory().unwrap();
        cache
            .save_universe(&[
                ("AAPL".to_string(), "Information Technology".to_string()),
                ("JPM".to_string(), "Financials".to_string()),
            ])
            .unwrap();

        let entries = cache.load_universe().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, "AAPL");

        cache.clear().unwrap();
        assert!(cache.load_universe().unwrap().is_empty());
    }
}
