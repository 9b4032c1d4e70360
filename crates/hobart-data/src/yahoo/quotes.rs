//! Daily close fetching from Yahoo Finance.

use crate::error::{DataError, Result};
use chrono::{DateTime, Utc};
use polars::prelude::*;
use std::time::Duration;
use tokio::time::sleep;
use yahoo_finance_api as yahoo;

/// The result of a batch close fetch.
///
/// Per-symbol failures never abort the batch; they are collected here so
/// the caller can surface them (and the breadth diagnostics can account
/// for the missing series).
#[derive(Debug)]
pub struct BatchCloses {
    /// Combined frame with columns: symbol, date, close.
    pub frame: DataFrame,
    /// Symbols that could not be fetched, with the reason.
    pub failures: Vec<(String, DataError)>,
}

/// Yahoo Finance close-price provider with rate limiting.
pub struct YahooCloseProvider {
    provider: yahoo::YahooConnector,
    rate_limit_delay: Duration,
}

impl std::fmt::Debug for YahooCloseProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YahooCloseProvider")
            .field("rate_limit_delay", &self.rate_limit_delay)
            .finish_non_exhaustive()
    }
}

impl YahooCloseProvider {
    /// Create a provider with default rate limiting (1 req/sec).
    pub fn new() -> Result<Self> {
        Self::with_rate_limit(Duration::from_millis(1000))
    }

    /// Create a provider with custom rate limiting.
    pub fn with_rate_limit(rate_limit_delay: Duration) -> Result<Self> {
        Ok(Self {
            provider: yahoo::YahooConnector::new()
                .map_err(|e| DataError::YahooApi(e.to_string()))?,
            rate_limit_delay,
        })
    }

    /// Fetch daily closes for a single symbol.
    ///
    /// Uses adjusted closes, matching what the moving averages should see
    /// across splits and dividends.
    ///
    /// # Arguments
    /// * `symbol` - The ticker symbol (e.g., "AAPL")
    /// * `start` - Start date for the data
    /// * `end` - End date for the data
    ///
    /// # Returns
    /// A Polars DataFrame with columns: symbol, date, close
    pub async fn fetch_closes(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<DataFrame> {
        if start > end {
            return Err(DataError::InvalidDateRange {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        if symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        // Convert chrono DateTime to time::OffsetDateTime
        let start_time = time::OffsetDateTime::from_unix_timestamp(start.timestamp())
            .map_err(|e| DataError::TimeConversion(e.to_string()))?;
        let end_time = time::OffsetDateTime::from_unix_timestamp(end.timestamp())
            .map_err(|e| DataError::TimeConversion(e.to_string()))?;

        let response = self
            .provider
            .get_quote_history(symbol, start_time, end_time)
            .await?;

        let quotes = response
            .quotes()
            .map_err(|e| DataError::YahooApi(e.to_string()))?;

        if quotes.is_empty() {
            return Err(DataError::MissingData {
                symbol: symbol.to_string(),
                reason: "No data returned from Yahoo Finance".to_string(),
            });
        }

        let timestamps: Vec<i64> = quotes.iter().map(|q| q.timestamp).collect();
        let closes: Vec<f64> = quotes.iter().map(|q| q.adjclose).collect();

        let mut df = DataFrame::new(vec![
            Series::new("timestamp".into(), timestamps).into(),
            Series::new("close".into(), closes).into(),
        ])?;

        let symbol_col: Column = Series::new("symbol".into(), vec![symbol; df.height()]).into();
        df.with_column(symbol_col)?;

        // Convert timestamp to date
        let df = df
            .lazy()
            .with_column(
                (col("timestamp") * lit(1_000_000_000))
                    .cast(DataType::Datetime(TimeUnit::Nanoseconds, None))
                    .cast(DataType::Date)
                    .alias("date"),
            )
            .select(&[col("symbol"), col("date"), col("close")])
            .collect()?;

        // Apply rate limiting
        sleep(self.rate_limit_delay).await;

        Ok(df)
    }

    /// Fetch daily closes for multiple symbols.
    ///
    /// Symbols that fail are skipped and reported in
    /// [`BatchCloses::failures`]; the call itself fails only when no
    /// symbol could be fetched at all.
    pub async fn fetch_closes_batch(
        &self,
        symbols: &[String],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<BatchCloses> {
        let mut frames = Vec::new();
        let mut failures = Vec::new();

        for symbol in symbols {
            match self.fetch_closes(symbol, start, end).await {
                Ok(df) => frames.push(df.lazy()),
                Err(e) => failures.push((symbol.clone(), e)),
            }
        }

        if frames.is_empty() {
            return Err(DataError::MissingData {
                symbol: "batch".to_string(),
                reason: "No data fetched for any symbol".to_string(),
            });
        }

        let frame = concat(frames, UnionArgs::default())?.collect()?;

        Ok(BatchCloses { frame, failures })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    #[tokio::test]
    async fn test_invalid_date_range() {
        let provider = YahooCloseProvider::new().unwrap();
        let start = Utc::now();
        let end = start - ChronoDuration::days(30);

        let result = provider.fetch_closes("AAPL", start, end).await;
        assert!(matches!(result, Err(DataError::InvalidDateRange { .. })));
    }

    #[tokio::test]
    async fn test_invalid_symbol() {
        let provider = YahooCloseProvider::new().unwrap();
        let end = Utc::now();
        let start = end - ChronoDuration::days(30);

        let result = provider.fetch_closes("", start, end).await;
        assert!(matches!(result, Err(DataError::InvalidSymbol(_))));
    }

    #[tokio::test]
    #[ignore = "network access"]
    async fn test_fetch_closes() {
        let provider = YahooCloseProvider::new().unwrap();
        let end = Utc::now();
        let start = end - ChronoDuration::days(30);

        let df = provider.fetch_closes("AAPL", start, end).await.unwrap();
        assert!(df.height() > 0);
        assert_eq!(df.get_column_names(), vec!["symbol", "date", "close"]);
    }
}
