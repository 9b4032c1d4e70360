//! Normalization from a combined quotes frame to the core's price store.
//!
//! Multi-symbol fetches arrive as one long DataFrame. The breadth core
//! never deals with tabular shape; this module turns the frame into a
//! clean symbol → [`PriceSeries`] mapping, letting series construction
//! enforce chronological order and collapse duplicate dates.

use crate::error::{DataError, Result};
use chrono::NaiveDate;
use hobart_breadth::{PriceSeries, PriceStore};
use polars::prelude::*;
use std::collections::BTreeMap;

/// Build a [`PriceStore`] from a frame with `symbol`, `date`, and `close`
/// columns, as produced by the Yahoo provider or the quote cache.
///
/// Rows with a null in any column are rejected as a parse error: the fetch
/// and cache layers never emit them, so one indicates a malformed frame.
pub fn price_store_from_frame(df: &DataFrame) -> Result<PriceStore> {
    let symbols = df.column("symbol")?.str()?.clone();
    let dates = df.column("date")?.cast(&DataType::String)?;
    let dates = dates.str()?;
    let closes = df.column("close")?.f64()?.clone();

    let mut observations: BTreeMap<String, Vec<(NaiveDate, f64)>> = BTreeMap::new();

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

        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|e| DataError::Parse(format!("Invalid date {date}: {e}")))?;

        observations
            .entry(symbol.to_string())
            .or_default()
            .push((date, close));
    }

    let mut store = PriceStore::new();
    for (symbol, obs) in observations {
        store.insert(symbol, PriceSeries::from_observations(obs));
    }

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn frame(rows: &[(&str, &str, f64)]) -> DataFrame {
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

    #[test]
    fn test_store_from_frame() {
        let df = frame(&[
            ("AAPL", "2024-01-02", 185.0),
            ("AAPL", "2024-01-03", 186.5),
            ("JPM", "2024-01-02", 170.0),
        ]);

        let store = price_store_from_frame(&df).unwrap();
        assert_eq!(store.len(), 2);

        let aapl = store.get("AAPL").unwrap();
        assert_eq!(aapl.len(), 2);
        assert_relative_eq!(aapl.latest().unwrap().1, 186.5);
    }

    #[test]
    fn test_out_of_order_rows_are_sorted() {
        let df = frame(&[
            ("AAPL", "2024-01-03", 186.5),
            ("AAPL", "2024-01-02", 185.0),
        ]);

        let store = price_store_from_frame(&df).unwrap();
        let closes = store.get("AAPL").unwrap().closes();
        assert_eq!(closes, vec![185.0, 186.5]);
    }

    #[test]
    fn test_invalid_date_is_parse_error() {
        let df = frame(&[("AAPL", "not-a-date", 185.0)]);
        let err = price_store_from_frame(&df).unwrap_err();
        assert!(matches!(err, DataError::Parse(_)));
    }

    #[test]
    fn test_empty_frame_is_empty_store() {
        let df = frame(&[]);
        let store = price_store_from_frame(&df).unwrap();
        assert!(store.is_empty());
    }
}
