//! Integration test: quote cache frames feed the core's price store.

use chrono::NaiveDate;
use hobart_data::{QuoteCache, price_store_from_frame};
use polars::prelude::*;

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

#[test]
fn test_cached_frame_round_trips_into_price_store() {
    let cache = QuoteCache::in_memory().unwrap();
    cache
        .put_closes(&closes_frame(&[
            ("AAPL", "2024-01-03", 186.5),
            ("AAPL", "2024-01-02", 185.0),
            ("JPM", "2024-01-02", 170.0),
        ]))
        .unwrap();

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();

    // The cache emits a Date-typed column; normalization must accept it.
    let aapl = cache.get_closes("AAPL", start, end).unwrap();
    let store = price_store_from_frame(&aapl).unwrap();

    let series = store.get("AAPL").unwrap();
    assert_eq!(series.len(), 2);
    assert_eq!(series.closes(), vec![185.0, 186.5]);
    assert_eq!(
        series.latest().unwrap().0,
        NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
    );
}
