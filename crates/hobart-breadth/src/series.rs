//! Daily closing price series and the per-symbol snapshot store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One daily closing price observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Trading day.
    pub date: NaiveDate,
    /// Closing price.
    pub close: f64,
}

/// An ordered series of daily closing prices for one symbol.
///
/// Observations are chronologically sorted with no duplicate dates;
/// construction enforces both (duplicate dates collapse to the last
/// observation provided). Non-trading days are simply absent, and the
/// series is treated as contiguous trading days: no calendar weighting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    observations: Vec<Observation>,
}

impl PriceSeries {
    /// Build a series from `(date, close)` pairs in any order.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use hobart_breadth::PriceSeries;
    ///
    /// let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
    /// let series = PriceSeries::from_observations([(d(2), 101.0), (d(1), 100.0), (d(2), 102.0)]);
    ///
    /// assert_eq!(series.len(), 2);
    /// assert_eq!(series.latest(), Some((d(2), 102.0)));
    /// ```
    pub fn from_observations(observations: impl IntoIterator<Item = (NaiveDate, f64)>) -> Self {
        let mut by_date = BTreeMap::new();
        for (date, close) in observations {
            by_date.insert(date, close);
        }
        Self {
            observations: by_date
                .into_iter()
                .map(|(date, close)| Observation { date, close })
                .collect(),
        }
    }

    /// The observations, oldest first.
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Closing prices in chronological order.
    pub fn closes(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.close).collect()
    }

    /// The latest observation, if any.
    pub fn latest(&self) -> Option<(NaiveDate, f64)> {
        self.observations.last().map(|o| (o.date, o.close))
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the series has no observations.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// A fully materialized snapshot of price series, keyed by symbol.
///
/// The store is populated by an external data source and only consumed by
/// the breadth pipeline; it is not a stream and carries no partial data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceStore {
    series: BTreeMap<String, PriceSeries>,
}

impl PriceStore {
    /// Create an empty store.
    pub const fn new() -> Self {
        Self {
            series: BTreeMap::new(),
        }
    }

    /// Insert a series for a symbol, replacing any existing one.
    pub fn insert(&mut self, symbol: impl Into<String>, series: PriceSeries) {
        self.series.insert(symbol.into(), series);
    }

    /// Get the series for a symbol.
    pub fn get(&self, symbol: &str) -> Option<&PriceSeries> {
        self.series.get(symbol)
    }

    /// Symbols with a series, in sorted order.
    pub fn symbols(&self) -> Vec<&str> {
        self.series.keys().map(String::as_str).collect()
    }

    /// Number of series held.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
