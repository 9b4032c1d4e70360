//! Sector-classified stock universes.
//!
//! A universe is the full set of symbols under analysis, each assigned to
//! exactly one sector label. Construction validates the entries: blank
//! symbols or sectors and duplicate symbols are dropped and counted, never
//! propagated as errors.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A universe constituent: one symbol assigned to one sector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constituent {
    /// Stock symbol.
    pub symbol: String,
    /// Sector label.
    pub sector: String,
}

impl Constituent {
    /// Create a new constituent.
    pub fn new(symbol: impl Into<String>, sector: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            sector: sector.into(),
        }
    }

    /// A constituent is valid when both symbol and sector are non-blank.
    pub fn is_valid(&self) -> bool {
        !self.symbol.trim().is_empty() && !self.sector.trim().is_empty()
    }
}

/// Counts of entries dropped while building a universe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniverseDiagnostics {
    /// Entries with a blank symbol or sector.
    pub invalid_entries: usize,
    /// Entries whose symbol was already present (first occurrence wins).
    pub duplicate_symbols: usize,
}

impl UniverseDiagnostics {
    /// Total number of entries dropped.
    pub const fn dropped(&self) -> usize {
        self.invalid_entries + self.duplicate_symbols
    }
}

/// A validated, deduplicated stock universe.
#[derive(Debug, Clone, Default)]
pub struct StockUniverse {
    constituents: Vec<Constituent>,
    symbol_to_sector: HashMap<String, String>,
}

impl StockUniverse {
    /// Build a universe from `(symbol, sector)` pairs.
    ///
    /// Blank symbols or sectors and duplicate symbols are dropped and
    /// counted in the returned [`UniverseDiagnostics`]. The first occurrence
    /// of a symbol wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use hobart_breadth::StockUniverse;
    ///
    /// let (universe, diag) = StockUniverse::from_entries([
    ///     ("AAPL".to_string(), "Information Technology".to_string()),
    ///     ("AAPL".to_string(), "Financials".to_string()),
    ///     ("".to_string(), "Energy".to_string()),
    /// ]);
    ///
    /// assert_eq!(universe.len(), 1);
    /// assert_eq!(diag.duplicate_symbols, 1);
    /// assert_eq!(diag.invalid_entries, 1);
    /// ```
    pub fn from_entries(
        entries: impl IntoIterator<Item = (String, String)>,
    ) -> (Self, UniverseDiagnostics) {
        Self::from_constituents(
            entries
                .into_iter()
                .map(|(symbol, sector)| Constituent { symbol, sector }),
        )
    }

    /// Build a universe from constituents, applying the same validation as
    /// [`StockUniverse::from_entries`].
    pub fn from_constituents(
        entries: impl IntoIterator<Item = Constituent>,
    ) -> (Self, UniverseDiagnostics) {
        let mut diagnostics = UniverseDiagnostics::default();
        let mut constituents = Vec::new();
        let mut symbol_to_sector: HashMap<String, String> = HashMap::new();

        for entry in entries {
            if !entry.is_valid() {
                diagnostics.invalid_entries += 1;
                continue;
            }
            if symbol_to_sector.contains_key(&entry.symbol) {
                diagnostics.duplicate_symbols += 1;
                continue;
            }
            symbol_to_sector.insert(entry.symbol.clone(), entry.sector.clone());
            constituents.push(entry);
        }

        (
            Self {
                constituents,
                symbol_to_sector,
            },
            diagnostics,
        )
    }

    /// Get all constituents, in input order.
    pub fn constituents(&self) -> &[Constituent] {
        &self.constituents
    }

    /// Get all symbols, in input order.
    pub fn symbols(&self) -> Vec<String> {
        self.constituents.iter().map(|c| c.symbol.clone()).collect()
    }

    /// Check if a symbol is in the universe.
    pub fn contains(&self, symbol: &str) -> bool {
        self.symbol_to_sector.contains_key(symbol)
    }

    /// Get the sector for a symbol.
    pub fn sector(&self, symbol: &str) -> Option<&str> {
        self.symbol_to_sector.get(symbol).map(String::as_str)
    }

    /// Get all symbols in a specific sector.
    pub fn symbols_in_sector(&self, sector: &str) -> Vec<String> {
        self.constituents
            .iter()
            .filter(|c| c.sector == sector)
            .map(|c| c.symbol.clone())
            .collect()
    }

    /// Get the distinct sector labels, lexicographically sorted.
    pub fn sectors(&self) -> Vec<String> {
        self.sector_counts().into_keys().collect()
    }

    /// Get the count of constituents per sector, keyed in sorted order.
    pub fn sector_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for constituent in &self.constituents {
            *counts.entry(constituent.sector.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Number of constituents.
    pub fn len(&self) -> usize {
        self.constituents.len()
    }

    /// Whether the universe is empty.
    pub fn is_empty(&self) -> bool {
        self.constituents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (StockUniverse, UniverseDiagnostics) {
        StockUniverse::from_entries([
            ("AAPL".to_string(), "Information Technology".to_string()),
            ("MSFT".to_string(), "Information Technology".to_string()),
            ("JPM".to_string(), "Financials".to_string()),
            ("XOM".to_string(), "Energy".to_string()),
        ])
    }

    #[test]
    fn test_universe_creation() {
        let (universe, diag) = sample();
        assert_eq!(universe.len(), 4);
        assert_eq!(diag.dropped(), 0);
        assert_eq!(universe.symbols(), vec!["AAPL", "MSFT", "JPM", "XOM"]);
    }

    #[test]
    fn test_sector_lookup() {
        let (universe, _) = sample();
        assert_eq!(universe.sector("AAPL"), Some("Information Technology"));
        assert_eq!(universe.sector("XOM"), Some("Energy"));
        assert_eq!(universe.sector("INVALID"), None);
    }

    #[test]
    fn test_symbols_in_sector() {
        let (universe, _) = sample();
        let tech = universe.symbols_in_sector("Information Technology");
        assert_eq!(tech, vec!["AAPL", "MSFT"]);
        assert!(universe.symbols_in_sector("Utilities").is_empty());
    }

    #[test]
    fn test_sectors_sorted() {
        let (universe, _) = sample();
        assert_eq!(
            universe.sectors(),
            vec!["Energy", "Financials", "Information Technology"]
        );
    }

    #[test]
    fn test_sector_counts() {
        let (universe, _) = sample();
        let counts = universe.sector_counts();
        assert_eq!(counts.get("Information Technology"), Some(&2));
        assert_eq!(counts.get("Financials"), Some(&1));
    }

    #[test]
    fn test_invalid_entries_dropped() {
        let (universe, diag) = StockUniverse::from_entries([
            ("AAPL".to_string(), "Information Technology".to_string()),
            ("  ".to_string(), "Energy".to_string()),
            ("JPM".to_string(), String::new()),
        ]);
        assert_eq!(universe.len(), 1);
        assert_eq!(diag.invalid_entries, 2);
    }

    #[test]
    fn test_duplicate_first_wins() {
        let (universe, diag) = StockUniverse::from_entries([
            ("AAPL".to_string(), "Information Technology".to_string()),
            ("AAPL".to_string(), "Energy".to_string()),
        ]);
        assert_eq!(universe.len(), 1);
        assert_eq!(diag.duplicate_symbols, 1);
        assert_eq!(universe.sector("AAPL"), Some("Information Technology"));
    }
}
