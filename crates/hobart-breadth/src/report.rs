//! The assembled breadth report.

use crate::signal::SymbolSignals;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One sector's breadth, with one fraction per configured window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorRow {
    /// Sector label.
    pub sector: String,
    /// Number of valid symbols in the sector.
    pub symbols: usize,
    /// Fraction of symbols above each window's average, parallel to
    /// [`BreadthReport::windows`]. `None` when no symbol in the sector has
    /// a defined signal for that window.
    pub fractions: Vec<Option<f64>>,
}

/// Exclusion counts surfaced alongside the report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Symbols excluded for missing or insufficient price history, sorted.
    pub excluded_symbols: Vec<String>,
    /// Universe entries dropped for a blank symbol or sector.
    pub invalid_universe_entries: usize,
    /// Universe entries dropped as duplicate symbols.
    pub duplicate_universe_symbols: usize,
}

impl Diagnostics {
    /// Number of symbols excluded for insufficient history.
    pub fn excluded_count(&self) -> usize {
        self.excluded_symbols.len()
    }
}

/// A market breadth report: per-symbol detail, sector aggregates, and
/// overall aggregates, immutable once produced.
///
/// Ordering is deterministic: detail rows sort by symbol ascending and
/// sector rows by sector name ascending. Recomputing from identical
/// inputs yields a byte-identical report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreadthReport {
    /// The configured windows, in configuration order.
    pub windows: Vec<usize>,
    /// The latest trading day seen across all valid symbols.
    pub as_of: Option<NaiveDate>,
    /// One row per valid symbol, sorted by symbol ascending. Rows with
    /// undefined per-window signals are kept, with the fields explicit.
    pub detail: Vec<SymbolSignals>,
    /// One row per sector, sorted by sector name ascending.
    pub sectors: Vec<SectorRow>,
    /// Whole-universe fraction above each window's average, parallel to
    /// `windows`.
    pub overall: Vec<Option<f64>>,
    /// Exclusion diagnostics.
    pub diagnostics: Diagnostics,
}

impl BreadthReport {
    /// The overall fraction for a window, if the window is configured and
    /// the aggregate is defined.
    pub fn overall_fraction(&self, window: usize) -> Option<f64> {
        let idx = self.windows.iter().position(|&w| w == window)?;
        self.overall[idx]
    }

    /// The fraction for a sector and window, if both exist and the
    /// aggregate is defined.
    pub fn sector_fraction(&self, sector: &str, window: usize) -> Option<f64> {
        let idx = self.windows.iter().position(|&w| w == window)?;
        let row = self.sectors.iter().find(|r| r.sector == sector)?;
        row.fractions[idx]
    }

    /// The detail row for a symbol, if it survived the history filter.
    pub fn symbol(&self, symbol: &str) -> Option<&SymbolSignals> {
        self.detail.iter().find(|row| row.symbol == symbol)
    }

    /// Number of valid symbols in the detail table.
    pub fn symbol_count(&self) -> usize {
        self.detail.len()
    }
}
