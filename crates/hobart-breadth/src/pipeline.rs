//! The breadth pipeline: filter, classify, aggregate, assemble.

use crate::aggregate::{overall_fractions, sector_fractions};
use crate::config::BreadthConfig;
use crate::error::Result;
use crate::report::{BreadthReport, Diagnostics, SectorRow};
use crate::series::PriceStore;
use crate::signal::SymbolSignals;
use crate::universe::{StockUniverse, UniverseDiagnostics};

/// Compute a market breadth report.
///
/// A pure function of its inputs: validates the configuration (the only
/// fatal path), excludes symbols with missing or insufficient history into
/// diagnostics, classifies every surviving symbol against every window,
/// and aggregates by sector and overall. Always returns a (possibly
/// partial) report once the configuration is accepted.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use hobart_breadth::{BreadthConfig, PriceSeries, PriceStore, StockUniverse, compute_breadth};
///
/// let (universe, _) = StockUniverse::from_entries([
///     ("AAPL".to_string(), "Information Technology".to_string()),
/// ]);
/// let mut store = PriceStore::new();
/// store.insert(
///     "AAPL",
///     PriceSeries::from_observations((0..30).map(|i| {
///         (NaiveDate::from_num_days_from_ce_opt(738_000 + i).unwrap(), 100.0 + i as f64)
///     })),
/// );
///
/// let config = BreadthConfig::new([20], 20);
/// let report = compute_breadth(&universe, &store, &config).unwrap();
/// assert_eq!(report.overall_fraction(20), Some(1.0));
/// ```
pub fn compute_breadth(
    universe: &StockUniverse,
    prices: &PriceStore,
    config: &BreadthConfig,
) -> Result<BreadthReport> {
    compute_breadth_with_diagnostics(universe, prices, config, UniverseDiagnostics::default())
}

/// [`compute_breadth`] with universe-construction diagnostics folded into
/// the report, for callers that built the universe from raw entries.
pub fn compute_breadth_with_diagnostics(
    universe: &StockUniverse,
    prices: &PriceStore,
    config: &BreadthConfig,
    universe_diagnostics: UniverseDiagnostics,
) -> Result<BreadthReport> {
    config.validate()?;

    let mut excluded = Vec::new();
    let mut detail = Vec::new();

    // Each symbol reads only its own series; failures here are data gaps,
    // excluded rather than propagated.
    for constituent in universe.constituents() {
        let series = prices.get(&constituent.symbol);
        let long_enough = series.is_some_and(|s| s.len() >= config.min_history);
        if !long_enough {
            excluded.push(constituent.symbol.clone());
            continue;
        }
        // min_history >= min(windows) was validated, and the series is
        // non-empty here, so compute always yields a row.
        if let Some(signals) = series.and_then(|s| {
            SymbolSignals::compute(
                constituent.symbol.clone(),
                constituent.sector.clone(),
                s,
                &config.windows,
            )
        }) {
            detail.push(signals);
        }
    }

    // Aggregation runs over the fully materialized signal set.
    let sectors = sector_fractions(&detail, &config.windows)
        .into_iter()
        .map(|(sector, fractions)| {
            let symbols = detail.iter().filter(|s| s.sector == sector).count();
            SectorRow {
                sector,
                symbols,
                fractions,
            }
        })
        .collect();
    let overall = overall_fractions(&detail, &config.windows);

    let as_of = detail.iter().map(|s| s.latest_date).max();
    detail.sort_by(|a, b| a.symbol.cmp(&b.symbol));
    excluded.sort();

    Ok(BreadthReport {
        windows: config.windows.clone(),
        as_of,
        detail,
        sectors,
        overall,
        diagnostics: Diagnostics {
            excluded_symbols: excluded,
            invalid_universe_entries: universe_diagnostics.invalid_entries,
            duplicate_universe_symbols: universe_diagnostics.duplicate_symbols,
        },
    })
}
