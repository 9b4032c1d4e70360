//! Sector and overall breadth aggregation.
//!
//! Breadth for a group of symbols is `count(true) / count(defined)`:
//! undefined signals leave both the numerator and the denominator, so a
//! symbol lacking history for one window never drags that window's
//! fraction toward zero. A group with no defined signals aggregates to
//! `None`, never to zero or NaN.

use crate::signal::SymbolSignals;
use std::collections::BTreeMap;

/// The fraction of defined signals that are `true`.
///
/// `None` when no signal in the input is defined. When defined, the value
/// is always within `[0, 1]`.
///
/// # Examples
///
/// ```
/// use hobart_breadth::breadth_fraction;
///
/// let fraction = breadth_fraction([Some(true), Some(false), None]);
/// assert_eq!(fraction, Some(0.5));
///
/// assert_eq!(breadth_fraction([None, None]), None);
/// ```
pub fn breadth_fraction(signals: impl IntoIterator<Item = Option<bool>>) -> Option<f64> {
    let mut above = 0usize;
    let mut defined = 0usize;

    for signal in signals.into_iter().flatten() {
        defined += 1;
        if signal {
            above += 1;
        }
    }

    if defined == 0 {
        None
    } else {
        Some(above as f64 / defined as f64)
    }
}

/// Per-sector breadth fractions, one entry per window in `windows` order.
///
/// Sectors are keyed lexicographically, which fixes the deterministic
/// output order of the report's sector table.
pub fn sector_fractions(
    signals: &[SymbolSignals],
    windows: &[usize],
) -> BTreeMap<String, Vec<Option<f64>>> {
    let mut by_sector: BTreeMap<&str, Vec<&SymbolSignals>> = BTreeMap::new();
    for symbol in signals {
        by_sector.entry(&symbol.sector).or_default().push(symbol);
    }

    by_sector
        .into_iter()
        .map(|(sector, members)| {
            let fractions = windows
                .iter()
                .map(|&window| {
                    breadth_fraction(
                        members
                            .iter()
                            .map(|s| s.signal_for(window).and_then(|sig| sig.above)),
                    )
                })
                .collect();
            (sector.to_string(), fractions)
        })
        .collect()
}

/// Whole-universe breadth fractions, one entry per window in `windows` order.
pub fn overall_fractions(signals: &[SymbolSignals], windows: &[usize]) -> Vec<Option<f64>> {
    windows
        .iter()
        .map(|&window| {
            breadth_fraction(
                signals
                    .iter()
                    .map(|s| s.signal_for(window).and_then(|sig| sig.above)),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::PriceSeries;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn signals(symbol: &str, sector: &str, closes: &[f64], windows: &[usize]) -> SymbolSignals {
        let series = PriceSeries::from_observations(closes.iter().enumerate().map(|(i, &c)| {
            (
                NaiveDate::from_num_days_from_ce_opt(738_000 + i as i32).unwrap(),
                c,
            )
        }));
        SymbolSignals::compute(symbol, sector, &series, windows).unwrap()
    }

    #[test]
    fn test_fraction_excludes_undefined_from_denominator() {
        let fraction = breadth_fraction([Some(true), Some(true), None, Some(false)]);
        assert_relative_eq!(fraction.unwrap(), 2.0 / 3.0);
    }

    #[test]
    fn test_fraction_bounds() {
        assert_relative_eq!(breadth_fraction([Some(true); 4]).unwrap(), 1.0);
        assert_relative_eq!(breadth_fraction([Some(false); 4]).unwrap(), 0.0);
    }

    #[test]
    fn test_empty_denominator_is_undefined() {
        assert_eq!(breadth_fraction([]), None);
        assert_eq!(breadth_fraction([None, None, None]), None);
    }

    #[test]
    fn test_sector_grouping_is_sorted() {
        let windows = [2];
        let all = vec![
            signals("XOM", "Energy", &[1.0, 1.0, 2.0], &windows),
            signals("AAPL", "Tech", &[1.0, 1.0, 2.0], &windows),
        ];
        let by_sector = sector_fractions(&all, &windows);
        let sectors: Vec<&String> = by_sector.keys().collect();
        assert_eq!(sectors, vec!["Energy", "Tech"]);
    }

    #[test]
    fn test_sector_with_no_defined_signals_is_undefined() {
        let windows = [200];
        let all = vec![
            signals("A", "Tech", &[1.0, 2.0], &windows),
            signals("B", "Tech", &[3.0, 4.0], &windows),
        ];
        let by_sector = sector_fractions(&all, &windows);
        assert_eq!(by_sector["Tech"], vec![None]);
        assert_eq!(overall_fractions(&all, &windows), vec![None]);
    }

    #[test]
    fn test_overall_mixed_windows() {
        // Both symbols defined for window 2; only the longer series is
        // defined for window 3.
        let windows = [2, 3];
        let all = vec![
            signals("A", "Tech", &[1.0, 1.0, 5.0], &windows),
            signals("B", "Tech", &[9.0, 1.0], &windows),
        ];
        let overall = overall_fractions(&all, &windows);
        assert_relative_eq!(overall[0].unwrap(), 0.5);
        assert_relative_eq!(overall[1].unwrap(), 1.0);
    }
}
