//! End-to-end scenarios for the breadth pipeline.

use approx::assert_relative_eq;
use chrono::NaiveDate;
use hobart_breadth::{
    BreadthConfig, PriceSeries, PriceStore, StockUniverse, compute_breadth,
    compute_breadth_with_diagnostics,
};

fn trending_series(len: usize, start: f64, step: f64) -> PriceSeries {
    PriceSeries::from_observations((0..len).map(|i| {
        (
            NaiveDate::from_num_days_from_ce_opt(738_000 + i as i32).unwrap(),
            start + step * i as f64,
        )
    }))
}

fn universe(entries: &[(&str, &str)]) -> StockUniverse {
    let (universe, _) = StockUniverse::from_entries(
        entries
            .iter()
            .map(|(s, sec)| (s.to_string(), sec.to_string())),
    );
    universe
}

#[test]
fn scenario_sector_and_overall_breadth() {
    // A and B trade above their 20-day average, C does not.
    let universe = universe(&[("A", "Tech"), ("B", "Tech"), ("C", "Finance")]);
    let mut store = PriceStore::new();
    store.insert("A", trending_series(40, 100.0, 1.0));
    store.insert("B", trending_series(40, 200.0, 2.0));
    store.insert("C", trending_series(40, 100.0, -1.0));

    let report = compute_breadth(&universe, &store, &BreadthConfig::new([20], 20)).unwrap();

    assert_relative_eq!(report.sector_fraction("Tech", 20).unwrap(), 1.0);
    assert_relative_eq!(report.sector_fraction("Finance", 20).unwrap(), 0.0);
    assert_relative_eq!(report.overall_fraction(20).unwrap(), 2.0 / 3.0, epsilon = 1e-9);
}

#[test]
fn scenario_short_series_excluded_per_window_only() {
    // D has 30 observations: enough for the 20 window, not for 200.
    let universe = universe(&[("D", "Tech"), ("E", "Tech")]);
    let mut store = PriceStore::new();
    store.insert("D", trending_series(30, 100.0, 1.0));
    store.insert("E", trending_series(250, 100.0, 1.0));

    let report =
        compute_breadth(&universe, &store, &BreadthConfig::new([20, 200], 30)).unwrap();

    let d = report.symbol("D").unwrap();
    assert_eq!(d.signal_for(20).unwrap().above, Some(true));
    assert_eq!(d.signal_for(200).unwrap().above, None);

    // Only E contributes to the 200-day denominator.
    assert_relative_eq!(report.overall_fraction(200).unwrap(), 1.0);
    assert_relative_eq!(report.overall_fraction(20).unwrap(), 1.0);
}

#[test]
fn scenario_all_short_sector_is_undefined_not_zero() {
    let universe = universe(&[("A", "Micro"), ("B", "Micro"), ("C", "Mega")]);
    let mut store = PriceStore::new();
    store.insert("A", trending_series(50, 100.0, 1.0));
    store.insert("B", trending_series(60, 100.0, 1.0));
    store.insert("C", trending_series(250, 100.0, 1.0));

    let report =
        compute_breadth(&universe, &store, &BreadthConfig::new([20, 200], 50)).unwrap();

    // Undefined, not 0.0: no Micro symbol has 200 days of history.
    assert_eq!(report.sector_fraction("Micro", 200), None);
    assert_relative_eq!(report.sector_fraction("Mega", 200).unwrap(), 1.0);

    let micro = report.sectors.iter().find(|r| r.sector == "Micro").unwrap();
    let idx_200 = report.windows.iter().position(|&w| w == 200).unwrap();
    assert_eq!(micro.fractions[idx_200], None);
}

#[test]
fn scenario_idempotent_and_byte_identical() {
    let universe = universe(&[("A", "Tech"), ("B", "Finance"), ("C", "Energy")]);
    let mut store = PriceStore::new();
    store.insert("A", trending_series(250, 100.0, 0.3));
    store.insert("B", trending_series(180, 90.0, -0.2));
    store.insert("C", trending_series(120, 50.0, 0.1));

    let config = BreadthConfig::default();
    let first = compute_breadth(&universe, &store, &config).unwrap();
    let second = compute_breadth(&universe, &store, &config).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_vec(&first).unwrap(),
        serde_json::to_vec(&second).unwrap()
    );
}

#[test]
fn scenario_universe_diagnostics_flow_through() {
    let (universe, diag) = StockUniverse::from_entries([
        ("A".to_string(), "Tech".to_string()),
        ("A".to_string(), "Energy".to_string()),
        (String::new(), "Tech".to_string()),
    ]);
    let mut store = PriceStore::new();
    store.insert("A", trending_series(40, 100.0, 1.0));

    let report = compute_breadth_with_diagnostics(
        &universe,
        &store,
        &BreadthConfig::new([20], 20),
        diag,
    )
    .unwrap();

    assert_eq!(report.diagnostics.invalid_universe_entries, 1);
    assert_eq!(report.diagnostics.duplicate_universe_symbols, 1);
    assert_eq!(report.symbol_count(), 1);
}

#[test]
fn scenario_default_config_excludes_under_150_observations() {
    let universe = universe(&[("LONG", "Tech"), ("SHORT", "Tech")]);
    let mut store = PriceStore::new();
    store.insert("LONG", trending_series(250, 100.0, 0.5));
    store.insert("SHORT", trending_series(149, 100.0, 0.5));

    let report = compute_breadth(&universe, &store, &BreadthConfig::default()).unwrap();

    assert_eq!(report.symbol_count(), 1);
    assert_eq!(report.diagnostics.excluded_symbols, vec!["SHORT"]);

    // LONG has 250 observations: all three default windows are defined.
    let long = report.symbol("LONG").unwrap();
    assert!(long.signals.iter().all(|s| s.above.is_some()));
}
