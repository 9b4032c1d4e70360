//! Polars DataFrame views of a breadth report.
//!
//! Undefined moving averages, signals, and fractions become nulls, so
//! downstream frame consumers can tell "no defined signal" apart from
//! "fully below" without any sentinel values.

use hobart_breadth::BreadthReport;
use polars::prelude::*;

/// Build the detail table as a DataFrame: one row per valid symbol with
/// `symbol`, `sector`, `latest_price`, and `ma_<w>` / `above_<w>` columns
/// per window.
pub fn detail_frame(report: &BreadthReport) -> PolarsResult<DataFrame> {
    let symbols: Vec<&str> = report.detail.iter().map(|r| r.symbol.as_str()).collect();
    let sectors: Vec<&str> = report.detail.iter().map(|r| r.sector.as_str()).collect();
    let prices: Vec<f64> = report.detail.iter().map(|r| r.latest_price).collect();

    let mut columns: Vec<Column> = vec![
        Series::new("symbol".into(), symbols).into(),
        Series::new("sector".into(), sectors).into(),
        Series::new("latest_price".into(), prices).into(),
    ];

    for (idx, &window) in report.windows.iter().enumerate() {
        let mas: Vec<Option<f64>> = report
            .detail
            .iter()
            .map(|r| r.signals[idx].ma)
            .collect();
        columns.push(Series::new(format!("ma_{window}").into(), mas).into());
    }
    for (idx, &window) in report.windows.iter().enumerate() {
        let aboves: Vec<Option<bool>> = report
            .detail
            .iter()
            .map(|r| r.signals[idx].above)
            .collect();
        columns.push(Series::new(format!("above_{window}").into(), aboves).into());
    }

    DataFrame::new(columns)
}

/// Build the sector summary as a DataFrame: one row per sector with
/// `sector`, `symbols`, and an `above_<w>_fraction` column per window.
pub fn sector_frame(report: &BreadthReport) -> PolarsResult<DataFrame> {
    let sectors: Vec<&str> = report.sectors.iter().map(|r| r.sector.as_str()).collect();
    let counts: Vec<u32> = report.sectors.iter().map(|r| r.symbols as u32).collect();

    let mut columns: Vec<Column> = vec![
        Series::new("sector".into(), sectors).into(),
        Series::new("symbols".into(), counts).into(),
    ];

    for (idx, &window) in report.windows.iter().enumerate() {
        let fractions: Vec<Option<f64>> = report
            .sectors
            .iter()
            .map(|r| r.fractions[idx])
            .collect();
        columns.push(Series::new(format!("above_{window}_fraction").into(), fractions).into());
    }

    DataFrame::new(columns)
}
