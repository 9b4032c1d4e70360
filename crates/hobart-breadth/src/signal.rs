//! Above-average classification per symbol and window.

use crate::ma::trailing_mean;
use crate::series::PriceSeries;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Classify the latest price against a moving average value.
///
/// Strictly greater counts as above; a tie (price exactly equal to the
/// average) classifies as NOT above. An undefined average passes through
/// as `None` and the symbol drops out of that window's aggregate.
///
/// # Examples
///
/// ```
/// use hobart_breadth::above_average;
///
/// assert_eq!(above_average(101.0, Some(100.0)), Some(true));
/// assert_eq!(above_average(100.0, Some(100.0)), Some(false));
/// assert_eq!(above_average(100.0, None), None);
/// ```
pub fn above_average(latest_price: f64, ma: Option<f64>) -> Option<bool> {
    ma.map(|value| latest_price > value)
}

/// The classification of one symbol against one window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSignal {
    /// Window length in trading days.
    pub window: usize,
    /// Moving average at the latest observation; `None` when the series is
    /// shorter than the window.
    pub ma: Option<f64>,
    /// Whether the latest price is strictly above the average.
    pub above: Option<bool>,
}

/// All window classifications for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolSignals {
    /// Stock symbol.
    pub symbol: String,
    /// Sector label from the universe.
    pub sector: String,
    /// Latest trading day in the series.
    pub latest_date: NaiveDate,
    /// Latest closing price.
    pub latest_price: f64,
    /// One signal per configured window, in configuration order.
    pub signals: Vec<WindowSignal>,
}

impl SymbolSignals {
    /// Evaluate every window for one symbol's series.
    ///
    /// Windows are independent: a series too short for one window still
    /// produces signals for the others. Returns `None` only for an empty
    /// series, which has no latest price to classify.
    ///
    /// Reads only the given series, so evaluation is trivially
    /// parallelizable across symbols.
    pub fn compute(
        symbol: impl Into<String>,
        sector: impl Into<String>,
        series: &PriceSeries,
        windows: &[usize],
    ) -> Option<Self> {
        let (latest_date, latest_price) = series.latest()?;
        let closes = series.closes();

        let signals = windows
            .iter()
            .map(|&window| {
                let ma = trailing_mean(&closes, window);
                WindowSignal {
                    window,
                    ma,
                    above: above_average(latest_price, ma),
                }
            })
            .collect();

        Some(Self {
            symbol: symbol.into(),
            sector: sector.into(),
            latest_date,
            latest_price,
            signals,
        })
    }

    /// The signal for a specific window, if configured.
    pub fn signal_for(&self, window: usize) -> Option<&WindowSignal> {
        self.signals.iter().find(|s| s.window == window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn series(closes: &[f64]) -> PriceSeries {
        PriceSeries::from_observations(closes.iter().enumerate().map(|(i, &close)| {
            (
                NaiveDate::from_num_days_from_ce_opt(738_000 + i as i32).unwrap(),
                close,
            )
        }))
    }

    #[test]
    fn test_above_when_strictly_greater() {
        assert_eq!(above_average(10.5, Some(10.0)), Some(true));
        assert_eq!(above_average(9.5, Some(10.0)), Some(false));
    }

    #[test]
    fn test_tie_is_not_above() {
        // Constructed so the latest price equals the trailing mean exactly.
        let s = series(&[90.0, 110.0, 100.0]);
        let signals = SymbolSignals::compute("TIE", "Tech", &s, &[3]).unwrap();
        let signal = signals.signal_for(3).unwrap();

        assert_relative_eq!(signal.ma.unwrap(), 100.0);
        assert_relative_eq!(signals.latest_price, 100.0);
        assert_eq!(signal.above, Some(false));
    }

    #[test]
    fn test_short_series_undefined_per_window_only() {
        let s = series(&[1.0, 2.0, 3.0, 10.0]);
        let signals = SymbolSignals::compute("AAPL", "Tech", &s, &[2, 200]).unwrap();

        let short = signals.signal_for(2).unwrap();
        assert_eq!(short.above, Some(true));

        let long = signals.signal_for(200).unwrap();
        assert_eq!(long.ma, None);
        assert_eq!(long.above, None);
    }

    #[test]
    fn test_empty_series_has_no_signals() {
        let s = PriceSeries::default();
        assert!(SymbolSignals::compute("AAPL", "Tech", &s, &[20]).is_none());
    }

    #[test]
    fn test_signals_keep_configuration_order() {
        let s = series(&[1.0; 10]);
        let signals = SymbolSignals::compute("AAPL", "Tech", &s, &[5, 2, 8]).unwrap();
        let windows: Vec<usize> = signals.signals.iter().map(|s| s.window).collect();
        assert_eq!(windows, vec![5, 2, 8]);
    }
}
