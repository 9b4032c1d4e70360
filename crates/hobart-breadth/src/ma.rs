//! Simple moving averages over closing price series.
//!
//! The rolling mean at index `i` covers exactly the trailing `window`
//! observations ending at `i`; positions before the warm-up are undefined.
//! The average at `i` never uses data after `i`.

/// Compute the trailing simple moving average at every index.
///
/// Returns one entry per input price: `None` for indices before
/// `window - 1`, and the unweighted mean of the trailing `window` prices
/// from then on. Runs in O(n) via a running sum.
///
/// The full sequence is exposed (rather than just the tail value) so that
/// crossover-style consumers can be layered on without recomputation.
///
/// # Examples
///
/// ```
/// use hobart_breadth::rolling_mean;
///
/// let means = rolling_mean(&[1.0, 2.0, 3.0, 4.0], 2);
/// assert_eq!(means, vec![None, Some(1.5), Some(2.5), Some(3.5)]);
/// ```
pub fn rolling_mean(prices: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; prices.len()];
    }

    let mut means = Vec::with_capacity(prices.len());
    let mut sum = 0.0;

    for (i, &price) in prices.iter().enumerate() {
        sum += price;
        if i >= window {
            sum -= prices[i - window];
        }
        if i + 1 >= window {
            means.push(Some(sum / window as f64));
        } else {
            means.push(None);
        }
    }

    means
}

/// The simple moving average at the final index only.
///
/// `None` when the series is shorter than the window. This is the value
/// the breadth classifier consumes: the average over the last `window`
/// closes as of the latest trading day.
pub fn trailing_mean(prices: &[f64], window: usize) -> Option<f64> {
    if window == 0 || prices.len() < window {
        return None;
    }
    let tail = &prices[prices.len() - window..];
    Some(tail.iter().sum::<f64>() / window as f64)
}
