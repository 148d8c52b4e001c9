//! Exponential Moving Average (EMA).

use crate::error::Result;
use crate::types::IndicatorSeries;

use super::check_period;

/// Exponentially weighted mean with smoothing factor `k = 2 / (period + 1)`.
///
/// The seed at index `period - 1` is the simple average of the first
/// `period` prices; every later value is `price * k + prev * (1 - k)`.
/// Undefined before the seed index.
pub fn ema(prices: &[f64], period: usize) -> Result<IndicatorSeries> {
    check_period(period)?;

    let mut out: IndicatorSeries = vec![None; prices.len()];
    if prices.len() < period {
        return Ok(out);
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut current = prices[..period].iter().sum::<f64>() / period as f64;
    out[period - 1] = Some(current);

    for i in period..prices.len() {
        current = prices[i] * k + current * (1.0 - k);
        out[i] = Some(current);
    }

    Ok(out)
}
