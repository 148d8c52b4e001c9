//! Simple Moving Average (SMA).

use crate::error::Result;
use crate::types::IndicatorSeries;

use super::check_period;

/// Arithmetic mean of the trailing `period` prices.
///
/// Undefined for indices below `period - 1`.
pub fn sma(prices: &[f64], period: usize) -> Result<IndicatorSeries> {
    check_period(period)?;

    let mut out: IndicatorSeries = vec![None; prices.len()];
    if prices.len() < period {
        return Ok(out);
    }

    for i in (period - 1)..prices.len() {
        let window = &prices[i + 1 - period..=i];
        out[i] = Some(window.iter().sum::<f64>() / period as f64);
    }

    Ok(out)
}
