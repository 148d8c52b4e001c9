//! Average True Range (ATR).

use crate::error::Result;
use crate::types::IndicatorSeries;

use super::{check_aligned, check_period};

/// ATR with Wilder smoothing.
///
/// True range: `high - low` for the first bar, then
/// `max(high - low, |high - prev_close|, |low - prev_close|)`. The seed at
/// index `period - 1` is the mean of the first `period` true ranges; later
/// values use `(atr * (period - 1) + tr) / period`. A series with fewer
/// than `period` true ranges comes back fully undefined.
pub fn atr(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Result<IndicatorSeries> {
    check_period(period)?;
    check_aligned(&[high.len(), low.len(), close.len()])?;

    let n = close.len();
    let mut out: IndicatorSeries = vec![None; n];
    if n < period {
        return Ok(out);
    }

    let mut true_ranges = Vec::with_capacity(n);
    true_ranges.push(high[0] - low[0]);
    for i in 1..n {
        let hl = high[i] - low[i];
        let hc = (high[i] - close[i - 1]).abs();
        let lc = (low[i] - close[i - 1]).abs();
        true_ranges.push(hl.max(hc).max(lc));
    }

    let mut current = true_ranges[..period].iter().sum::<f64>() / period as f64;
    out[period - 1] = Some(current);

    for i in period..n {
        current = (current * (period - 1) as f64 + true_ranges[i]) / period as f64;
        out[i] = Some(current);
    }

    Ok(out)
}
