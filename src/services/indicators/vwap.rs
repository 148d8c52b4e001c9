//! Volume Weighted Average Price (VWAP).

use crate::error::Result;
use crate::types::IndicatorSeries;

use super::{check_aligned, typical_prices};

/// Cumulative `sum(typical_price * volume) / sum(volume)` from the series
/// start. Undefined only while the cumulative volume is exactly zero.
pub fn vwap(high: &[f64], low: &[f64], close: &[f64], volume: &[f64]) -> Result<IndicatorSeries> {
    check_aligned(&[high.len(), low.len(), close.len(), volume.len()])?;

    let tp = typical_prices(high, low, close);
    let mut out: IndicatorSeries = Vec::with_capacity(close.len());
    let mut cumulative_tp_volume = 0.0;
    let mut cumulative_volume = 0.0;

    for (t, v) in tp.iter().zip(volume) {
        cumulative_tp_volume += t * v;
        cumulative_volume += v;

        if cumulative_volume == 0.0 {
            out.push(None);
        } else {
            out.push(Some(cumulative_tp_volume / cumulative_volume));
        }
    }

    Ok(out)
}
