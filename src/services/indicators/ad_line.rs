//! Accumulation/Distribution line (A/D).

use crate::error::Result;
use crate::types::IndicatorSeries;

use super::check_aligned;

/// Cumulative sum of `close-location-value * volume`, where the CLV is
/// `((close - low) - (high - close)) / (high - low)` and 0 on a zero-range
/// bar. Defined at every index.
pub fn ad_line(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    volume: &[f64],
) -> Result<IndicatorSeries> {
    check_aligned(&[high.len(), low.len(), close.len(), volume.len()])?;

    let mut out: IndicatorSeries = Vec::with_capacity(close.len());
    let mut cumulative = 0.0;

    for i in 0..close.len() {
        let clv = if high[i] == low[i] {
            0.0
        } else {
            ((close[i] - low[i]) - (high[i] - close[i])) / (high[i] - low[i])
        };
        cumulative += clv * volume[i];
        out.push(Some(cumulative));
    }

    Ok(out)
}
