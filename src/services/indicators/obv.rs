//! On-Balance Volume (OBV).

use crate::error::Result;
use crate::types::IndicatorSeries;

use super::check_aligned;

/// Running cumulative volume: `+volume` on a higher close, `-volume` on a
/// lower close, unchanged on an equal close. Starts at 0 and is defined at
/// every index.
pub fn obv(close: &[f64], volume: &[f64]) -> Result<IndicatorSeries> {
    check_aligned(&[close.len(), volume.len()])?;

    let mut out: IndicatorSeries = Vec::with_capacity(close.len());
    if close.is_empty() {
        return Ok(out);
    }

    out.push(Some(0.0));
    let mut current = 0.0;
    for i in 1..close.len() {
        if close[i] > close[i - 1] {
            current += volume[i];
        } else if close[i] < close[i - 1] {
            current -= volume[i];
        }
        out.push(Some(current));
    }

    Ok(out)
}
