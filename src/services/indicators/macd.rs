//! MACD (Moving Average Convergence Divergence).

use crate::error::Result;
use crate::types::IndicatorSeries;

use super::{check_period, ema::ema};

/// The three aligned MACD series.
#[derive(Debug, Clone)]
pub struct MacdOutput {
    pub macd: IndicatorSeries,
    pub signal: IndicatorSeries,
    pub histogram: IndicatorSeries,
}

/// MACD line = EMA(fast) - EMA(slow), pointwise, undefined wherever either
/// operand is undefined. The signal line is the EMA of period `signal`
/// applied to the defined subsequence of the MACD line and scattered back
/// to the original indices; the histogram is the pointwise difference.
pub fn macd(prices: &[f64], fast: usize, slow: usize, signal: usize) -> Result<MacdOutput> {
    check_period(fast)?;
    check_period(slow)?;
    check_period(signal)?;

    let ema_fast = ema(prices, fast)?;
    let ema_slow = ema(prices, slow)?;

    let macd_line: IndicatorSeries = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| match (f, s) {
            (Some(f), Some(s)) => Some(f - s),
            _ => None,
        })
        .collect();

    let mut signal_line: IndicatorSeries = vec![None; macd_line.len()];
    let defined_indices: Vec<usize> = macd_line
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|_| i))
        .collect();

    if !defined_indices.is_empty() {
        let defined_values: Vec<f64> = macd_line.iter().flatten().copied().collect();
        let signal_ema = ema(&defined_values, signal)?;
        for (pos, idx) in defined_indices.iter().enumerate() {
            signal_line[*idx] = signal_ema[pos];
        }
    }

    let histogram: IndicatorSeries = macd_line
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| match (m, s) {
            (Some(m), Some(s)) => Some(m - s),
            _ => None,
        })
        .collect();

    Ok(MacdOutput {
        macd: macd_line,
        signal: signal_line,
        histogram,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macd_lengths_match_input() {
        let prices: Vec<f64> = (0..60).map(|i| 100.0 + (i % 7) as f64).collect();
        let out = macd(&prices, 12, 26, 9).unwrap();
        assert_eq!(out.macd.len(), 60);
        assert_eq!(out.signal.len(), 60);
        assert_eq!(out.histogram.len(), 60);
    }

    #[test]
    fn test_macd_undefined_before_slow_window() {
        let prices: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let out = macd(&prices, 12, 26, 9).unwrap();
        assert!(out.macd[..25].iter().all(Option::is_none));
        assert!(out.macd[25].is_some());
        // signal needs 9 defined MACD values: first at index 25 + 8
        assert!(out.signal[..33].iter().all(Option::is_none));
        assert!(out.signal[33].is_some());
    }

    #[test]
    fn test_macd_histogram_identity() {
        let prices: Vec<f64> = (0..80)
            .map(|i| 100.0 + ((i * 13) % 17) as f64 - 8.0)
            .collect();
        let out = macd(&prices, 12, 26, 9).unwrap();
        for i in 0..prices.len() {
            match (out.macd[i], out.signal[i]) {
                (Some(m), Some(s)) => assert_eq!(out.histogram[i], Some(m - s)),
                _ => assert!(out.histogram[i].is_none()),
            }
        }
    }
}
