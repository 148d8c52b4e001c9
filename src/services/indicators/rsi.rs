//! Relative Strength Index (RSI).

use crate::error::Result;
use crate::types::IndicatorSeries;

use super::check_period;

/// RSI with Wilder smoothing.
///
/// The seed average gain/loss comes from the first `period` deltas, so the
/// first defined value sits at index `period` (a window of `period` deltas
/// needs `period + 1` prices). Each later step updates the averages as
/// `(avg * (period - 1) + new) / period`. Values lie in [0, 100]; an
/// all-zero loss window reads 100.
pub fn rsi(prices: &[f64], period: usize) -> Result<IndicatorSeries> {
    check_period(period)?;

    let mut out: IndicatorSeries = vec![None; prices.len()];
    if prices.len() < period + 1 {
        return Ok(out);
    }

    let deltas: Vec<f64> = prices.windows(2).map(|w| w[1] - w[0]).collect();

    let mut avg_gain = deltas[..period]
        .iter()
        .filter(|d| **d > 0.0)
        .sum::<f64>()
        / period as f64;
    let mut avg_loss = -deltas[..period]
        .iter()
        .filter(|d| **d < 0.0)
        .sum::<f64>()
        / period as f64;

    out[period] = Some(rsi_value(avg_gain, avg_loss));

    for (i, delta) in deltas.iter().enumerate().skip(period) {
        let gain = delta.max(0.0);
        let loss = (-delta).max(0.0);
        avg_gain = (avg_gain * (period - 1) as f64 + gain) / period as f64;
        avg_loss = (avg_loss * (period - 1) as f64 + loss) / period as f64;
        out[i + 1] = Some(rsi_value(avg_gain, avg_loss));
    }

    Ok(out)
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_insufficient_bars_all_undefined() {
        let out = rsi(&[10.0; 5], 14).unwrap();
        assert_eq!(out.len(), 5);
        assert!(out.iter().all(Option::is_none));
    }

    #[test]
    fn test_rsi_first_defined_index() {
        let prices: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let out = rsi(&prices, 14).unwrap();
        assert!(out[..14].iter().all(Option::is_none));
        assert!(out[14].is_some());
    }

    #[test]
    fn test_rsi_pure_uptrend_reads_100() {
        let prices: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let out = rsi(&prices, 14).unwrap();
        for value in out.iter().flatten() {
            assert_eq!(*value, 100.0);
        }
    }

    #[test]
    fn test_rsi_bounded_0_100() {
        let prices: Vec<f64> = (0..40)
            .map(|i| 100.0 + ((i * 37) % 11) as f64 - 5.0)
            .collect();
        let out = rsi(&prices, 14).unwrap();
        for value in out.iter().flatten() {
            assert!(
                (0.0..=100.0).contains(value),
                "RSI out of range: {}",
                value
            );
        }
    }

    #[test]
    fn test_rsi_downtrend_low() {
        let prices: Vec<f64> = (0..30).map(|i| 200.0 - i as f64).collect();
        let out = rsi(&prices, 14).unwrap();
        let last = out.last().unwrap().unwrap();
        assert!(last < 50.0, "RSI in downtrend should be low, got {}", last);
    }
}
