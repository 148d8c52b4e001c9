//! Moving-average trend test.

use crate::error::Result;

use super::check_period;

/// Compare the mean of the most recent `period` prices to the mean of the
/// `period`-length window ending `lookback` bars earlier. `false` outright
/// when the series is shorter than `period + lookback`.
pub fn is_uptrend(prices: &[f64], period: usize, lookback: usize) -> Result<bool> {
    check_period(period)?;
    check_period(lookback)?;

    let n = prices.len();
    if n < period + lookback {
        return Ok(false);
    }

    let recent_ma = prices[n - period..].iter().sum::<f64>() / period as f64;
    let older_ma =
        prices[n - period - lookback..n - lookback].iter().sum::<f64>() / period as f64;

    Ok(recent_ma > older_ma)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uptrend_on_rising_series() {
        let prices: Vec<f64> = (0..70).map(|i| 100.0 + i as f64).collect();
        assert!(is_uptrend(&prices, 50, 10).unwrap());
    }

    #[test]
    fn test_downtrend_on_falling_series() {
        let prices: Vec<f64> = (0..70).map(|i| 200.0 - i as f64).collect();
        assert!(!is_uptrend(&prices, 50, 10).unwrap());
    }

    #[test]
    fn test_short_series_is_not_uptrend() {
        let prices: Vec<f64> = (0..59).map(|i| i as f64).collect();
        assert!(!is_uptrend(&prices, 50, 10).unwrap());
    }

    #[test]
    fn test_zero_period_rejected() {
        assert!(is_uptrend(&[1.0, 2.0], 0, 10).is_err());
    }
}
