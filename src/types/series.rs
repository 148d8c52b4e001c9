use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Minimum number of closes the scanner accepts for a series.
pub const MIN_BARS: usize = 10;

/// An indicator output aligned to its input series.
///
/// `None` marks a position before the first computable window, which is
/// distinct from a legitimate zero value.
pub type IndicatorSeries = Vec<Option<f64>>;

/// Parallel OHLCV series for one symbol, oldest bar first.
///
/// Immutable once fetched; the scanner discards it after indicator
/// computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub volume: Vec<f64>,
}

impl PriceSeries {
    /// Number of bars in the series.
    pub fn len(&self) -> usize {
        self.close.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    /// Validate the series shape: all five arrays equal length, at least
    /// `MIN_BARS` closes.
    pub fn validate(&self) -> Result<()> {
        let n = self.close.len();
        if self.open.len() != n
            || self.high.len() != n
            || self.low.len() != n
            || self.volume.len() != n
        {
            return Err(AppError::validation(
                "series",
                format!(
                    "parallel series lengths differ: open={} high={} low={} close={} volume={}",
                    self.open.len(),
                    self.high.len(),
                    self.low.len(),
                    n,
                    self.volume.len()
                ),
            ));
        }
        if n < MIN_BARS {
            return Err(AppError::validation(
                "series",
                format!("insufficient data: {} bars, need at least {}", n, MIN_BARS),
            ));
        }
        Ok(())
    }
}

/// Most recent defined value of a series, scanning from the end.
pub fn last_defined(series: &[Option<f64>]) -> Option<f64> {
    series.iter().rev().flatten().next().copied()
}

/// Last two defined values, as (previous, last).
pub fn last_two_defined(series: &[Option<f64>]) -> Option<(f64, f64)> {
    let mut it = series.iter().rev().flatten();
    let last = *it.next()?;
    let prev = *it.next()?;
    Some((prev, last))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_series(n: usize) -> PriceSeries {
        PriceSeries {
            open: vec![100.0; n],
            high: vec![101.0; n],
            low: vec![99.0; n],
            close: vec![100.0; n],
            volume: vec![1000.0; n],
        }
    }

    #[test]
    fn test_validate_accepts_min_bars() {
        assert!(flat_series(MIN_BARS).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_short_series() {
        let err = flat_series(MIN_BARS - 1).validate().unwrap_err();
        assert!(err.to_string().contains("insufficient data"));
    }

    #[test]
    fn test_validate_rejects_length_mismatch() {
        let mut series = flat_series(20);
        series.volume.pop();
        assert!(series.validate().is_err());
    }

    #[test]
    fn test_last_defined_skips_undefined_tail() {
        let series = vec![None, Some(1.0), Some(2.0), None];
        assert_eq!(last_defined(&series), Some(2.0));
    }

    #[test]
    fn test_last_two_defined() {
        let series = vec![Some(1.0), None, Some(2.0), Some(3.0)];
        assert_eq!(last_two_defined(&series), Some((2.0, 3.0)));
        assert_eq!(last_two_defined(&[None, Some(1.0)]), None);
    }
}
