//! Technical indicator implementations.
//!
//! Pure series-to-series functions. Every output series has the same length
//! as its input; positions before the first computable window are `None`.
//! A zero period or mismatched parallel input lengths fail with
//! `InvalidParameter`.

pub mod ad_line;
pub mod atr;
pub mod bollinger;
pub mod candle;
pub mod ema;
pub mod macd;
pub mod mfi;
pub mod obv;
pub mod rsi;
pub mod sma;
pub mod trend;
pub mod vwap;

pub use ad_line::ad_line;
pub use atr::atr;
pub use bollinger::{bollinger_bands, BollingerOutput};
pub use candle::detect_bullish_candle;
pub use ema::ema;
pub use macd::{macd, MacdOutput};
pub use mfi::mfi;
pub use obv::obv;
pub use rsi::rsi;
pub use sma::sma;
pub use trend::is_uptrend;
pub use vwap::vwap;

use crate::error::{AppError, Result};

/// Reject a zero window size.
pub(crate) fn check_period(period: usize) -> Result<()> {
    if period == 0 {
        return Err(AppError::InvalidParameter(
            "period must be positive".to_string(),
        ));
    }
    Ok(())
}

/// Reject parallel series of differing lengths.
pub(crate) fn check_aligned(lengths: &[usize]) -> Result<()> {
    if lengths.windows(2).any(|w| w[0] != w[1]) {
        return Err(AppError::InvalidParameter(format!(
            "parallel series lengths differ: {:?}",
            lengths
        )));
    }
    Ok(())
}

/// Typical price per bar: (high + low + close) / 3.
pub(crate) fn typical_prices(high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64> {
    high.iter()
        .zip(low)
        .zip(close)
        .map(|((h, l), c)| (h + l + c) / 3.0)
        .collect()
}
