//! Feature extraction from indicator series.
//!
//! Reduces a price series and its derived indicators to the fixed set of
//! boolean confirmation flags. A flag whose indicator has no defined final
//! value stays `false`; feature building itself never fails on partial
//! windows.

use crate::error::Result;
use crate::services::indicators::{
    atr, detect_bullish_candle, ema, is_uptrend, mfi, obv, rsi,
};
use crate::types::{last_defined, last_two_defined, FeatureSet, IndicatorSnapshot, PriceSeries};

pub const RSI_PERIOD: usize = 14;
pub const MFI_PERIOD: usize = 14;
pub const ATR_PERIOD: usize = 14;
pub const EMA_FAST_PERIOD: usize = 12;
pub const EMA_SLOW_PERIOD: usize = 26;
pub const TREND_PERIOD: usize = 50;
pub const TREND_LOOKBACK: usize = 10;
/// Trailing closes used for the market-structure mean.
pub const STRUCTURE_WINDOW: usize = 10;
/// RSI/MFI level below which momentum counts as bullish.
pub const MOMENTUM_BULLISH_BELOW: f64 = 40.0;

/// Features plus the indicator values they were derived from.
#[derive(Debug, Clone)]
pub struct FeatureOutcome {
    pub features: FeatureSet,
    pub snapshot: IndicatorSnapshot,
    /// Last defined ATR, for bracket derivation.
    pub last_atr: Option<f64>,
}

/// Build the confirmation feature set for a price series.
pub fn build_features(series: &PriceSeries) -> Result<FeatureOutcome> {
    let closes = &series.close;
    let n = closes.len();

    let obv_series = obv(closes, &series.volume)?;
    let rsi_series = rsi(closes, RSI_PERIOD)?;
    let mfi_series = mfi(&series.high, &series.low, closes, &series.volume, MFI_PERIOD)?;
    let atr_series = atr(&series.high, &series.low, closes, ATR_PERIOD)?;
    let ema_fast = ema(closes, EMA_FAST_PERIOD)?;
    let ema_slow = ema(closes, EMA_SLOW_PERIOD)?;

    let last_rsi = last_defined(&rsi_series);
    let last_mfi = last_defined(&mfi_series);
    let last_obv = last_defined(&obv_series);
    let last_ema_fast = last_defined(&ema_fast);
    let last_ema_slow = last_defined(&ema_slow);

    let obv_bullish = matches!(last_two_defined(&obv_series), Some((prev, last)) if last > prev);
    let rsi_bullish = matches!(last_rsi, Some(v) if v < MOMENTUM_BULLISH_BELOW);
    let mfi_bullish = matches!(last_mfi, Some(v) if v < MOMENTUM_BULLISH_BELOW);

    let market_structure = match closes.last() {
        Some(last_close) => {
            let window = &closes[n.saturating_sub(STRUCTURE_WINDOW)..];
            let mean = window.iter().sum::<f64>() / window.len() as f64;
            *last_close > mean
        }
        None => false,
    };

    let candlestick_bullish = n > 0
        && detect_bullish_candle(&series.open, &series.high, &series.low, closes, n - 1);

    // Too short a tail to look three bars back counts as "not falling".
    let not_falling = n < 4 || closes[n - 1] >= closes[n - 4];

    let htf_uptrend = is_uptrend(closes, TREND_PERIOD, TREND_LOOKBACK)?;

    let ema_trend = matches!(
        (last_ema_fast, last_ema_slow),
        (Some(fast), Some(slow)) if fast > slow
    );

    Ok(FeatureOutcome {
        features: FeatureSet {
            obv_bullish,
            rsi_bullish,
            mfi_bullish,
            market_structure,
            candlestick_bullish,
            not_falling,
            htf_uptrend,
            ema_trend,
        },
        snapshot: IndicatorSnapshot {
            ema_12: last_ema_fast,
            ema_26: last_ema_slow,
            rsi: last_rsi,
            mfi: last_mfi,
            obv: last_obv,
        },
        last_atr: last_defined(&atr_series),
    })
}
