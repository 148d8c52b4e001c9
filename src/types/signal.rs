use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed set of boolean confirmation features for one symbol.
///
/// Every field defaults to `false`; an indicator without a defined final
/// value simply leaves its flag unset rather than failing the computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSet {
    /// Last OBV above the previous OBV.
    #[serde(default)]
    pub obv_bullish: bool,
    /// Last RSI below 40.
    #[serde(default)]
    pub rsi_bullish: bool,
    /// Last MFI below 40.
    #[serde(default)]
    pub mfi_bullish: bool,
    /// Last close above the mean of the trailing closes (up to 10).
    #[serde(default)]
    pub market_structure: bool,
    /// Bullish candlestick pattern at the final bar.
    #[serde(default)]
    pub candlestick_bullish: bool,
    /// Last close at or above the close three bars back.
    #[serde(default)]
    pub not_falling: bool,
    /// Higher-timeframe uptrend per moving-average comparison.
    #[serde(default)]
    pub htf_uptrend: bool,
    /// EMA-12 above EMA-26 at the last defined point.
    #[serde(default)]
    pub ema_trend: bool,
}

/// Indicator values captured at signal detection time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ema_12: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ema_26: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mfi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obv: Option<f64>,
}

/// A detected long entry for one symbol on one day.
///
/// Invariant: `stop_loss < entry_price < take_profit`, all positive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    pub symbol: String,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    /// Confirmation score, 0-12.
    pub confirmation_score: u8,
    pub signal_timestamp: DateTime<Utc>,
    /// Detection date as "YYYY-MM-DD".
    pub detected_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<IndicatorSnapshot>,
    pub strategy_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Signal {
    /// Cache key for this signal.
    pub fn cache_key(&self) -> String {
        format!(
            "signal:{}:{}:{}",
            self.symbol,
            self.detected_date,
            self.signal_timestamp.timestamp()
        )
    }
}

/// Summary of one scan run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanStats {
    /// Scan run identifier.
    pub scan_id: Uuid,
    /// Scan date as "YYYY-MM-DD".
    pub scan_date: String,
    pub scan_time: DateTime<Utc>,
    pub total_symbols_scanned: u32,
    pub signals_found: u32,
    pub errors: u32,
    pub scan_duration_seconds: f64,
}

impl ScanStats {
    /// Cache key for this scan run's stats.
    pub fn cache_key(&self) -> String {
        format!("scan-stats:{}", self.scan_date)
    }
}
