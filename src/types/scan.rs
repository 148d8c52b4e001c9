use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{FeatureSet, ScanStats, Signal};

/// Latest raw values reported alongside a scan result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastValues {
    pub close: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mfi: Option<f64>,
}

/// Successful scan result for one symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub symbol: String,
    /// Confirmation score, 0-12.
    pub score: u8,
    pub buy_signal: bool,
    pub features: FeatureSet,
    pub last: LastValues,
    /// Present and `true` only when served from the cache.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub cached: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal: Option<Signal>,
}

/// Per-symbol scan outcome: a report, or an isolated error entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SymbolOutcome {
    Report(Box<ScanReport>),
    Error { symbol: String, error: String },
}

impl SymbolOutcome {
    /// The symbol this outcome belongs to.
    pub fn symbol(&self) -> &str {
        match self {
            SymbolOutcome::Report(report) => &report.symbol,
            SymbolOutcome::Error { symbol, .. } => symbol,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SymbolOutcome::Error { .. })
    }
}

/// Response body for a batch scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResponse {
    pub results: Vec<SymbolOutcome>,
    pub stats: ScanStats,
    pub timestamp: DateTime<Utc>,
}

/// Request body for a batch scan.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanRequest {
    pub symbols: Vec<String>,
    #[serde(default = "default_interval")]
    pub interval: String,
    #[serde(default = "default_bars")]
    pub bars: usize,
}

fn default_interval() -> String {
    "1d".to_string()
}

fn default_bars() -> usize {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cached_flag_omitted_when_false() {
        let report = ScanReport {
            symbol: "NSE:INFY".to_string(),
            score: 9,
            buy_signal: true,
            features: FeatureSet::default(),
            last: LastValues {
                close: 1500.0,
                rsi: Some(35.0),
                mfi: None,
            },
            cached: false,
            signal: None,
        };

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("cached").is_none());
        assert!(json.get("mfi").is_none());
    }

    #[test]
    fn test_error_outcome_shape() {
        let outcome = SymbolOutcome::Error {
            symbol: "NSE:BAD".to_string(),
            error: "insufficient data".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["error"], "insufficient data");
        assert!(outcome.is_error());
    }

    #[test]
    fn test_scan_request_defaults() {
        let request: ScanRequest =
            serde_json::from_str(r#"{"symbols": ["NSE:INFY"]}"#).unwrap();
        assert_eq!(request.interval, "1d");
        assert_eq!(request.bars, 100);
    }
}
