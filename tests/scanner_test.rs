//! Scan flow tests against a deterministic in-memory data source.

use std::sync::Arc;

use async_trait::async_trait;

use vigil::error::{AppError, Result};
use vigil::services::{CacheStore, Scanner};
use vigil::sources::MarketDataSource;
use vigil::types::{PriceSeries, SymbolOutcome};

/// Deterministic source: rising series for most symbols, a short series
/// for `NSE:SHORT`, an outright failure for `NSE:FAIL`.
struct StubSource;

fn rising_series(n: usize) -> PriceSeries {
    let close: Vec<f64> = (0..n).map(|i| 100.0 + i as f64 * 0.5).collect();
    PriceSeries {
        open: close.iter().map(|c| c - 0.4).collect(),
        high: close.iter().map(|c| c + 1.0).collect(),
        low: close.iter().map(|c| c - 1.0).collect(),
        close,
        volume: vec![1000.0; n],
    }
}

#[async_trait]
impl MarketDataSource for StubSource {
    async fn fetch(&self, symbol: &str, _interval: &str, bars: usize) -> Result<PriceSeries> {
        match symbol {
            "NSE:FAIL" => Err(AppError::data_fetch(symbol, "provider unavailable")),
            "NSE:SHORT" => Ok(rising_series(5)),
            _ => Ok(rising_series(bars.max(80))),
        }
    }
}

async fn scanner() -> Scanner {
    let cache = Arc::new(CacheStore::new("test", None).await);
    Scanner::new(cache, Arc::new(StubSource))
}

#[tokio::test]
async fn test_rising_symbol_produces_buy_signal() {
    let scanner = scanner().await;
    let report = scanner.scan_symbol("NSE:INFY", "1d", 100).await.unwrap();

    assert_eq!(report.symbol, "NSE:INFY");
    assert!(report.buy_signal);
    assert!(report.score >= 6);
    assert!(!report.cached);

    let signal = report.signal.expect("buy scan should attach a signal");
    assert!(signal.stop_loss < signal.entry_price);
    assert!(signal.entry_price < signal.take_profit);
    assert_eq!(signal.confirmation_score, report.score);
    assert_eq!(signal.entry_price, report.last.close);
}

#[tokio::test]
async fn test_second_scan_served_from_cache() {
    let scanner = scanner().await;
    let first = scanner.scan_symbol("NSE:INFY", "1d", 100).await.unwrap();
    let second = scanner.scan_symbol("NSE:INFY", "1d", 100).await.unwrap();

    assert!(!first.cached);
    assert!(second.cached);
    assert_eq!(second.score, first.score);
    assert_eq!(second.last.close, first.last.close);
}

#[tokio::test]
async fn test_dedup_suppresses_same_day_signal() {
    let scanner = scanner().await;

    // Different intervals bypass the scan-report cache but share the
    // per-day dedup record
    let first = scanner.scan_symbol("NSE:INFY", "1d", 100).await.unwrap();
    let second = scanner.scan_symbol("NSE:INFY", "1h", 100).await.unwrap();

    assert!(first.signal.is_some());
    assert!(second.buy_signal);
    assert!(second.signal.is_none(), "same-day signal must be suppressed");
}

#[tokio::test]
async fn test_batch_isolates_per_symbol_failures() {
    let scanner = scanner().await;
    let symbols: Vec<String> = ["NSE:INFY", "NSE:FAIL", "NSE:SHORT", "bad symbol!", "NSE:TCS"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let response = scanner.scan(&symbols, "1d", 100).await;

    assert_eq!(response.results.len(), 5);
    assert_eq!(response.stats.total_symbols_scanned, 5);
    assert_eq!(response.stats.errors, 3);

    let errored: Vec<&str> = response
        .results
        .iter()
        .filter(|r| r.is_error())
        .map(|r| r.symbol())
        .collect();
    assert!(errored.contains(&"NSE:FAIL"));
    assert!(errored.contains(&"NSE:SHORT"));
    assert!(errored.contains(&"bad symbol!"));

    // Healthy symbols still produce reports
    assert!(matches!(
        response.results[0],
        SymbolOutcome::Report(ref r) if r.symbol == "NSE:INFY"
    ));
    assert!(matches!(
        response.results[4],
        SymbolOutcome::Report(ref r) if r.symbol == "NSE:TCS"
    ));
}

#[tokio::test]
async fn test_short_series_reports_insufficient_data() {
    let scanner = scanner().await;
    let err = scanner.scan_symbol("NSE:SHORT", "1d", 100).await.unwrap_err();
    assert!(err.to_string().contains("insufficient data"));
}

#[tokio::test]
async fn test_scan_report_wire_shape() {
    let scanner = scanner().await;
    let report = scanner.scan_symbol("NSE:INFY", "1d", 100).await.unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert!(json["score"].is_u64());
    assert!(json["buy_signal"].is_boolean());
    assert!(json["last"]["close"].is_f64());
    let features = json["features"].as_object().unwrap();
    assert_eq!(features.len(), 8);
    for key in [
        "obv_bullish",
        "rsi_bullish",
        "mfi_bullish",
        "market_structure",
        "candlestick_bullish",
        "not_falling",
        "htf_uptrend",
        "ema_trend",
    ] {
        assert!(features.contains_key(key), "missing feature {}", key);
    }
    // fresh report carries no cached tag
    assert!(json.get("cached").is_none());
}
