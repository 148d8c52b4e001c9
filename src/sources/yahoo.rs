//! Yahoo Finance API client for historical OHLCV data.
//!
//! Uses the unofficial chart API. Bars with missing quote fields are
//! dropped before the series is handed to the scanner.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::types::PriceSeries;

use super::MarketDataSource;

/// Yahoo Finance chart response.
#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooApiError>,
}

#[derive(Debug, Deserialize)]
struct YahooApiError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct YahooResult {
    timestamp: Option<Vec<i64>>,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<u64>>>,
}

/// Translate an `EXCHANGE:SYMBOL` identifier to Yahoo's suffix form
/// (NSE:INFY -> INFY.NS); bare symbols keep Yahoo's hyphen convention for
/// share classes (BRK.B -> BRK-B).
fn normalize_yahoo_symbol(symbol: &str) -> String {
    let symbol = symbol.to_uppercase();
    match symbol.split_once(':') {
        Some(("NSE", name)) => format!("{}.NS", name),
        Some(("BSE", name)) => format!("{}.BO", name),
        Some((_, name)) => name.to_string(),
        None => symbol.replace('.', "-"),
    }
}

/// Range wide enough to cover the requested bar count at an interval.
fn range_for(interval: &str) -> &'static str {
    match interval {
        "1m" | "5m" | "15m" => "5d",
        "1h" => "1mo",
        "1wk" => "5y",
        _ => "1y",
    }
}

/// Yahoo Finance market data source.
pub struct YahooFinanceClient {
    client: Client,
}

impl YahooFinanceClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .unwrap_or_default();

        Self { client }
    }
}

impl Default for YahooFinanceClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataSource for YahooFinanceClient {
    async fn fetch(&self, symbol: &str, interval: &str, bars: usize) -> Result<PriceSeries> {
        let yahoo_symbol = normalize_yahoo_symbol(symbol);
        let url = format!(
            "https://query1.finance.yahoo.com/v8/finance/chart/{}?range={}&interval={}&includePrePost=false",
            yahoo_symbol,
            range_for(interval),
            interval
        );

        debug!("Fetching Yahoo Finance data: {}", url);

        let response: YahooChartResponse = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::data_fetch(symbol, format!("request failed: {}", e)))?
            .json()
            .await
            .map_err(|e| AppError::data_fetch(symbol, format!("malformed response: {}", e)))?;

        if let Some(err) = response.chart.error {
            return Err(AppError::data_fetch(
                symbol,
                format!("{}: {}", err.code, err.description),
            ));
        }

        let result = response
            .chart
            .result
            .and_then(|mut r| (!r.is_empty()).then(|| r.remove(0)))
            .ok_or_else(|| AppError::data_fetch(symbol, "empty chart result"))?;

        let timestamps = result
            .timestamp
            .ok_or_else(|| AppError::data_fetch(symbol, "no timestamps in response"))?;
        let quote = result
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| AppError::data_fetch(symbol, "no quote data in response"))?;

        let (open, high, low, close, volume) = match (
            quote.open,
            quote.high,
            quote.low,
            quote.close,
            quote.volume,
        ) {
            (Some(o), Some(h), Some(l), Some(c), Some(v)) => (o, h, l, c, v),
            _ => return Err(AppError::data_fetch(symbol, "incomplete quote arrays")),
        };

        let mut series = PriceSeries {
            open: Vec::new(),
            high: Vec::new(),
            low: Vec::new(),
            close: Vec::new(),
            volume: Vec::new(),
        };

        for i in 0..timestamps.len() {
            let bar = (
                open.get(i).copied().flatten(),
                high.get(i).copied().flatten(),
                low.get(i).copied().flatten(),
                close.get(i).copied().flatten(),
                volume.get(i).copied().flatten(),
            );
            if let (Some(o), Some(h), Some(l), Some(c), Some(v)) = bar {
                series.open.push(o);
                series.high.push(h);
                series.low.push(l);
                series.close.push(c);
                series.volume.push(v as f64);
            }
        }

        // Keep only the trailing `bars` entries
        let n = series.len();
        if n > bars {
            let start = n - bars;
            series.open.drain(..start);
            series.high.drain(..start);
            series.low.drain(..start);
            series.close.drain(..start);
            series.volume.drain(..start);
        }

        if series.is_empty() {
            return Err(AppError::data_fetch(symbol, "no usable bars in response"));
        }

        Ok(series)
    }
}
