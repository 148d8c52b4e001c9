//! Scan orchestration.
//!
//! Runs each symbol independently through fetch, indicators, features,
//! scoring and deduplication, with a cache short-circuit in front and a
//! write-through behind. One symbol's failure becomes its error entry;
//! the batch always completes.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::Result;
use crate::services::cache::{CacheStore, TTL_SCAN_DATA, TTL_SIGNAL};
use crate::services::dedup::DeduplicationGuard;
use crate::services::features::{build_features, FeatureOutcome};
use crate::services::scoring::{compute_score, detect_long_signal};
use crate::sources::MarketDataSource;
use crate::types::{
    LastValues, PriceSeries, ScanReport, ScanResponse, ScanStats, Signal, SymbolOutcome,
};
use crate::validators::{validate_entry, validate_symbol};

const STRATEGY_VERSION: &str = "1.0";

/// Stop sits this many ATRs below entry, target this many above.
const ATR_STOP_MULT: f64 = 1.5;
const ATR_TARGET_MULT: f64 = 3.0;
/// Percent bracket when ATR is undefined or degenerate.
const FALLBACK_STOP_PCT: f64 = 0.03;
const FALLBACK_TARGET_PCT: f64 = 0.06;

/// Scanner over a market data source, with cache-backed idempotence.
pub struct Scanner {
    cache: Arc<CacheStore>,
    dedup: DeduplicationGuard,
    source: Arc<dyn MarketDataSource>,
}

impl Scanner {
    pub fn new(cache: Arc<CacheStore>, source: Arc<dyn MarketDataSource>) -> Self {
        let dedup = DeduplicationGuard::new(cache.clone());
        Self {
            cache,
            dedup,
            source,
        }
    }

    /// Scan a batch of symbols. Failures are isolated per symbol.
    pub async fn scan(&self, symbols: &[String], interval: &str, bars: usize) -> ScanResponse {
        let started = Instant::now();
        let now = Utc::now();

        let mut results = Vec::with_capacity(symbols.len());
        let mut signals_found = 0u32;
        let mut errors = 0u32;

        for symbol in symbols {
            match self.scan_symbol(symbol, interval, bars).await {
                Ok(report) => {
                    if report.signal.is_some() {
                        signals_found += 1;
                    }
                    results.push(SymbolOutcome::Report(Box::new(report)));
                }
                Err(e) => {
                    warn!("Scan failed for {}: {}", symbol, e);
                    errors += 1;
                    results.push(SymbolOutcome::Error {
                        symbol: symbol.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        let stats = ScanStats {
            scan_id: Uuid::new_v4(),
            scan_date: now.format("%Y-%m-%d").to_string(),
            scan_time: now,
            total_symbols_scanned: symbols.len() as u32,
            signals_found,
            errors,
            scan_duration_seconds: started.elapsed().as_secs_f64(),
        };

        if let Err(e) = self.cache.set(&stats.cache_key(), &stats, TTL_SIGNAL).await {
            warn!("Failed to cache scan stats: {}", e);
        }

        info!(
            "Scanned {} symbols: {} signals, {} errors in {:.2}s",
            stats.total_symbols_scanned, signals_found, errors, stats.scan_duration_seconds
        );

        ScanResponse {
            results,
            stats,
            timestamp: now,
        }
    }

    /// Scan one symbol, serving from cache when a fresh report exists.
    pub async fn scan_symbol(
        &self,
        symbol: &str,
        interval: &str,
        bars: usize,
    ) -> Result<ScanReport> {
        let symbol = validate_symbol(symbol)?;
        let cache_key = format!("scan:{}:{}", symbol, interval);

        match self.cache.get::<ScanReport>(&cache_key).await {
            Ok(Some(mut report)) => {
                debug!("Serving {} from cache", symbol);
                report.cached = true;
                return Ok(report);
            }
            Ok(None) => {}
            Err(e) => warn!("Cache lookup failed for {}: {}, treating as miss", symbol, e),
        }

        let series = self.source.fetch(&symbol, interval, bars).await?;
        series.validate()?;

        let report = self.evaluate(&symbol, &series).await;

        if let Err(e) = self.cache.set(&cache_key, &report, TTL_SCAN_DATA).await {
            warn!("Failed to cache scan report for {}: {}", symbol, e);
        }

        Ok(report)
    }

    async fn evaluate(&self, symbol: &str, series: &PriceSeries) -> ScanReport {
        // validate() guaranteed a non-empty series
        let last_close = series.close[series.len() - 1];

        let outcome = match build_features(series) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Feature build failed for {}: {}", symbol, e);
                FeatureOutcome {
                    features: Default::default(),
                    snapshot: Default::default(),
                    last_atr: None,
                }
            }
        };

        let score = compute_score(&outcome.features);
        let buy_signal = detect_long_signal(&outcome.features);

        let mut signal = None;
        if buy_signal {
            match self.build_signal(symbol, last_close, score, &outcome) {
                Ok(candidate) => {
                    if self.dedup.is_duplicate(&candidate).await {
                        debug!(
                            "Signal for {} on {} already processed, suppressing",
                            symbol, candidate.detected_date
                        );
                    } else {
                        if let Err(e) = self.dedup.mark_processed(&candidate).await {
                            warn!("Failed to mark {} as processed: {}", symbol, e);
                        }
                        if let Err(e) = self
                            .cache
                            .set(&candidate.cache_key(), &candidate, TTL_SIGNAL)
                            .await
                        {
                            warn!("Failed to cache signal for {}: {}", symbol, e);
                        }
                        info!(
                            "Long signal for {} at {} (score {})",
                            symbol, candidate.entry_price, score
                        );
                        signal = Some(candidate);
                    }
                }
                Err(e) => warn!("Discarding signal for {}: {}", symbol, e),
            }
        }

        ScanReport {
            symbol: symbol.to_string(),
            score,
            buy_signal,
            features: outcome.features,
            last: LastValues {
                close: last_close,
                rsi: outcome.snapshot.rsi,
                mfi: outcome.snapshot.mfi,
            },
            cached: false,
            signal,
        }
    }

    fn build_signal(
        &self,
        symbol: &str,
        entry_price: f64,
        score: u8,
        outcome: &FeatureOutcome,
    ) -> Result<Signal> {
        let (stop_loss, take_profit) = match outcome.last_atr {
            Some(atr) if atr > 0.0 && entry_price - ATR_STOP_MULT * atr > 0.0 => (
                entry_price - ATR_STOP_MULT * atr,
                entry_price + ATR_TARGET_MULT * atr,
            ),
            _ => (
                entry_price * (1.0 - FALLBACK_STOP_PCT),
                entry_price * (1.0 + FALLBACK_TARGET_PCT),
            ),
        };

        validate_entry(entry_price, stop_loss, take_profit)?;

        let now = Utc::now();
        Ok(Signal {
            symbol: symbol.to_string(),
            entry_price,
            stop_loss,
            take_profit,
            confirmation_score: score,
            signal_timestamp: now,
            detected_date: now.format("%Y-%m-%d").to_string(),
            snapshot: Some(outcome.snapshot.clone()),
            strategy_version: STRATEGY_VERSION.to_string(),
            notes: None,
        })
    }
}
