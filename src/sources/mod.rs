//! Market data retrieval.

pub mod yahoo;

pub use yahoo::YahooFinanceClient;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::PriceSeries;

/// Collaborator supplying OHLCV history for one symbol.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetch up to `bars` bars at the given interval, oldest first.
    async fn fetch(&self, symbol: &str, interval: &str, bars: usize) -> Result<PriceSeries>;
}
