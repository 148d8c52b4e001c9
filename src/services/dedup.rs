//! Signal deduplication.
//!
//! Guarantees at most one accepted signal per (symbol, detected date).
//! Presence of a dedup record blocks reprocessing for 24 hours; the stored
//! hash is never compared against later detections on the same day.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::Result;
use crate::services::cache::{CacheStore, TTL_SIGNAL};
use crate::types::Signal;

/// Marker stored under `dup:{symbol}:{detected_date}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DedupRecord {
    pub hash: String,
    pub processed_time: DateTime<Utc>,
}

/// Guard enforcing at-most-once signal emission per symbol and day.
pub struct DeduplicationGuard {
    cache: Arc<CacheStore>,
}

impl DeduplicationGuard {
    pub fn new(cache: Arc<CacheStore>) -> Self {
        Self { cache }
    }

    fn dedup_key(signal: &Signal) -> String {
        format!("dup:{}:{}", signal.symbol, signal.detected_date)
    }

    /// Content hash over (symbol, detected_date, entry_price).
    fn content_hash(signal: &Signal) -> String {
        let mut hasher = Sha256::new();
        hasher.update(
            format!(
                "{}_{}_{}",
                signal.symbol, signal.detected_date, signal.entry_price
            )
            .as_bytes(),
        );
        hex::encode(hasher.finalize())
    }

    /// True iff a record with a non-empty hash exists for this signal's
    /// (symbol, detected_date). A cache failure reads as "not a duplicate"
    /// rather than aborting the scan.
    pub async fn is_duplicate(&self, signal: &Signal) -> bool {
        let key = Self::dedup_key(signal);
        match self.cache.get::<DedupRecord>(&key).await {
            Ok(Some(record)) => !record.hash.is_empty(),
            Ok(None) => false,
            Err(e) => {
                warn!("Dedup lookup failed for {}: {}, treating as novel", key, e);
                false
            }
        }
    }

    /// Record this signal as processed for 24 hours.
    pub async fn mark_processed(&self, signal: &Signal) -> Result<()> {
        let key = Self::dedup_key(signal);
        let record = DedupRecord {
            hash: Self::content_hash(signal),
            processed_time: signal.signal_timestamp,
        };
        self.cache.set(&key, &record, TTL_SIGNAL).await?;
        debug!("Marked {} as processed", key);
        Ok(())
    }
}
