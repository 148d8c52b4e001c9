//! Confirmation scoring and entry decision.

use crate::types::FeatureSet;

/// Score a long entry must reach before it can trigger.
pub const ENTRY_SCORE_THRESHOLD: u8 = 6;
/// Maximum attainable confirmation score.
pub const MAX_SCORE: u8 = 12;

/// Sum the fixed weights of the truthy flags. Bounded to [0, 12];
/// `ema_trend` carries no weight and only gates the entry decision.
pub fn compute_score(features: &FeatureSet) -> u8 {
    let mut score = 0;
    if features.obv_bullish {
        score += 3;
    }
    if features.rsi_bullish {
        score += 2;
    }
    if features.mfi_bullish {
        score += 2;
    }
    if features.market_structure {
        score += 1;
    }
    if features.candlestick_bullish {
        score += 1;
    }
    if features.not_falling {
        score += 2;
    }
    if features.htf_uptrend {
        score += 1;
    }
    score
}

/// A long entry triggers iff the score reaches the threshold while the
/// series is not falling and the EMA trend is up.
pub fn detect_long_signal(features: &FeatureSet) -> bool {
    compute_score(features) >= ENTRY_SCORE_THRESHOLD && features.not_falling && features.ema_trend
}
