//! Bullish candlestick pattern detection.

/// Test for a bullish pattern at one index: hammer or bullish engulfing.
///
/// Hammer: bullish candle with a lower wick longer than twice the body and
/// an upper wick under a tenth of it. Engulfing: bullish candle whose body
/// spans the previous bearish candle's body. Returns `false` for `idx < 2`,
/// an out-of-bounds index, or when no pattern matches.
pub fn detect_bullish_candle(
    open: &[f64],
    high: &[f64],
    low: &[f64],
    close: &[f64],
    idx: usize,
) -> bool {
    if idx < 2 || idx >= close.len() || idx >= open.len() || idx >= high.len() || idx >= low.len()
    {
        return false;
    }

    let (o, h, l, c) = (open[idx], high[idx], low[idx], close[idx]);
    let body = (c - o).abs();
    let range = h - l;

    let (o_prev, c_prev) = (open[idx - 1], close[idx - 1]);

    // Hammer
    if c > o && range > 0.0 {
        let lower_wick = o - l;
        let upper_wick = h - c;
        if lower_wick > 2.0 * body && upper_wick < body * 0.1 {
            return true;
        }
    }

    // Bullish engulfing: current bullish, previous bearish, current body
    // engulfs the previous one
    if c > o && c_prev < o_prev && c > o_prev && o < c_prev {
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hammer_detected() {
        // Long lower wick, tiny upper wick, bullish body at idx 2
        let open = [10.0, 10.0, 10.0];
        let high = [10.5, 10.5, 11.05];
        let low = [9.5, 9.5, 7.0];
        let close = [10.2, 10.2, 11.0];
        assert!(detect_bullish_candle(&open, &high, &low, &close, 2));
    }

    #[test]
    fn test_bullish_engulfing_detected() {
        // Previous candle bearish (open 10.5, close 10.0); current opens
        // below its close and closes above its open
        let open = [10.0, 10.5, 9.8];
        let high = [10.6, 10.6, 11.2];
        let low = [9.9, 9.9, 9.7];
        let close = [10.5, 10.0, 11.0];
        assert!(detect_bullish_candle(&open, &high, &low, &close, 2));
    }

    #[test]
    fn test_no_pattern_on_plain_candle() {
        let open = [10.0, 10.1, 10.2];
        let high = [10.3, 10.4, 10.5];
        let low = [9.9, 10.0, 10.1];
        let close = [10.1, 10.2, 10.3];
        assert!(!detect_bullish_candle(&open, &high, &low, &close, 2));
    }

    #[test]
    fn test_index_guards() {
        let series = [10.0, 10.0, 10.0];
        assert!(!detect_bullish_candle(&series, &series, &series, &series, 1));
        assert!(!detect_bullish_candle(&series, &series, &series, &series, 3));
    }
}
