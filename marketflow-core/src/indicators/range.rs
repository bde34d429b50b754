//! Range position: where a close sits inside a high/low range, 0–100.

use crate::domain::Candle;

/// Value reported when the range has zero width.
pub const RANGE_MIDPOINT: f64 = 50.0;

/// `(close - low) / (high - low) * 100`, or the midpoint when `high <= low`.
pub fn range_position(close: f64, high: f64, low: f64) -> f64 {
    let range = high - low;
    if range > 0.0 {
        (close - low) / range * 100.0
    } else {
        RANGE_MIDPOINT
    }
}

/// Daily close-range position of one candle.
pub fn daily_close_range(candle: &Candle) -> f64 {
    range_position(candle.close, candle.high, candle.low)
}

/// Highest high and lowest low across the candles.
pub fn extremes(candles: &[Candle]) -> Option<(f64, f64)> {
    let first = candles.first()?;
    Some(
        candles
            .iter()
            .fold((first.high, first.low), |(hi, lo), c| (hi.max(c.high), lo.min(c.low))),
    )
}

/// Position of the latest close inside the whole series' high/low range.
pub fn window_range_position(candles: &[Candle]) -> Option<f64> {
    let last = candles.last()?;
    let (high, low) = extremes(candles)?;
    Some(range_position(last.close, high, low))
}
