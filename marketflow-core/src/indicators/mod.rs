//! Statistical primitives over a candle series.
//!
//! Every function here is a trailing reduction that reports only the latest
//! value. Insufficient history yields `None` rather than a partial result.

pub mod atr;
pub mod range;
pub mod sma;

pub use atr::{atr, true_ranges, ATR_PERIOD};
pub use range::{daily_close_range, range_position, window_range_position, RANGE_MIDPOINT};
pub use sma::{sma, MovingAverages, SMA_PERIODS};

/// Create synthetic daily candles from close prices for testing.
///
/// open = prev_close (or close for the first candle),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_candles(closes: &[f64]) -> Vec<crate::domain::Candle> {
    let data: Vec<(f64, f64, f64, f64)> = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            (open, open.max(close) + 1.0, open.min(close) - 1.0, close)
        })
        .collect();
    make_ohlc_candles(&data)
}

/// Create synthetic candles from (open, high, low, close) tuples, one per
/// calendar day starting 2024-01-02.
#[cfg(test)]
pub fn make_ohlc_candles(data: &[(f64, f64, f64, f64)]) -> Vec<crate::domain::Candle> {
    use crate::domain::Candle;
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let base_ts = 1_704_205_800;
    data.iter()
        .enumerate()
        .map(|(i, &(open, high, low, close))| Candle {
            timestamp: base_ts + i as i64 * 86_400,
            date: base_date + chrono::Duration::days(i as i64),
            open: Some(open),
            high,
            low,
            close,
            volume: Some(1000.0),
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
