//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|)
//! ATR here is the plain mean of the trailing `period` true ranges, not the
//! Wilder-smoothed variant. Needs period+1 candles (the first only supplies a
//! previous close).

use crate::domain::Candle;

/// Window used for the ATR-normalized daily change.
pub const ATR_PERIOD: usize = 14;

/// True range for every candle that has a predecessor.
///
/// The result has `candles.len() - 1` entries; entry `i` belongs to `candles[i + 1]`.
pub fn true_ranges(candles: &[Candle]) -> Vec<f64> {
    candles
        .windows(2)
        .map(|pair| pair[1].true_range(pair[0].close))
        .collect()
}

/// Mean true range over the trailing `period` candles.
pub fn atr(candles: &[Candle], period: usize) -> Option<f64> {
    if period == 0 || candles.len() < period + 1 {
        return None;
    }
    let tr = true_ranges(&candles[candles.len() - period - 1..]);
    debug_assert_eq!(tr.len(), period);
    Some(tr.iter().sum::<f64>() / period as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_ohlc_candles, DEFAULT_EPSILON};

    #[test]
    fn true_range_basic() {
        let candles = make_ohlc_candles(&[
            (100.0, 105.0, 95.0, 102.0),
            (102.0, 108.0, 100.0, 106.0), // max(8, |108-102|, |100-102|) = 8
            (106.0, 107.0, 98.0, 99.0),   // max(9, |107-106|, |98-106|) = 9
        ]);
        let tr = true_ranges(&candles);
        assert_eq!(tr.len(), 2);
        assert_approx(tr[0], 8.0, DEFAULT_EPSILON);
        assert_approx(tr[1], 9.0, DEFAULT_EPSILON);
    }

    #[test]
    fn true_range_gap_up() {
        let candles = make_ohlc_candles(&[
            (98.0, 102.0, 97.0, 100.0),
            (110.0, 115.0, 108.0, 112.0), // max(7, 15, 8) = 15
        ]);
        assert_approx(true_ranges(&candles)[0], 15.0, DEFAULT_EPSILON);
    }

    #[test]
    fn atr_period_3_is_simple_mean() {
        let candles = make_ohlc_candles(&[
            (100.0, 105.0, 95.0, 102.0),
            (102.0, 108.0, 100.0, 106.0), // TR = 8
            (106.0, 107.0, 98.0, 99.0),   // TR = 9
            (99.0, 103.0, 97.0, 101.0),   // TR = 6
            (101.0, 106.0, 100.0, 105.0), // TR = 6
        ]);
        // Trailing three: 9, 6, 6
        assert_approx(atr(&candles, 3).unwrap(), 7.0, DEFAULT_EPSILON);
        // Exactly period + 1 candles: 8, 9, 6, 6
        assert_approx(atr(&candles, 4).unwrap(), 29.0 / 4.0, DEFAULT_EPSILON);
    }

    #[test]
    fn atr_needs_one_extra_candle() {
        let candles = make_ohlc_candles(&[
            (100.0, 105.0, 95.0, 102.0),
            (102.0, 108.0, 100.0, 106.0),
            (106.0, 107.0, 98.0, 99.0),
        ]);
        assert!(atr(&candles, 3).is_none());
        assert!(atr(&candles, 2).is_some());
    }

    #[test]
    fn atr_empty_and_zero_period() {
        assert!(atr(&[], ATR_PERIOD).is_none());
        let candles = make_ohlc_candles(&[(1.0, 2.0, 0.5, 1.5), (1.5, 2.0, 1.0, 1.8)]);
        assert!(atr(&candles, 0).is_none());
    }

    #[test]
    fn atr_flat_series_is_zero() {
        let candles = make_ohlc_candles(&[(50.0, 50.0, 50.0, 50.0); 20]);
        assert_eq!(atr(&candles, ATR_PERIOD), Some(0.0));
    }
}
