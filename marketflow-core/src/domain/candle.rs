//! Candles, the basic market data unit, and the per-instrument series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One daily OHLCV observation.
///
/// `high`, `low` and `close` are always present; the parser drops any
/// provider row missing one of them. `open` and `volume` are optional.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Epoch seconds as reported by the provider.
    pub timestamp: i64,
    /// Calendar date of the trading session.
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<f64>,
}

impl Candle {
    /// Session range, `high - low`.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// True range against the previous session's close.
    pub fn true_range(&self, prev_close: f64) -> f64 {
        self.range()
            .max((self.high - prev_close).abs())
            .max((self.low - prev_close).abs())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("timestamps must be strictly increasing: {current} at index {index} follows {previous}")]
    NonIncreasingTimestamp {
        index: usize,
        previous: i64,
        current: i64,
    },
}

/// Time-ordered candles for one instrument.
///
/// Construction enforces strictly increasing timestamps; the series is
/// immutable afterwards.
/// Serializes as a plain array of candles, the shape `Deserialize` accepts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CandleSeries {
    candles: Vec<Candle>,
}

impl CandleSeries {
    /// Build a series, rejecting any out-of-order or duplicate timestamp.
    pub fn new(candles: Vec<Candle>) -> Result<Self, SeriesError> {
        for (index, pair) in candles.windows(2).enumerate() {
            if pair[1].timestamp <= pair[0].timestamp {
                return Err(SeriesError::NonIncreasingTimestamp {
                    index: index + 1,
                    previous: pair[0].timestamp,
                    current: pair[1].timestamp,
                });
            }
        }
        Ok(Self { candles })
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    /// Close prices in series order.
    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    /// Date span covered by the series, oldest to newest.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.candles.first(), self.candles.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date)),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for CandleSeries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let candles = Vec::<Candle>::deserialize(deserializer)?;
        CandleSeries::new(candles).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(timestamp: i64, close: f64) -> Candle {
        Candle {
            timestamp,
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            open: None,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: None,
        }
    }

    #[test]
    fn true_range_uses_gap_from_previous_close() {
        let c = Candle {
            high: 115.0,
            low: 108.0,
            ..candle(0, 112.0)
        };
        assert_eq!(c.true_range(100.0), 15.0);
        assert_eq!(c.true_range(110.0), 7.0);
    }

    #[test]
    fn series_accepts_increasing_timestamps() {
        let series = CandleSeries::new(vec![candle(1, 10.0), candle(2, 11.0)]).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.closes(), vec![10.0, 11.0]);
    }

    #[test]
    fn series_rejects_duplicate_timestamp() {
        let err = CandleSeries::new(vec![candle(5, 10.0), candle(5, 11.0)]).unwrap_err();
        assert_eq!(
            err,
            SeriesError::NonIncreasingTimestamp {
                index: 1,
                previous: 5,
                current: 5
            }
        );
    }

    #[test]
    fn empty_series_is_valid() {
        let series = CandleSeries::new(Vec::new()).unwrap();
        assert!(series.is_empty());
        assert!(series.last().is_none());
        assert!(series.date_range().is_none());
    }

    #[test]
    fn deserialize_enforces_ordering() {
        let good = CandleSeries::new(vec![candle(1, 10.0), candle(2, 11.0)]).unwrap();
        let json = serde_json::to_string(&good).unwrap();
        assert!(json.starts_with('['), "series must serialize as an array: {json}");
        let back: CandleSeries = serde_json::from_str(&json).unwrap();
        assert_eq!(back, good);

        let bad = serde_json::to_string(&vec![candle(2, 10.0), candle(1, 11.0)]).unwrap();
        assert!(serde_json::from_str::<CandleSeries>(&bad).is_err());
    }
}
