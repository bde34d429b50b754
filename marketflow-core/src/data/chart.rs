//! Yahoo v8 chart payload parser.
//!
//! Converts one symbol's raw chart JSON into a [`CandleSeries`]. Rows missing
//! close/high/low are dropped (holidays, half-populated live bars); a payload
//! missing its structural fields is rejected as a whole so no partial series
//! is ever produced.

use crate::domain::{Candle, CandleSeries, SeriesError};
use chrono::DateTime;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Structural failures that discard a whole payload.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("payload is not valid chart JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("provider rejected the request: {0}")]
    ProviderRejected(String),

    #[error("provider error {code}: {description}")]
    Provider { code: String, description: String },

    #[error("missing structural field: {0}")]
    MissingField(&'static str),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(i64),

    #[error("series error: {0}")]
    Series(#[from] SeriesError),
}

#[derive(Debug, Deserialize)]
struct ChartPayload {
    chart: Option<ChartResult>,
    /// Per-symbol failure marker written by the batch proxy.
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    meta: Option<ChartMeta>,
    timestamp: Option<Vec<i64>>,
    indicators: Option<Indicators>,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    gmtoffset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<f64>>>,
}

/// Parse a chart payload from a JSON string.
pub fn parse_chart_json(json: &str) -> Result<CandleSeries, PayloadError> {
    let value: Value = serde_json::from_str(json)?;
    parse_chart_payload(&value)
}

/// Parse an already-decoded chart payload.
pub fn parse_chart_payload(value: &Value) -> Result<CandleSeries, PayloadError> {
    let payload = ChartPayload::deserialize(value)?;

    if let Some(err) = payload.error.filter(|e| !e.is_null()) {
        let reason = match err {
            Value::String(s) => s,
            other => other.to_string(),
        };
        return Err(PayloadError::ProviderRejected(reason));
    }

    let chart = payload.chart.ok_or(PayloadError::MissingField("chart"))?;

    let result = match chart.result {
        Some(result) => result,
        None => {
            return Err(match chart.error {
                Some(err) => PayloadError::Provider {
                    code: err.code,
                    description: err.description,
                },
                None => PayloadError::MissingField("chart.result"),
            })
        }
    };

    let data = result
        .into_iter()
        .next()
        .ok_or(PayloadError::MissingField("chart.result[0]"))?;

    let timestamps = data
        .timestamp
        .ok_or(PayloadError::MissingField("timestamp"))?;

    let quote = data
        .indicators
        .ok_or(PayloadError::MissingField("indicators"))?
        .quote
        .into_iter()
        .next()
        .ok_or(PayloadError::MissingField("indicators.quote[0]"))?;

    let high = quote.high.ok_or(PayloadError::MissingField("quote.high"))?;
    let low = quote.low.ok_or(PayloadError::MissingField("quote.low"))?;
    let close = quote.close.ok_or(PayloadError::MissingField("quote.close"))?;
    let open = quote.open.unwrap_or_default();
    let volume = quote.volume.unwrap_or_default();

    let gmt_offset = data.meta.and_then(|m| m.gmtoffset).unwrap_or(0);

    let mut candles: Vec<Candle> = Vec::with_capacity(timestamps.len());

    for (i, &ts) in timestamps.iter().enumerate() {
        let (Some(h), Some(l), Some(c)) = (
            high.get(i).copied().flatten(),
            low.get(i).copied().flatten(),
            close.get(i).copied().flatten(),
        ) else {
            continue;
        };

        // Providers occasionally repeat the live bar; keep the first occurrence.
        if candles.last().is_some_and(|prev| ts <= prev.timestamp) {
            continue;
        }

        let date = ts
            .checked_add(gmt_offset)
            .and_then(|local| DateTime::from_timestamp(local, 0))
            .map(|dt| dt.naive_utc().date())
            .ok_or(PayloadError::InvalidTimestamp(ts))?;

        candles.push(Candle {
            timestamp: ts,
            date,
            open: open.get(i).copied().flatten(),
            high: h,
            low: l,
            close: c,
            volume: volume.get(i).copied().flatten(),
        });
    }

    Ok(CandleSeries::new(candles)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    // 2024-01-02 14:30:00 UTC and the following two sessions.
    const TS: [i64; 3] = [1_704_205_800, 1_704_292_200, 1_704_378_600];

    fn payload(close: Value) -> Value {
        json!({
            "chart": {
                "result": [{
                    "timestamp": TS,
                    "indicators": {
                        "quote": [{
                            "open": [100.0, 101.0, 102.0],
                            "high": [105.0, 106.0, 107.0],
                            "low": [95.0, 96.0, 97.0],
                            "close": close,
                            "volume": [1000, null, 3000]
                        }]
                    }
                }],
                "error": null
            }
        })
    }

    #[test]
    fn parses_complete_rows() {
        let series = parse_chart_payload(&payload(json!([101.0, 102.0, 103.0]))).unwrap();
        assert_eq!(series.len(), 3);
        let first = series.candles()[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(first.open, Some(100.0));
        assert_eq!(first.volume, Some(1000.0));
        assert_eq!(series.candles()[1].volume, None);
    }

    #[test]
    fn drops_rows_missing_close() {
        let series = parse_chart_payload(&payload(json!([101.0, null, 103.0]))).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.closes(), vec![101.0, 103.0]);
    }

    #[test]
    fn short_arrays_drop_trailing_rows() {
        let series = parse_chart_payload(&payload(json!([101.0]))).unwrap();
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn missing_open_and_volume_are_tolerated() {
        let value = json!({
            "chart": {"result": [{
                "timestamp": [TS[0]],
                "indicators": {"quote": [{"high": [2.0], "low": [1.0], "close": [1.5]}]}
            }]}
        });
        let series = parse_chart_payload(&value).unwrap();
        assert_eq!(series.candles()[0].open, None);
        assert_eq!(series.candles()[0].volume, None);
    }

    #[test]
    fn missing_timestamps_discards_payload() {
        let value = json!({
            "chart": {"result": [{
                "indicators": {"quote": [{"high": [2.0], "low": [1.0], "close": [1.5]}]}
            }]}
        });
        assert!(matches!(
            parse_chart_payload(&value),
            Err(PayloadError::MissingField("timestamp"))
        ));
    }

    #[test]
    fn missing_close_array_discards_payload() {
        let value = json!({
            "chart": {"result": [{
                "timestamp": [TS[0]],
                "indicators": {"quote": [{"high": [2.0], "low": [1.0]}]}
            }]}
        });
        assert!(matches!(
            parse_chart_payload(&value),
            Err(PayloadError::MissingField("quote.close"))
        ));
    }

    #[test]
    fn provider_error_is_reported() {
        let value = json!({
            "chart": {"result": null, "error": {"code": "Not Found", "description": "No data found"}}
        });
        match parse_chart_payload(&value) {
            Err(PayloadError::Provider { code, .. }) => assert_eq!(code, "Not Found"),
            other => panic!("expected provider error, got {other:?}"),
        }
    }

    #[test]
    fn batch_error_marker_is_rejected() {
        let value = json!({"error": "HTTP 404"});
        assert!(matches!(
            parse_chart_payload(&value),
            Err(PayloadError::ProviderRejected(reason)) if reason == "HTTP 404"
        ));
    }

    #[test]
    fn repeated_live_bar_is_dropped() {
        let value = json!({
            "chart": {"result": [{
                "timestamp": [TS[0], TS[1], TS[1]],
                "indicators": {"quote": [{
                    "high": [2.0, 3.0, 4.0], "low": [1.0, 1.0, 1.0], "close": [1.5, 2.5, 3.5]
                }]}
            }]}
        });
        let series = parse_chart_payload(&value).unwrap();
        assert_eq!(series.closes(), vec![1.5, 2.5]);
    }

    #[test]
    fn gmt_offset_shifts_session_date() {
        // 2024-01-03 03:00 UTC is still 2024-01-02 in New York.
        let value = json!({
            "chart": {"result": [{
                "meta": {"gmtoffset": -18000},
                "timestamp": [1_704_250_800],
                "indicators": {"quote": [{"high": [2.0], "low": [1.0], "close": [1.5]}]}
            }]}
        });
        let series = parse_chart_payload(&value).unwrap();
        assert_eq!(
            series.candles()[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
    }

    #[test]
    fn invalid_json_is_rejected() {
        assert!(matches!(
            parse_chart_json("{not json"),
            Err(PayloadError::Json(_))
        ));
    }

    #[test]
    fn overflowing_local_time_discards_payload() {
        let value = json!({
            "chart": {"result": [{
                "meta": {"gmtoffset": 3600},
                "timestamp": [i64::MAX],
                "indicators": {"quote": [{"high": [2.0], "low": [1.0], "close": [1.5]}]}
            }]}
        });
        assert!(matches!(
            parse_chart_payload(&value),
            Err(PayloadError::InvalidTimestamp(ts)) if ts == i64::MAX
        ));
    }
}
