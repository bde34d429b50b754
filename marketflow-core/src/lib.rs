//! MarketFlow Core: candle series, statistical primitives, flow classifiers, indicator records.
//!
//! This crate contains the indicator computation engine:
//! - Domain types (candles, validated candle series)
//! - Provider chart payload parsing
//! - Statistical primitives (SMA, ATR, range position)
//! - Calendar-anchored period returns (WTD / MTD / YTD)
//! - Short-term and long-term flow classifiers
//! - Indicator record assembly
//! - Heat-map tiers for numeric cells
//!
//! Everything here is pure and synchronous. There is no shared state, so
//! records for different instruments can be computed concurrently.

pub mod data;
pub mod domain;
pub mod flow;
pub mod heatmap;
pub mod indicators;
pub mod period_returns;
pub mod record;

pub use data::{parse_chart_json, parse_chart_payload, PayloadError};
pub use domain::{Candle, CandleSeries, SeriesError};
pub use flow::{ColorTier, FlowLabel, FlowState};
pub use heatmap::CellTier;
pub use period_returns::{Period, PeriodReturns};
pub use record::{Column, IndicatorRecord, MIN_CANDLES};
