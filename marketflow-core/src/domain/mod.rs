//! Domain types for MarketFlow

pub mod candle;

pub use candle::{Candle, CandleSeries, SeriesError};
