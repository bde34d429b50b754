//! Indicator assembly: one immutable record per instrument.
//!
//! A record is produced only from a series with at least [`MIN_CANDLES`]
//! candles. Individual fields that lack history are `None`; the record itself
//! is never partially built.

use crate::domain::CandleSeries;
use crate::flow::{classify_long_term, classify_short_term, FlowState};
use crate::indicators::{atr, daily_close_range, window_range_position, MovingAverages, ATR_PERIOD};
use crate::period_returns::PeriodReturns;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Minimum series length for a record.
pub const MIN_CANDLES: usize = 10;

/// Numeric columns a record exposes to sort/render collaborators, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Price,
    PctChange,
    AtrDelta,
    Dcr,
    Wr52,
    MaX,
    Wtd,
    Mtd,
    Ytd,
}

impl Column {
    pub const ALL: [Column; 9] = [
        Column::Price,
        Column::PctChange,
        Column::AtrDelta,
        Column::Dcr,
        Column::Wr52,
        Column::MaX,
        Column::Wtd,
        Column::Mtd,
        Column::Ytd,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Column::Price => "Price",
            Column::PctChange => "%Chg",
            Column::AtrDelta => "ATR\u{394}",
            Column::Dcr => "DCR",
            Column::Wr52 => "52WR",
            Column::MaX => "MAx",
            Column::Wtd => "WTD",
            Column::Mtd => "MTD",
            Column::Ytd => "YTD",
        }
    }
}

/// Derived indicators for one instrument as of its latest candle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRecord {
    pub as_of: NaiveDate,
    pub price: f64,
    pub pct_change: f64,
    pub atr_delta: Option<f64>,
    pub dcr: f64,
    pub wr52: f64,
    pub ma_x: Option<f64>,
    pub st_flow: FlowState,
    pub lt_flow: FlowState,
    pub wtd: Option<f64>,
    pub mtd: Option<f64>,
    pub ytd: Option<f64>,
}

impl IndicatorRecord {
    /// Assemble a record, or `None` when the series is shorter than [`MIN_CANDLES`].
    pub fn compute(series: &CandleSeries) -> Option<Self> {
        let candles = series.candles();
        if candles.len() < MIN_CANDLES {
            return None;
        }

        let last = candles[candles.len() - 1];
        let prev_close = candles[candles.len() - 2].close;
        let close = last.close;
        let change = close - prev_close;

        let pct_change = if prev_close != 0.0 {
            change / prev_close * 100.0
        } else {
            0.0
        };

        let atr_delta = atr(candles, ATR_PERIOD)
            .filter(|&a| a > 0.0)
            .map(|a| change / a);

        let closes = series.closes();
        let mas = MovingAverages::from_closes(&closes);
        let returns = PeriodReturns::compute(candles);

        Some(Self {
            as_of: last.date,
            price: close,
            pct_change,
            atr_delta,
            dcr: daily_close_range(&last),
            wr52: window_range_position(candles)?,
            ma_x: mas.mean_extension(close),
            st_flow: classify_short_term(close, mas.sma20, mas.sma50),
            lt_flow: classify_long_term(close, mas.sma50, mas.sma200),
            wtd: returns.wtd,
            mtd: returns.mtd,
            ytd: returns.ytd,
        })
    }

    /// Value of one numeric column.
    pub fn value(&self, column: Column) -> Option<f64> {
        match column {
            Column::Price => Some(self.price),
            Column::PctChange => Some(self.pct_change),
            Column::AtrDelta => self.atr_delta,
            Column::Dcr => Some(self.dcr),
            Column::Wr52 => Some(self.wr52),
            Column::MaX => self.ma_x,
            Column::Wtd => self.wtd,
            Column::Mtd => self.mtd,
            Column::Ytd => self.ytd,
        }
    }

    /// All numeric columns in [`Column::ALL`] order.
    pub fn values(&self) -> [Option<f64>; 9] {
        Column::ALL.map(|c| self.value(c))
    }
}
