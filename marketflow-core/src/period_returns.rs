//! Calendar-anchored period returns (WTD / MTD / YTD).
//!
//! "Today" is the date of the latest candle. Each period has a calendar
//! baseline date; the baseline close is the close of the most recent candle
//! dated on or before it, so weekends and holidays fall back to the prior
//! trading session.

use crate::domain::Candle;
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Minimum candles before any period return is reported.
pub const MIN_PERIOD_CANDLES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    WeekToDate,
    MonthToDate,
    YearToDate,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::WeekToDate, Period::MonthToDate, Period::YearToDate];

    /// Last calendar day belonging to the previous period.
    ///
    /// - week: the Sunday before this week's Monday (weeks start Monday)
    /// - month: last day of the previous month
    /// - year: December 31 of the previous year
    pub fn baseline_date(self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            Period::WeekToDate => {
                let since_monday = u64::from(today.weekday().num_days_from_monday());
                today.checked_sub_days(Days::new(since_monday + 1))
            }
            Period::MonthToDate => today.checked_sub_days(Days::new(u64::from(today.day()))),
            Period::YearToDate => NaiveDate::from_ymd_opt(today.year() - 1, 12, 31),
        }
    }
}

/// Close of the newest candle dated on or before `date`.
pub fn close_on_or_before(candles: &[Candle], date: NaiveDate) -> Option<f64> {
    candles
        .iter()
        .rev()
        .find(|c| c.date <= date)
        .map(|c| c.close)
}

/// Percent change from `base` to `current`; undefined for a zero base.
pub fn percent_return(current: f64, base: f64) -> Option<f64> {
    (base != 0.0).then(|| (current - base) / base * 100.0)
}

/// Return of the latest close against one period's baseline.
pub fn period_return(candles: &[Candle], period: Period) -> Option<f64> {
    if candles.len() < MIN_PERIOD_CANDLES {
        return None;
    }
    let last = candles.last()?;
    let baseline = period.baseline_date(last.date)?;
    let base_close = close_on_or_before(candles, baseline)?;
    percent_return(last.close, base_close)
}

/// Week-, month- and year-to-date returns.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PeriodReturns {
    pub wtd: Option<f64>,
    pub mtd: Option<f64>,
    pub ytd: Option<f64>,
}

impl PeriodReturns {
    pub fn compute(candles: &[Candle]) -> Self {
        Self {
            wtd: period_return(candles, Period::WeekToDate),
            mtd: period_return(candles, Period::MonthToDate),
            ytd: period_return(candles, Period::YearToDate),
        }
    }

    pub fn get(&self, period: Period) -> Option<f64> {
        match period {
            Period::WeekToDate => self.wtd,
            Period::MonthToDate => self.mtd,
            Period::YearToDate => self.ytd,
        }
    }
}
