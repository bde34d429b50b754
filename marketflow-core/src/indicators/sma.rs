//! Simple Moving Average (SMA).
//!
//! Arithmetic mean of the trailing `period` closes. Undefined until `period`
//! closes exist; there is no partial warm-up average.

/// Windows the assembler evaluates, shortest first.
pub const SMA_PERIODS: [usize; 4] = [20, 50, 100, 200];

/// Mean of the last `period` closes, or `None` when history is too short.
pub fn sma(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period {
        return None;
    }
    let window = &closes[closes.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// The four trend averages over one close series.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovingAverages {
    pub sma20: Option<f64>,
    pub sma50: Option<f64>,
    pub sma100: Option<f64>,
    pub sma200: Option<f64>,
}

impl MovingAverages {
    pub fn from_closes(closes: &[f64]) -> Self {
        let [p20, p50, p100, p200] = SMA_PERIODS;
        Self {
            sma20: sma(closes, p20),
            sma50: sma(closes, p50),
            sma100: sma(closes, p100),
            sma200: sma(closes, p200),
        }
    }

    /// Defined averages in window order.
    pub fn defined(&self) -> impl Iterator<Item = f64> {
        [self.sma20, self.sma50, self.sma100, self.sma200]
            .into_iter()
            .flatten()
    }

    /// Mean percent distance of `close` from every defined average.
    pub fn mean_extension(&self, close: f64) -> Option<f64> {
        let (sum, count) = self
            .defined()
            .fold((0.0, 0usize), |(sum, n), avg| (sum + (close / avg - 1.0) * 100.0, n + 1));
        (count > 0).then(|| sum / count as f64)
    }
}
