//! Heat-map tiers for numeric table cells.
//!
//! Each column maps its value onto five tiers through a descending ladder of
//! strict `>` thresholds. Absent values are neutral.

use crate::record::Column;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CellTier {
    StrongPositive,
    Positive,
    Neutral,
    Negative,
    StrongNegative,
}

impl CellTier {
    pub fn css_class(self) -> &'static str {
        match self {
            CellTier::StrongPositive => "cell-positive-strong",
            CellTier::Positive => "cell-positive",
            CellTier::Neutral => "cell-neutral",
            CellTier::Negative => "cell-negative",
            CellTier::StrongNegative => "cell-negative-strong",
        }
    }
}

use CellTier::*;

/// Daily change and ATR-normalized change.
const CHANGE: &[(f64, CellTier)] = &[(2.0, StrongPositive), (0.5, Positive), (-0.5, Neutral), (-2.0, Negative)];
/// Daily close range has no neutral band.
const DCR: &[(f64, CellTier)] = &[(70.0, StrongPositive), (50.0, Positive), (30.0, Negative)];
const WR52: &[(f64, CellTier)] = &[(80.0, StrongPositive), (60.0, Positive), (40.0, Neutral), (20.0, Negative)];
const MA_EXTENSION: &[(f64, CellTier)] = &[(5.0, StrongPositive), (1.0, Positive), (-1.0, Neutral), (-5.0, Negative)];
/// Period returns have no neutral band either.
const PERIOD: &[(f64, CellTier)] = &[(5.0, StrongPositive), (0.0, Positive), (-5.0, Negative)];

/// First rung the value is strictly above; otherwise the bottom tier.
fn ladder(value: f64, rungs: &[(f64, CellTier)]) -> CellTier {
    rungs
        .iter()
        .find(|&&(threshold, _)| value > threshold)
        .map_or(StrongNegative, |&(_, tier)| tier)
}

impl Column {
    /// Heat-map tier of `value` in this column. Price is never colored.
    pub fn tier(self, value: Option<f64>) -> CellTier {
        let Some(v) = value else {
            return Neutral;
        };
        match self {
            Column::Price => Neutral,
            Column::PctChange | Column::AtrDelta => ladder(v, CHANGE),
            Column::Dcr => ladder(v, DCR),
            Column::Wr52 => ladder(v, WR52),
            Column::MaX => ladder(v, MA_EXTENSION),
            Column::Wtd | Column::Mtd | Column::Ytd => ladder(v, PERIOD),
        }
    }
}
