//! Market breadth across one universe section.
//!
//! Aggregates the daily percent change of every instrument that has a record:
//! advancer/decliner shares, STICK (sum of changes) and STRIN (average gain
//! over average loss).

use crate::config::BreadthConfig;
use crate::universe::Section;
use marketflow_core::IndicatorRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Average loss used when nothing declined, keeping STRIN finite.
const STRIN_FLOOR: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreadthLabel {
    Strong,
    Neutral,
    Weak,
}

impl BreadthLabel {
    pub fn title(self) -> &'static str {
        match self {
            BreadthLabel::Strong => "STRONG BREADTH",
            BreadthLabel::Neutral => "NEUTRAL",
            BreadthLabel::Weak => "WEAK BREADTH",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breadth {
    /// Instruments that contributed a change.
    pub count: usize,
    pub advancers: usize,
    pub decliners: usize,
    pub adv_pct: f64,
    pub decl_pct: f64,
    /// Sum of percent changes.
    pub stick: f64,
    /// Mean gain of advancers over mean absolute loss of decliners.
    pub strin: f64,
    pub label: BreadthLabel,
}

impl Breadth {
    /// Aggregate a set of percent changes. `None` when the set is empty.
    pub fn from_changes<I>(changes: I, config: &BreadthConfig) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut count = 0usize;
        let mut stick = 0.0;
        let (mut gains, mut losses) = (Vec::new(), Vec::new());

        for change in changes {
            count += 1;
            stick += change;
            if change > 0.0 {
                gains.push(change);
            } else if change < 0.0 {
                losses.push(change.abs());
            }
        }

        if count == 0 {
            return None;
        }

        let adv_pct = gains.len() as f64 * 100.0 / count as f64;
        let decl_pct = losses.len() as f64 * 100.0 / count as f64;
        let avg_gain = mean(&gains).unwrap_or(0.0);
        let avg_loss = mean(&losses).unwrap_or(STRIN_FLOOR);

        let label = if adv_pct > config.strong_above {
            BreadthLabel::Strong
        } else if adv_pct < config.weak_below {
            BreadthLabel::Weak
        } else {
            BreadthLabel::Neutral
        };

        Some(Self {
            count,
            advancers: gains.len(),
            decliners: losses.len(),
            adv_pct,
            decl_pct,
            stick,
            strin: avg_gain / avg_loss,
            label,
        })
    }

    /// Breadth of one section; instruments without a record are ignored.
    pub fn for_section(
        records: &BTreeMap<String, Option<IndicatorRecord>>,
        section: &Section,
        config: &BreadthConfig,
    ) -> Option<Self> {
        let changes = section
            .symbols()
            .filter_map(|sym| records.get(sym).copied().flatten())
            .map(|rec| rec.pct_change);
        Self::from_changes(changes, config)
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
}
