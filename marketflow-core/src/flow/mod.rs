//! Trend "flow" classifiers.
//!
//! Two independent classifiers map price/moving-average relationships onto a
//! two-character stage label plus a color tier:
//! - short-term (ST): close vs SMA20 and SMA50
//! - long-term (LT): close vs SMA50 and SMA200
//!
//! The digit encodes the stage (1 = transition, 2 = established, 3 = crossing,
//! 4 = extended); the letter encodes the side (A = bearish, B/C = bullish or
//! neutral, R = pullback or reclaim).
//!
//! Each classifier is an ordered table of guarded rules. The first rule whose
//! guard holds decides the state, and the last rule of every table is
//! unconditional, so classification is total over defined inputs. All price
//! comparisons are strict: a close exactly on an average is "below" it.

pub mod long_term;
pub mod short_term;

pub use long_term::{classify_long_term, LongTermInputs};
pub use short_term::{classify_short_term, ShortTermInputs};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stage label. `Unset` is shown as `--` when an input average is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowLabel {
    #[serde(rename = "--")]
    Unset,
    #[serde(rename = "1A")]
    OneA,
    #[serde(rename = "2A")]
    TwoA,
    #[serde(rename = "3A")]
    ThreeA,
    #[serde(rename = "4A")]
    FourA,
    #[serde(rename = "1B")]
    OneB,
    #[serde(rename = "2B")]
    TwoB,
    #[serde(rename = "3B")]
    ThreeB,
    #[serde(rename = "2C")]
    TwoC,
    #[serde(rename = "1R")]
    OneR,
}

impl FlowLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            FlowLabel::Unset => "--",
            FlowLabel::OneA => "1A",
            FlowLabel::TwoA => "2A",
            FlowLabel::ThreeA => "3A",
            FlowLabel::FourA => "4A",
            FlowLabel::OneB => "1B",
            FlowLabel::TwoB => "2B",
            FlowLabel::ThreeB => "3B",
            FlowLabel::TwoC => "2C",
            FlowLabel::OneR => "1R",
        }
    }
}

impl fmt::Display for FlowLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Severity tier used to color a flow badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorTier {
    Neutral,
    StrongestPositive,
    StrongPositive,
    Positive,
    MildPositive,
    Caution,
    CautionNegative,
    Negative,
    SevereNegative,
}

impl ColorTier {
    /// Badge color class understood by the dashboard stylesheet.
    pub fn css_class(self) -> &'static str {
        match self {
            ColorTier::Neutral => "gray",
            ColorTier::StrongestPositive => "bright-green",
            ColorTier::StrongPositive | ColorTier::Positive => "green",
            ColorTier::MildPositive => "light-green",
            ColorTier::Caution => "yellow",
            ColorTier::CautionNegative => "orange",
            ColorTier::Negative => "red",
            ColorTier::SevereNegative => "deep-red",
        }
    }
}

/// Classifier output: a label and its tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlowState {
    pub label: FlowLabel,
    pub tier: ColorTier,
}

impl FlowState {
    pub const UNSET: FlowState = FlowState::new(FlowLabel::Unset, ColorTier::Neutral);

    pub const fn new(label: FlowLabel, tier: ColorTier) -> Self {
        Self { label, tier }
    }

    pub fn is_set(&self) -> bool {
        self.label != FlowLabel::Unset
    }
}

impl Default for FlowState {
    fn default() -> Self {
        Self::UNSET
    }
}

/// One row of a decision table.
pub(crate) struct Rule<I> {
    pub when: fn(&I) -> bool,
    pub state: FlowState,
}

/// Guard that always holds; closes every table.
pub(crate) fn otherwise<I>(_: &I) -> bool {
    true
}

/// Evaluate rules in order; the first matching guard wins.
pub(crate) fn first_match<I>(rules: &[Rule<I>], inputs: &I) -> FlowState {
    rules
        .iter()
        .find(|rule| (rule.when)(inputs))
        .map(|rule| rule.state)
        .unwrap_or(FlowState::UNSET)
}
