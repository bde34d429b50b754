//! Long-term flow: close against SMA50 (fast) and SMA200 (slow).

use super::{first_match, otherwise, ColorTier, FlowLabel, FlowState, Rule};

/// Averages within this percent of each other are treated as crossing.
const CROSS_PCT: f64 = 2.0;
/// Percent below SMA200 that marks an extended decline.
const EXTENDED_BELOW_PCT: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LongTermInputs {
    pub close: f64,
    pub sma50: f64,
    pub sma200: f64,
}

impl LongTermInputs {
    fn above_fast(&self) -> bool {
        self.close > self.sma50
    }

    fn fast_above_slow(&self) -> bool {
        self.sma50 > self.sma200
    }

    fn cross_pct(&self) -> f64 {
        (self.sma50 / self.sma200 - 1.0).abs() * 100.0
    }

    fn crossing(&self) -> bool {
        within_cross(self.cross_pct())
    }

    fn pct_below_slow(&self) -> f64 {
        (self.sma200 - self.close) / self.sma200 * 100.0
    }
}

fn within_cross(cross_pct: f64) -> bool {
    cross_pct < CROSS_PCT
}

fn fresh_bullish_cross(i: &LongTermInputs) -> bool {
    i.fast_above_slow() && i.above_fast() && i.crossing()
}

fn established_uptrend(i: &LongTermInputs) -> bool {
    i.fast_above_slow() && i.above_fast()
}

fn below_bullish_stack(i: &LongTermInputs) -> bool {
    i.fast_above_slow() && !i.above_fast()
}

fn reclaim_near_cross(i: &LongTermInputs) -> bool {
    !i.fast_above_slow() && i.above_fast() && i.crossing()
}

fn reclaim_bearish_stack(i: &LongTermInputs) -> bool {
    !i.fast_above_slow() && i.above_fast()
}

fn extended_below(i: &LongTermInputs) -> bool {
    i.pct_below_slow() > EXTENDED_BELOW_PCT
}

fn bearish_near_cross(i: &LongTermInputs) -> bool {
    i.crossing()
}

// Rows six onward are only reached below SMA50 with a bearish stack.
const RULES: [Rule<LongTermInputs>; 8] = [
    Rule {
        when: fresh_bullish_cross,
        state: FlowState::new(FlowLabel::ThreeB, ColorTier::StrongestPositive),
    },
    Rule {
        when: established_uptrend,
        state: FlowState::new(FlowLabel::TwoC, ColorTier::Positive),
    },
    Rule {
        when: below_bullish_stack,
        state: FlowState::new(FlowLabel::TwoC, ColorTier::Caution),
    },
    Rule {
        when: reclaim_near_cross,
        state: FlowState::new(FlowLabel::ThreeA, ColorTier::CautionNegative),
    },
    Rule {
        when: reclaim_bearish_stack,
        state: FlowState::new(FlowLabel::OneR, ColorTier::CautionNegative),
    },
    Rule {
        when: extended_below,
        state: FlowState::new(FlowLabel::FourA, ColorTier::SevereNegative),
    },
    Rule {
        when: bearish_near_cross,
        state: FlowState::new(FlowLabel::ThreeA, ColorTier::Negative),
    },
    Rule {
        when: otherwise,
        state: FlowState::new(FlowLabel::TwoA, ColorTier::Negative),
    },
];

impl LongTermInputs {
    pub fn classify(&self) -> FlowState {
        first_match(&RULES, self)
    }
}

/// Long-term flow state; unset unless both averages are defined.
pub fn classify_long_term(close: f64, sma50: Option<f64>, sma200: Option<f64>) -> FlowState {
    match (sma50, sma200) {
        (Some(sma50), Some(sma200)) => LongTermInputs {
            close,
            sma50,
            sma200,
        }
        .classify(),
        _ => FlowState::UNSET,
    }
}
