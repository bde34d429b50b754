//! Short-term flow: close against SMA20 (fast) and SMA50 (slow).

use super::{first_match, otherwise, ColorTier, FlowLabel, FlowState, Rule};

/// Close within this fraction of both averages counts as "hugging" them.
const NEAR_BAND: f64 = 0.01;
/// Percent below the fast average that marks an extended decline.
const EXTENDED_BELOW_PCT: f64 = 10.0;
/// Percent below the fast average that marks a decline.
const BELOW_PCT: f64 = 5.0;
/// Percent gap between the slow and fast averages that marks a widening stack.
const STACK_GAP_PCT: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShortTermInputs {
    pub close: f64,
    pub sma20: f64,
    pub sma50: f64,
}

impl ShortTermInputs {
    fn above_fast(&self) -> bool {
        self.close > self.sma20
    }

    fn fast_above_slow(&self) -> bool {
        self.sma20 > self.sma50
    }

    fn near_both(&self) -> bool {
        within_near_band((self.close / self.sma20 - 1.0).abs())
            && within_near_band((self.close / self.sma50 - 1.0).abs())
    }

    fn pct_below_fast(&self) -> f64 {
        (self.sma20 - self.close) / self.sma20 * 100.0
    }

    fn pct_stack_gap(&self) -> f64 {
        (self.sma50 - self.sma20) / self.sma50 * 100.0
    }
}

fn within_near_band(deviation: f64) -> bool {
    deviation < NEAR_BAND
}

fn near_both(i: &ShortTermInputs) -> bool {
    i.near_both()
}

fn above_rising_stack(i: &ShortTermInputs) -> bool {
    i.above_fast() && i.fast_above_slow()
}

fn reclaiming_bearish_stack(i: &ShortTermInputs) -> bool {
    i.above_fast() && !i.fast_above_slow()
}

fn pullback_in_bullish_stack(i: &ShortTermInputs) -> bool {
    !i.above_fast() && i.fast_above_slow()
}

fn extended_below(i: &ShortTermInputs) -> bool {
    i.pct_below_fast() > EXTENDED_BELOW_PCT
}

fn below(i: &ShortTermInputs) -> bool {
    i.pct_below_fast() > BELOW_PCT
}

fn widening_stack(i: &ShortTermInputs) -> bool {
    i.pct_stack_gap() > STACK_GAP_PCT
}

// Rows five onward are only reached below both averages with a bearish stack.
const RULES: [Rule<ShortTermInputs>; 8] = [
    Rule {
        when: near_both,
        state: FlowState::new(FlowLabel::TwoC, ColorTier::Neutral),
    },
    Rule {
        when: above_rising_stack,
        state: FlowState::new(FlowLabel::TwoB, ColorTier::StrongPositive),
    },
    Rule {
        when: reclaiming_bearish_stack,
        state: FlowState::new(FlowLabel::OneB, ColorTier::MildPositive),
    },
    Rule {
        when: pullback_in_bullish_stack,
        state: FlowState::new(FlowLabel::OneR, ColorTier::Caution),
    },
    Rule {
        when: extended_below,
        state: FlowState::new(FlowLabel::FourA, ColorTier::SevereNegative),
    },
    Rule {
        when: below,
        state: FlowState::new(FlowLabel::ThreeA, ColorTier::Negative),
    },
    Rule {
        when: widening_stack,
        state: FlowState::new(FlowLabel::TwoA, ColorTier::CautionNegative),
    },
    Rule {
        when: otherwise,
        state: FlowState::new(FlowLabel::OneA, ColorTier::CautionNegative),
    },
];

impl ShortTermInputs {
    pub fn classify(&self) -> FlowState {
        first_match(&RULES, self)
    }
}

/// Short-term flow state; unset unless both averages are defined.
pub fn classify_short_term(close: f64, sma20: Option<f64>, sma50: Option<f64>) -> FlowState {
    match (sma20, sma50) {
        (Some(sma20), Some(sma50)) => ShortTermInputs {
            close,
            sma20,
            sma50,
        }
        .classify(),
        _ => FlowState::UNSET,
    }
}
