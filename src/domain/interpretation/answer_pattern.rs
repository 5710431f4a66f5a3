//! Answer-pattern summary used to personalize interpretations.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Choice;

/// Summary of how a quiz taker answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerPattern {
    pub total: usize,
    pub first_option_ratio: f64,
    pub second_option_ratio: f64,
    /// `First` only when strictly more first options were picked.
    pub dominant_choice: Choice,
    /// Fraction of adjacent answer pairs that repeat the same choice.
    pub consistency: f64,
}

impl AnswerPattern {
    /// Summarizes choices in answer order.
    ///
    /// # Edge Cases
    /// - No choices: all ratios 0, dominant `Second`
    /// - One choice: consistency 0 (no adjacent pairs)
    pub fn from_choices(choices: &[Choice]) -> Self {
        let total = choices.len();
        let first = choices.iter().filter(|c| **c == Choice::First).count();
        let second = total - first;

        let ratio = |count: usize| {
            if total == 0 {
                0.0
            } else {
                count as f64 / total as f64
            }
        };

        let repeats = choices.windows(2).filter(|w| w[0] == w[1]).count();
        let consistency = if total > 1 {
            repeats as f64 / (total - 1) as f64
        } else {
            0.0
        };

        Self {
            total,
            first_option_ratio: ratio(first),
            second_option_ratio: ratio(second),
            dominant_choice: if first > second {
                Choice::First
            } else {
                Choice::Second
            },
            consistency,
        }
    }

    /// Empty summary for callers without an answer history.
    pub fn empty() -> Self {
        Self::from_choices(&[])
    }
}
