//! Two-option answer choice.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Which of the two offered options was picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Choice {
    First,
    Second,
}

impl Choice {
    /// Returns 1 or 2.
    pub fn as_number(&self) -> u8 {
        match self {
            Choice::First => 1,
            Choice::Second => 2,
        }
    }

    /// Signed axis weight of this choice: +1 for the first option, -1 for the second.
    pub fn axis_weight(&self) -> f64 {
        match self {
            Choice::First => 1.0,
            Choice::Second => -1.0,
        }
    }
}

impl TryFrom<u8> for Choice {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Choice::First),
            2 => Ok(Choice::Second),
            other => Err(ValidationError::out_of_range("answer", 1, 2, other as i32)),
        }
    }
}

impl From<Choice> for u8 {
    fn from(choice: Choice) -> Self {
        choice.as_number()
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_number())
    }
}
