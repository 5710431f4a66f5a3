//! Answer value object.

use serde::{Deserialize, Serialize};

/// One answer's contribution to one axis.
///
/// A question option may weight several axes; such an option expands into
/// one `Answer` per axis it touches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: String,
    pub option_id: String,
    pub axis: String,
    pub weight: f64,
}

impl Answer {
    /// Creates a new answer.
    pub fn new(
        question_id: impl Into<String>,
        option_id: impl Into<String>,
        axis: impl Into<String>,
        weight: f64,
    ) -> Self {
        Self {
            question_id: question_id.into(),
            option_id: option_id.into(),
            axis: axis.into(),
            weight,
        }
    }
}
