//! Authored option weights for static quizzes.

use serde::{Deserialize, Serialize};

use super::Answer;

/// One axis an option contributes to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisWeight {
    pub axis: String,
    pub weight: f64,
}

impl AxisWeight {
    pub fn new(axis: impl Into<String>, weight: f64) -> Self {
        Self {
            axis: axis.into(),
            weight,
        }
    }
}

/// The axis weights declared for one option of one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionWeights {
    pub question_id: String,
    pub option_id: String,
    pub weights: Vec<AxisWeight>,
}

impl OptionWeights {
    /// Expands the option into one `Answer` per weighted axis.
    pub fn expand(&self) -> Vec<Answer> {
        self.weights
            .iter()
            .map(|w| Answer::new(&self.question_id, &self.option_id, &w.axis, w.weight))
            .collect()
    }
}

/// A quiz taker's pick for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSelection {
    pub question_id: String,
    pub option_id: String,
}

impl OptionSelection {
    pub fn new(question_id: impl Into<String>, option_id: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            option_id: option_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_yields_one_answer_per_axis() {
        let option = OptionWeights {
            question_id: "q1".to_string(),
            option_id: "q1-a".to_string(),
            weights: vec![AxisWeight::new("E/I", 1.0), AxisWeight::new("J/P", -0.5)],
        };

        let answers = option.expand();
        assert_eq!(answers.len(), 2);
        assert_eq!(answers[1], Answer::new("q1", "q1-a", "J/P", -0.5));
    }

    #[test]
    fn expand_of_unweighted_option_is_empty() {
        let option = OptionWeights {
            question_id: "q1".to_string(),
            option_id: "q1-b".to_string(),
            weights: vec![],
        };
        assert!(option.expand().is_empty());
    }
}
