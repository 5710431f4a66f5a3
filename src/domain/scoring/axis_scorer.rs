//! Axis Scorer - Reduces answers into per-axis score totals.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Answer;
use crate::domain::foundation::ValidationError;

/// Per-axis score totals.
///
/// An axis that received no answers is absent; every consumer reads it as 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AxisScoreMap(BTreeMap<String, f64>);

impl AxisScoreMap {
    /// Creates an empty score map.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builds a score map from explicit (axis, score) pairs.
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        Self(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Returns the score of an axis, if it was scored.
    pub fn get(&self, axis: &str) -> Option<f64> {
        self.0.get(axis).copied()
    }

    /// Returns the score of an axis, treating a missing axis as 0.
    pub fn get_or_zero(&self, axis: &str) -> f64 {
        self.get(axis).unwrap_or(0.0)
    }

    /// Iterates scored axes in axis-id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Returns the number of scored axes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no axis was scored.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the inner map.
    pub fn as_map(&self) -> &BTreeMap<String, f64> {
        &self.0
    }
}

/// Answer aggregation.
pub struct AxisScorer;

impl AxisScorer {
    /// Sums answer weights per axis.
    ///
    /// # Algorithm
    /// For each axis: score = Σ(weight of answers tagged with that axis)
    ///
    /// Contributions to one axis are summed in ascending value order, so the
    /// result is bit-identical for every permutation of `answers`.
    ///
    /// # Edge Cases
    /// - Empty answer set: `ValidationError` (a quiz always has answers)
    /// - Blank axis id: `ValidationError`
    /// - Non-finite weight: `ValidationError`
    /// - Axes not known to any strategy are kept; the resolver ignores them
    pub fn score(answers: &[Answer]) -> Result<AxisScoreMap, ValidationError> {
        if answers.is_empty() {
            return Err(ValidationError::empty_field("answers"));
        }

        let mut contributions: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        for answer in answers {
            if answer.axis.trim().is_empty() {
                return Err(ValidationError::empty_field("axis"));
            }
            if !answer.weight.is_finite() {
                return Err(ValidationError::invalid_format(
                    "weight",
                    format!("non-finite weight for axis '{}'", answer.axis),
                ));
            }
            contributions
                .entry(answer.axis.as_str())
                .or_default()
                .push(answer.weight);
        }

        let scores = contributions
            .into_iter()
            .map(|(axis, mut weights)| {
                weights.sort_by(|a, b| a.total_cmp(b));
                (axis.to_string(), weights.into_iter().sum::<f64>())
            })
            .collect();

        Ok(AxisScoreMap(scores))
    }
}
