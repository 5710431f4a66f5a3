//! Scoring Module - Aggregates answers into per-axis scores.
//!
//! # Components
//!
//! - `Answer` - One answer contributing a signed weight to one axis
//! - `OptionWeights` - Authored axis weights of a static-quiz option
//! - `AxisScoreMap` - Sum of weights per axis
//! - `AxisScorer` - Pure reduction from answers to an `AxisScoreMap`

mod answer;
mod axis_scorer;
mod option_weights;

pub use answer::Answer;
pub use axis_scorer::{AxisScoreMap, AxisScorer};
pub use option_weights::{AxisWeight, OptionSelection, OptionWeights};
