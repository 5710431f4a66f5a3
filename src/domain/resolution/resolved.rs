//! Resolution output types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::StrategyKind;

/// Outcome of resolving a score map under one strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedResult {
    /// Composed result key; `None` for strategies that do not compose one.
    pub result_key: Option<String>,
    pub title: String,
    pub detail: ResolutionDetail,
    pub strategy_kind: StrategyKind,
}

/// Chosen pole of one binary axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisPole {
    pub axis: String,
    pub pole: String,
    pub score: f64,
    pub description: String,
    /// False when the axis is left out of the composed key.
    pub in_key: bool,
}

/// Level of one continuous axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLevel {
    pub axis: String,
    pub score: f64,
    pub level: String,
    pub description: String,
}

/// A selected category with its normalized score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub axis: String,
    pub normalized: f64,
}

/// Strategy-specific detail of a resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ResolutionDetail {
    Poles {
        axes: Vec<AxisPole>,
    },
    Levels {
        axes: Vec<AxisLevel>,
        highest: Option<String>,
        lowest: Option<String>,
    },
    Categories {
        normalized: BTreeMap<String, f64>,
        selected: Vec<CategoryScore>,
        threshold: f64,
    },
}
