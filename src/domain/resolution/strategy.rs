//! Strategy configuration - one typed payload per resolution strategy.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::ResolveError;
use crate::domain::foundation::Gender;

/// Label of an unmatched continuous score.
pub const UNKNOWN_LEVEL: &str = "unknown";

/// Default key separator for pole-composed keys.
pub const DEFAULT_SEPARATOR: &str = "-";

/// Strategy kinds, as written in the `kind` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    BinaryPairs,
    Continuous,
    Categories,
    Custom,
}

impl StrategyKind {
    /// Returns the wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::BinaryPairs => "binary_pairs",
            StrategyKind::Continuous => "continuous",
            StrategyKind::Categories => "categories",
            StrategyKind::Custom => "custom",
        }
    }

    /// Parses a wire name, rejecting unknown kinds.
    pub fn parse(kind: &str) -> Result<Self, ResolveError> {
        match kind {
            "binary_pairs" => Ok(StrategyKind::BinaryPairs),
            "continuous" => Ok(StrategyKind::Continuous),
            "categories" => Ok(StrategyKind::Categories),
            "custom" => Ok(StrategyKind::Custom),
            other => Err(ResolveError::StrategyNotSupported(other.to_string())),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolution strategy with its configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrategyConfig {
    BinaryPairs(BinaryPairsConfig),
    Continuous(ContinuousConfig),
    Categories(CategoriesConfig),
    Custom(CombinatorialConfig),
}

impl StrategyConfig {
    /// Parses a strategy document.
    ///
    /// The `kind` tag is checked first so that an unrecognized kind is
    /// reported as `StrategyNotSupported` instead of a generic shape error.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ResolveError> {
        let kind = value
            .get("kind")
            .and_then(|k| k.as_str())
            .ok_or_else(|| ResolveError::invalid_config("missing strategy kind"))?;
        StrategyKind::parse(kind)?;

        serde_json::from_value(value).map_err(|e| ResolveError::invalid_config(e.to_string()))
    }

    /// Parses a strategy document from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ResolveError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| ResolveError::invalid_config(e.to_string()))?;
        Self::from_value(value)
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            StrategyConfig::BinaryPairs(_) => StrategyKind::BinaryPairs,
            StrategyConfig::Continuous(_) => StrategyKind::Continuous,
            StrategyConfig::Categories(_) => StrategyKind::Categories,
            StrategyConfig::Custom(_) => StrategyKind::Custom,
        }
    }
}

/// One binary axis with its two pole labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisDefinition {
    pub axis: String,
    pub positive: String,
    pub negative: String,
    /// Optional description per pole label.
    #[serde(default)]
    pub descriptions: HashMap<String, String>,
}

impl AxisDefinition {
    pub fn new(
        axis: impl Into<String>,
        positive: impl Into<String>,
        negative: impl Into<String>,
    ) -> Self {
        Self {
            axis: axis.into(),
            positive: positive.into(),
            negative: negative.into(),
            descriptions: HashMap::new(),
        }
    }

    /// Adds a description for a pole label.
    pub fn with_description(mut self, pole: impl Into<String>, text: impl Into<String>) -> Self {
        self.descriptions.insert(pole.into(), text.into());
        self
    }

    /// Picks a pole: positive when score > 0, negative otherwise.
    pub fn pole_for(&self, score: f64) -> &str {
        if score > 0.0 {
            &self.positive
        } else {
            &self.negative
        }
    }
}

/// Gender-keyed display titles for composed keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenderTitles {
    #[serde(default)]
    pub male: HashMap<String, String>,
    #[serde(default)]
    pub female: HashMap<String, String>,
}

impl GenderTitles {
    /// Looks up the title of a key for a gender.
    pub fn get(&self, gender: Gender, key: &str) -> Option<&str> {
        let table = match gender {
            Gender::Male => &self.male,
            Gender::Female => &self.female,
        };
        table.get(key).map(String::as_str)
    }

    /// Adds a title.
    pub fn with_title(mut self, gender: Gender, key: impl Into<String>, title: impl Into<String>) -> Self {
        let table = match gender {
            Gender::Male => &mut self.male,
            Gender::Female => &mut self.female,
        };
        table.insert(key.into(), title.into());
        self
    }
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

/// Binary-pair (MBTI style) configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryPairsConfig {
    /// Declared axes in key order. When empty, axes are derived from
    /// scored axis ids shaped `A/B`.
    #[serde(default)]
    pub axes: Vec<AxisDefinition>,
    #[serde(default)]
    pub excluded_axes: Vec<String>,
    #[serde(default = "default_separator")]
    pub separator: String,
    #[serde(default)]
    pub titles: GenderTitles,
}

impl Default for BinaryPairsConfig {
    fn default() -> Self {
        Self {
            axes: Vec::new(),
            excluded_axes: Vec::new(),
            separator: default_separator(),
            titles: GenderTitles::default(),
        }
    }
}

/// Combinatorial four-axis configuration.
///
/// When `excluded_axes` is absent the third declared axis is left out of
/// the key, giving three poles and eight keys per gender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinatorialConfig {
    pub axes: Vec<AxisDefinition>,
    #[serde(default)]
    pub excluded_axes: Option<Vec<String>>,
    #[serde(default = "default_separator")]
    pub separator: String,
    #[serde(default)]
    pub titles: GenderTitles,
}

impl CombinatorialConfig {
    /// Number of axes the scheme requires.
    pub const AXIS_COUNT: usize = 4;

    /// Index of the axis excluded from keys by default.
    pub const DEFAULT_EXCLUDED_INDEX: usize = 2;

    pub fn new(axes: Vec<AxisDefinition>) -> Self {
        Self {
            axes,
            excluded_axes: None,
            separator: default_separator(),
            titles: GenderTitles::default(),
        }
    }

    /// Returns the axis ids left out of the composed key.
    pub fn effective_exclusions(&self) -> Vec<String> {
        match &self.excluded_axes {
            Some(excluded) => excluded.clone(),
            None => self
                .axes
                .get(Self::DEFAULT_EXCLUDED_INDEX)
                .map(|a| vec![a.axis.clone()])
                .unwrap_or_default(),
        }
    }
}

/// Inclusive score bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeBucket {
    pub min: f64,
    pub max: f64,
    pub label: String,
}

impl RangeBucket {
    pub fn new(min: f64, max: f64, label: impl Into<String>) -> Self {
        Self {
            min,
            max,
            label: label.into(),
        }
    }

    pub fn contains(&self, score: f64) -> bool {
        self.min <= score && score <= self.max
    }
}

fn default_ranges() -> Vec<RangeBucket> {
    vec![
        RangeBucket::new(0.0, 30.0, "low"),
        RangeBucket::new(31.0, 70.0, "medium"),
        RangeBucket::new(71.0, 100.0, "high"),
    ]
}

/// Continuous (Big Five style) configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinuousConfig {
    #[serde(default = "default_ranges")]
    pub ranges: Vec<RangeBucket>,
    /// Display description per axis; the axis id is used when absent.
    #[serde(default)]
    pub descriptions: HashMap<String, String>,
}

impl Default for ContinuousConfig {
    fn default() -> Self {
        Self {
            ranges: default_ranges(),
            descriptions: HashMap::new(),
        }
    }
}

impl ContinuousConfig {
    /// Returns the label of the first bucket containing the score.
    pub fn level_for(&self, score: f64) -> &str {
        self.ranges
            .iter()
            .find(|r| r.contains(score))
            .map(|r| r.label.as_str())
            .unwrap_or(UNKNOWN_LEVEL)
    }
}

fn default_threshold() -> f64 {
    0.6
}

fn default_max_categories() -> usize {
    2
}

/// Category threshold configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoriesConfig {
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_max_categories")]
    pub max_categories: usize,
}

impl Default for CategoriesConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            max_categories: default_max_categories(),
        }
    }
}

impl CategoriesConfig {
    pub fn new(threshold: f64, max_categories: usize) -> Self {
        Self {
            threshold,
            max_categories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_binary_pairs_with_defaults() {
        let config = StrategyConfig::from_json(
            r#"{"kind":"binary_pairs","axes":[{"axis":"E/I","positive":"E","negative":"I"}]}"#,
        )
        .unwrap();

        match config {
            StrategyConfig::BinaryPairs(c) => {
                assert_eq!(c.axes.len(), 1);
                assert_eq!(c.separator, "-");
                assert!(c.excluded_axes.is_empty());
            }
            other => panic!("unexpected strategy: {:?}", other),
        }
    }

    #[test]
    fn unknown_kind_is_not_supported() {
        let err = StrategyConfig::from_json(r#"{"kind":"astrology"}"#).unwrap_err();
        assert_eq!(err, ResolveError::StrategyNotSupported("astrology".to_string()));
    }

    #[test]
    fn missing_kind_is_invalid() {
        let err = StrategyConfig::from_json(r#"{"threshold":0.5}"#).unwrap_err();
        assert!(matches!(err, ResolveError::InvalidConfig(_)));
    }

    #[test]
    fn continuous_uses_default_ranges() {
        let config = StrategyConfig::from_json(r#"{"kind":"continuous"}"#).unwrap();
        match config {
            StrategyConfig::Continuous(c) => {
                assert_eq!(c.level_for(0.0), "low");
                assert_eq!(c.level_for(30.0), "low");
                assert_eq!(c.level_for(31.0), "medium");
                assert_eq!(c.level_for(100.0), "high");
                assert_eq!(c.level_for(30.5), UNKNOWN_LEVEL);
                assert_eq!(c.level_for(-4.0), UNKNOWN_LEVEL);
            }
            other => panic!("unexpected strategy: {:?}", other),
        }
    }

    #[test]
    fn categories_uses_default_threshold_and_max() {
        let config = StrategyConfig::from_json(r#"{"kind":"categories"}"#).unwrap();
        assert_eq!(config, StrategyConfig::Categories(CategoriesConfig::new(0.6, 2)));
    }

    #[test]
    fn combinatorial_excludes_third_axis_by_default() {
        let config = CombinatorialConfig::new(vec![
            AxisDefinition::new("AC_RF", "AC", "RF"),
            AxisDefinition::new("EG_TT", "EG", "TT"),
            AxisDefinition::new("EX_RV", "EX", "RV"),
            AxisDefinition::new("PL_FL", "PL", "FL"),
        ]);
        assert_eq!(config.effective_exclusions(), vec!["EX_RV".to_string()]);
    }

    #[test]
    fn zero_score_picks_negative_pole() {
        let axis = AxisDefinition::new("T/F", "T", "F");
        assert_eq!(axis.pole_for(0.0), "F");
        assert_eq!(axis.pole_for(0.01), "T");
        assert_eq!(axis.pole_for(-3.0), "F");
    }

    #[test]
    fn kind_round_trips_through_wire_name() {
        for kind in [
            StrategyKind::BinaryPairs,
            StrategyKind::Continuous,
            StrategyKind::Categories,
            StrategyKind::Custom,
        ] {
            assert_eq!(StrategyKind::parse(kind.as_str()), Ok(kind));
        }
    }
}
