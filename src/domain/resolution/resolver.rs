//! Result Resolver - Deterministic mapping from axis scores to a result type.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::{
    AxisDefinition, AxisLevel, AxisPole, BinaryPairsConfig, CategoriesConfig, CategoryScore,
    CombinatorialConfig, ContinuousConfig, GenderTitles, ResolutionDetail, ResolveError,
    ResolvedResult, StrategyConfig, StrategyKind,
};
use crate::domain::foundation::Gender;
use crate::domain::scoring::AxisScoreMap;

/// Title used by the categories strategy when nothing clears the threshold.
pub const NO_DOMINANT_CATEGORY: &str = "No dominant category";

/// Result resolution functions.
///
/// All functions are pure. Gender only selects display titles; the
/// composed key never depends on it.
pub struct ResultResolver;

impl ResultResolver {
    /// Resolves a score map under the given strategy.
    ///
    /// Axes missing from `scores` count as 0. Scored axes the strategy does
    /// not declare are ignored.
    pub fn resolve(
        scores: &AxisScoreMap,
        config: &StrategyConfig,
        gender: Gender,
    ) -> Result<ResolvedResult, ResolveError> {
        match config {
            StrategyConfig::BinaryPairs(c) => Ok(Self::resolve_binary_pairs(scores, c, gender)),
            StrategyConfig::Custom(c) => Self::resolve_combinatorial(scores, c, gender),
            StrategyConfig::Continuous(c) => Ok(Self::resolve_continuous(scores, c)),
            StrategyConfig::Categories(c) => Ok(Self::resolve_categories(scores, c)),
        }
    }

    /// Binary pairs: one pole per declared axis, joined by the separator.
    ///
    /// # Edge Cases
    /// - Score exactly 0: negative pole
    /// - No declared axes: derived from scored ids shaped `A/B`
    pub fn resolve_binary_pairs(
        scores: &AxisScoreMap,
        config: &BinaryPairsConfig,
        gender: Gender,
    ) -> ResolvedResult {
        let axes = if config.axes.is_empty() {
            Self::derive_axes(scores)
        } else {
            config.axes.clone()
        };

        Self::compose_poles(
            scores,
            &axes,
            &config.excluded_axes,
            &config.separator,
            &config.titles,
            gender,
            StrategyKind::BinaryPairs,
        )
    }

    /// Combinatorial four-axis scheme.
    ///
    /// Same pole rule as binary pairs over exactly four axes; the excluded
    /// axes (third axis by default) are kept in the detail but not the key.
    pub fn resolve_combinatorial(
        scores: &AxisScoreMap,
        config: &CombinatorialConfig,
        gender: Gender,
    ) -> Result<ResolvedResult, ResolveError> {
        if config.axes.len() != CombinatorialConfig::AXIS_COUNT {
            return Err(ResolveError::invalid_config(format!(
                "combinatorial strategy needs {} axes, got {}",
                CombinatorialConfig::AXIS_COUNT,
                config.axes.len()
            )));
        }

        Ok(Self::compose_poles(
            scores,
            &config.axes,
            &config.effective_exclusions(),
            &config.separator,
            &config.titles,
            gender,
            StrategyKind::Custom,
        ))
    }

    /// Continuous: label each scored axis by the first matching range.
    ///
    /// No key is composed; the title names the highest and lowest axes.
    pub fn resolve_continuous(scores: &AxisScoreMap, config: &ContinuousConfig) -> ResolvedResult {
        let axes: Vec<AxisLevel> = scores
            .iter()
            .map(|(axis, score)| AxisLevel {
                axis: axis.to_string(),
                score,
                level: config.level_for(score).to_string(),
                description: config
                    .descriptions
                    .get(axis)
                    .cloned()
                    .unwrap_or_else(|| axis.to_string()),
            })
            .collect();

        // First axis wins ties in both directions.
        let mut highest: Option<&AxisLevel> = None;
        let mut lowest: Option<&AxisLevel> = None;
        for level in &axes {
            if highest.map_or(true, |h| level.score > h.score) {
                highest = Some(level);
            }
            if lowest.map_or(true, |l| level.score < l.score) {
                lowest = Some(level);
            }
        }

        let title = match (highest, lowest) {
            (Some(h), Some(l)) => format!(
                "Highest trait: {}, lowest trait: {}",
                h.description, l.description
            ),
            _ => "No scored traits".to_string(),
        };
        let highest = highest.map(|h| h.axis.clone());
        let lowest = lowest.map(|l| l.axis.clone());

        ResolvedResult {
            result_key: None,
            title,
            detail: ResolutionDetail::Levels {
                axes,
                highest,
                lowest,
            },
            strategy_kind: StrategyKind::Continuous,
        }
    }

    /// Categories: normalized absolute scores above a threshold.
    ///
    /// # Algorithm
    /// normalized(axis) = |score| / Σ|score| (all 0 when Σ is 0), keep
    /// normalized ≥ threshold, sort descending (ties by axis id), truncate
    /// to `max_categories`.
    pub fn resolve_categories(scores: &AxisScoreMap, config: &CategoriesConfig) -> ResolvedResult {
        let total: f64 = scores.iter().map(|(_, s)| s.abs()).sum();

        let normalized: BTreeMap<String, f64> = scores
            .iter()
            .map(|(axis, score)| {
                let value = if total > 0.0 { score.abs() / total } else { 0.0 };
                (axis.to_string(), value)
            })
            .collect();

        let mut selected: Vec<CategoryScore> = normalized
            .iter()
            .filter(|(_, value)| **value >= config.threshold)
            .map(|(axis, value)| CategoryScore {
                axis: axis.clone(),
                normalized: *value,
            })
            .collect();
        selected.sort_by(|a, b| {
            b.normalized
                .partial_cmp(&a.normalized)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.axis.cmp(&b.axis))
        });
        selected.truncate(config.max_categories);

        let (result_key, title) = if selected.is_empty() {
            (None, NO_DOMINANT_CATEGORY.to_string())
        } else {
            let ids: Vec<&str> = selected.iter().map(|c| c.axis.as_str()).collect();
            (Some(ids.join("-")), ids.join(", "))
        };

        ResolvedResult {
            result_key,
            title,
            detail: ResolutionDetail::Categories {
                normalized,
                selected,
                threshold: config.threshold,
            },
            strategy_kind: StrategyKind::Categories,
        }
    }

    fn compose_poles(
        scores: &AxisScoreMap,
        axes: &[AxisDefinition],
        excluded: &[String],
        separator: &str,
        titles: &GenderTitles,
        gender: Gender,
        kind: StrategyKind,
    ) -> ResolvedResult {
        let poles: Vec<AxisPole> = axes
            .iter()
            .map(|def| {
                let score = scores.get_or_zero(&def.axis);
                let pole = def.pole_for(score).to_string();
                let description = def
                    .descriptions
                    .get(&pole)
                    .cloned()
                    .unwrap_or_else(|| pole.clone());
                AxisPole {
                    axis: def.axis.clone(),
                    in_key: !excluded.contains(&def.axis),
                    pole,
                    score,
                    description,
                }
            })
            .collect();

        let key = poles
            .iter()
            .filter(|p| p.in_key)
            .map(|p| p.pole.as_str())
            .collect::<Vec<_>>()
            .join(separator);
        let title = titles
            .get(gender, &key)
            .map(str::to_string)
            .unwrap_or_else(|| key.clone());

        ResolvedResult {
            result_key: Some(key),
            title,
            detail: ResolutionDetail::Poles { axes: poles },
            strategy_kind: kind,
        }
    }

    fn derive_axes(scores: &AxisScoreMap) -> Vec<AxisDefinition> {
        scores
            .iter()
            .filter_map(|(axis, _)| {
                let (positive, negative) = axis.split_once('/')?;
                if positive.is_empty() || negative.is_empty() || negative.contains('/') {
                    return None;
                }
                Some(AxisDefinition::new(axis, positive, negative))
            })
            .collect()
    }
}
