//! Scoring and resolution behaviour across strategies.

use persona_lens::domain::foundation::Gender;
use persona_lens::domain::resolution::{
    AxisDefinition, BinaryPairsConfig, CategoriesConfig, CombinatorialConfig, GenderTitles,
    ResolutionDetail, ResultResolver, StrategyConfig,
};
use persona_lens::domain::scoring::{Answer, AxisScoreMap, AxisScorer};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const AXES: [&str; 4] = ["E/I", "S/N", "T/F", "J/P"];

fn mbti() -> StrategyConfig {
    StrategyConfig::BinaryPairs(BinaryPairsConfig {
        axes: vec![
            AxisDefinition::new("E/I", "E", "I"),
            AxisDefinition::new("S/N", "S", "N"),
            AxisDefinition::new("T/F", "T", "F"),
            AxisDefinition::new("J/P", "J", "P"),
        ],
        titles: GenderTitles::default()
            .with_title(Gender::Male, "E-N-F-J", "The Protagonist")
            .with_title(Gender::Female, "E-N-F-J", "The Giver"),
        ..BinaryPairsConfig::default()
    })
}

fn egen() -> StrategyConfig {
    StrategyConfig::Custom(CombinatorialConfig::new(vec![
        AxisDefinition::new("AC_RF", "AC", "RF"),
        AxisDefinition::new("EG_TT", "EG", "TT"),
        AxisDefinition::new("EX_IN", "EX", "IN"),
        AxisDefinition::new("PL_FL", "PL", "FL"),
    ]))
}

fn answer(i: usize, axis: &str, weight: f64) -> Answer {
    Answer::new(format!("q{i}"), "opt", axis, weight)
}

fn arb_axis() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just(AXES[0]),
        Just(AXES[1]),
        Just(AXES[2]),
        Just(AXES[3]),
    ]
}

fn arb_answers() -> impl Strategy<Value = Vec<Answer>> {
    prop::collection::vec((arb_axis(), -3i32..=3), 1..40).prop_map(|items| {
        items
            .into_iter()
            .enumerate()
            .map(|(i, (axis, w))| answer(i, axis, f64::from(w) * 0.5))
            .collect()
    })
}

fn arb_scores() -> impl Strategy<Value = AxisScoreMap> {
    prop::collection::vec(-10.0f64..10.0, 4).prop_map(|values| {
        AxisScoreMap::from_pairs(AXES.iter().copied().zip(values))
    })
}

fn arb_gender() -> impl Strategy<Value = Gender> {
    prop_oneof![Just(Gender::Male), Just(Gender::Female)]
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn binary_pairs_scores_resolve_to_enfj() {
    let scores = AxisScoreMap::from_pairs([("E/I", 2.0), ("S/N", -1.0), ("T/F", 0.0), ("J/P", 1.0)]);

    let result = ResultResolver::resolve(&scores, &mbti(), Gender::Male).unwrap();

    assert_eq!(result.result_key.as_deref(), Some("E-N-F-J"));
    assert_eq!(result.title, "The Protagonist");
}

#[test]
fn answers_flow_through_scorer_into_resolver() {
    let answers = vec![
        answer(1, "E/I", 1.0),
        answer(2, "E/I", 1.0),
        answer(3, "S/N", -1.0),
        answer(4, "J/P", 1.0),
        answer(5, "T/F", 1.0),
        answer(6, "T/F", -1.0),
    ];

    let scores = AxisScorer::score(&answers).unwrap();
    let result = ResultResolver::resolve(&scores, &mbti(), Gender::Female).unwrap();

    assert_eq!(scores.get("T/F"), Some(0.0));
    assert_eq!(result.result_key.as_deref(), Some("E-N-F-J"));
    assert_eq!(result.title, "The Giver");
}

#[test]
fn categories_normalize_and_keep_two_above_threshold() {
    let scores = AxisScoreMap::from_pairs([("a", 4.0), ("b", 3.0), ("c", 1.0)]);
    let config = StrategyConfig::Categories(CategoriesConfig::new(0.3, 2));

    let result = ResultResolver::resolve(&scores, &config, Gender::Male).unwrap();

    match result.detail {
        ResolutionDetail::Categories {
            normalized,
            selected,
            ..
        } => {
            assert_eq!(normalized.get("a"), Some(&0.5));
            assert_eq!(normalized.get("b"), Some(&0.375));
            assert_eq!(normalized.get("c"), Some(&0.125));
            let picked: Vec<&str> = selected.iter().map(|c| c.axis.as_str()).collect();
            assert_eq!(picked, vec!["a", "b"]);
        }
        other => panic!("expected categories detail, got {:?}", other),
    }
}

#[test]
fn custom_strategy_leaves_third_axis_out_of_key() {
    let scores = AxisScoreMap::from_pairs([
        ("AC_RF", 2.0),
        ("EG_TT", -1.0),
        ("EX_IN", 5.0),
        ("PL_FL", 0.0),
    ]);

    let result = ResultResolver::resolve(&scores, &egen(), Gender::Female).unwrap();

    assert_eq!(result.result_key.as_deref(), Some("AC-TT-FL"));
    match result.detail {
        ResolutionDetail::Poles { axes } => {
            let third = axes.iter().find(|p| p.axis == "EX_IN").unwrap();
            assert_eq!(third.pole, "EX");
            assert!(!third.in_key);
        }
        other => panic!("expected poles detail, got {:?}", other),
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn scorer_ignores_answer_order(
        (answers, reordered) in arb_answers()
            .prop_flat_map(|a| (Just(a.clone()), Just(a).prop_shuffle()))
    ) {
        prop_assert_eq!(
            AxisScorer::score(&answers).unwrap(),
            AxisScorer::score(&reordered).unwrap()
        );
    }

    #[test]
    fn scorer_is_repeatable(answers in arb_answers()) {
        prop_assert_eq!(
            AxisScorer::score(&answers).unwrap(),
            AxisScorer::score(&answers).unwrap()
        );
    }

    #[test]
    fn resolver_is_deterministic(scores in arb_scores(), gender in arb_gender()) {
        let first = ResultResolver::resolve(&scores, &mbti(), gender).unwrap();
        let second = ResultResolver::resolve(&scores, &mbti(), gender).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn gender_never_changes_the_key(scores in arb_scores()) {
        for config in [mbti(), egen()] {
            let male = ResultResolver::resolve(&scores, &config, Gender::Male).unwrap();
            let female = ResultResolver::resolve(&scores, &config, Gender::Female).unwrap();
            prop_assert_eq!(male.result_key, female.result_key);
        }
    }

    #[test]
    fn non_positive_scores_pick_the_negative_pole(values in prop::collection::vec(-10.0f64..=0.0, 4)) {
        let scores = AxisScoreMap::from_pairs(AXES.iter().copied().zip(values));
        let result = ResultResolver::resolve(&scores, &mbti(), Gender::Male).unwrap();
        prop_assert_eq!(result.result_key.as_deref(), Some("I-N-F-P"));
    }

    #[test]
    fn selected_categories_stay_within_bounds(
        values in prop::collection::vec(-10.0f64..10.0, 1..8),
        threshold in 0.0f64..1.0,
        max in 1usize..5,
    ) {
        let scores = AxisScoreMap::from_pairs(
            values.iter().enumerate().map(|(i, v)| (format!("c{i}"), *v)),
        );
        let config = StrategyConfig::Categories(CategoriesConfig::new(threshold, max));

        let result = ResultResolver::resolve(&scores, &config, Gender::Male).unwrap();

        match result.detail {
            ResolutionDetail::Categories { selected, .. } => {
                prop_assert!(selected.len() <= max);
                let total: f64 = selected.iter().map(|c| c.normalized).sum();
                prop_assert!(total <= 1.0 + 1e-9);
                prop_assert!(selected.iter().all(|c| c.normalized >= threshold));
                prop_assert!(selected.windows(2).all(|w| w[0].normalized >= w[1].normalized));
            }
            other => prop_assert!(false, "expected categories detail, got {:?}", other),
        }
    }
}
