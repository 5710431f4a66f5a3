//! Adaptive themes - how questions are generated for one analysis.

use serde::{Deserialize, Serialize};

use super::QuestionDraft;
use crate::domain::foundation::{AnalysisId, Choice, Gender};

fn default_temperature() -> f32 {
    0.9
}

fn default_max_tokens() -> u32 {
    400
}

/// An axis the generator must cover, with what each option leans toward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeAxis {
    pub axis: String,
    pub first_option_leaning: String,
    pub second_option_leaning: String,
}

/// Prompting material for an adaptive analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveTheme {
    pub analysis_id: AnalysisId,
    /// Display name, e.g. "Egen/Teto personality analysis".
    pub name: String,
    pub system_prompt: String,
    /// Extra requirements appended to every question prompt.
    #[serde(default)]
    pub guidance: Vec<String>,
    #[serde(default)]
    pub axes: Vec<ThemeAxis>,
    #[serde(default)]
    pub example: Option<QuestionDraft>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

/// A prior answer passed to the generator as context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerContext {
    pub index: u32,
    pub question: String,
    pub chosen: String,
    pub choice: Choice,
    pub category: Option<String>,
}

impl AdaptiveTheme {
    /// Axis ids a draft may be tagged with.
    pub fn axis_ids(&self) -> Vec<String> {
        self.axes.iter().map(|a| a.axis.clone()).collect()
    }

    /// Builds the prompt for question `index` of `total`.
    pub fn question_prompt(
        &self,
        index: u32,
        total: u32,
        gender: Gender,
        recent: &[AnswerContext],
    ) -> String {
        let mut prompt = format!(
            "Write question {} of {} for the '{}' for a {} user.\n\nRequirements:\n- Everyday, humorous situation the user can relate to\n- Exactly two contrasting options\n- The question measures exactly one axis\n",
            index, total, self.name, gender
        );
        if index > 1 {
            prompt.push_str("- Use a situation different from the previous questions\n");
        }
        for line in &self.guidance {
            prompt.push_str("- ");
            prompt.push_str(line);
            prompt.push('\n');
        }

        if !self.axes.is_empty() {
            prompt.push_str("\nAxes (set \"category\" to the axis id you measure):\n");
            for axis in &self.axes {
                prompt.push_str(&format!(
                    "- {}: option 1 leans {}, option 2 leans {}\n",
                    axis.axis, axis.first_option_leaning, axis.second_option_leaning
                ));
            }
        }

        if !recent.is_empty() {
            let context = serde_json::to_string(recent).unwrap_or_default();
            prompt.push_str(&format!("\nRecent answers: {}\n", context));
        }

        prompt.push_str(
            "\nReply with JSON only:\n{\"question_text\": \"...\", \"option_1\": \"...\", \"option_2\": \"...\", \"hint\": \"...\", \"category\": \"...\"}\n",
        );

        if let Some(example) = &self.example {
            if let Ok(json) = serde_json::to_string(example) {
                prompt.push_str(&format!("\nExample:\n{}\n", json));
            }
        }

        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme() -> AdaptiveTheme {
        AdaptiveTheme {
            analysis_id: AnalysisId::new("ai-egen-analysis").unwrap(),
            name: "Egen/Teto personality analysis".to_string(),
            system_prompt: "You write personality quiz questions.".to_string(),
            guidance: vec!["Keep it playful".to_string()],
            axes: vec![ThemeAxis {
                axis: "EG_TT".to_string(),
                first_option_leaning: "Egen".to_string(),
                second_option_leaning: "Teto".to_string(),
            }],
            example: None,
            temperature: 0.9,
            max_tokens: 400,
        }
    }

    #[test]
    fn first_prompt_has_no_context() {
        let prompt = theme().question_prompt(1, 12, Gender::Female, &[]);

        assert!(prompt.contains("question 1 of 12"));
        assert!(prompt.contains("female user"));
        assert!(prompt.contains("- Keep it playful"));
        assert!(prompt.contains("EG_TT: option 1 leans Egen, option 2 leans Teto"));
        assert!(!prompt.contains("Recent answers"));
        assert!(!prompt.contains("different from the previous"));
    }

    #[test]
    fn later_prompt_carries_recent_answers() {
        let recent = vec![AnswerContext {
            index: 4,
            question: "Rainy Sunday?".to_string(),
            chosen: "Stay in".to_string(),
            choice: Choice::Second,
            category: Some("EG_TT".to_string()),
        }];
        let prompt = theme().question_prompt(5, 12, Gender::Male, &recent);

        assert!(prompt.contains("question 5 of 12"));
        assert!(prompt.contains("Recent answers:"));
        assert!(prompt.contains("\"chosen\":\"Stay in\""));
        assert!(prompt.contains("\"choice\":2"));
    }

    #[test]
    fn theme_defaults_apply_when_deserializing() {
        let theme: AdaptiveTheme = serde_json::from_str(
            r#"{"analysis_id":"x","name":"n","system_prompt":"s"}"#,
        )
        .unwrap();
        assert_eq!(theme.temperature, 0.9);
        assert_eq!(theme.max_tokens, 400);
        assert!(theme.axes.is_empty());
    }
}
