//! Prompt builders for interpretation personalization.

use serde_json::json;

use super::AnswerPattern;
use crate::domain::foundation::{Choice, Gender};

/// System prompt for single-section rewrites.
pub const SECTION_SYSTEM_PROMPT: &str =
    "You are a personality analysis expert. Give warm, accurate interpretations.";

/// System prompt for batched rewrites.
pub const BATCH_SYSTEM_PROMPT: &str =
    "You are a personality analysis expert. Reply with one JSON object mapping each section name to its interpretation.";

const STYLE_GUIDE: &str = "\
Style:
- Friendly, casual tone
- Two or three emojis at most
- Two to four short lines
- Personalize through wording and examples only";

const DIRECTION_RULES: &str = "\
Constraints:
- Keep the same overall direction and conclusion as the stored text
- Do not describe or name any other result type
- Avoid extreme or contradictory claims";

/// What a prompt is about.
#[derive(Debug, Clone)]
pub struct PromptContext<'a> {
    pub result_key: &'a str,
    pub title: &'a str,
    pub gender: Gender,
    pub pattern: &'a AnswerPattern,
}

impl PromptContext<'_> {
    fn header(&self) -> String {
        let dominant = match self.pattern.dominant_choice {
            Choice::First => "option 1",
            Choice::Second => "option 2",
        };
        format!(
            "Result type: {} ({})\nGender: {}\n\nAnswer pattern:\n- Total answers: {}\n- Option 1 ratio: {:.2}\n- Option 2 ratio: {:.2}\n- Dominant choice: {}\n- Consistency: {:.2}",
            self.title,
            self.result_key,
            self.gender,
            self.pattern.total,
            self.pattern.first_option_ratio,
            self.pattern.second_option_ratio,
            dominant,
            self.pattern.consistency,
        )
    }
}

/// Builds the rewrite prompt for one section.
pub fn section_prompt(ctx: &PromptContext<'_>, section: &str, stored: &str) -> String {
    format!(
        "Rewrite one section of a personality interpretation for this person.\n\n{}\n\nSection: {}\nStored text:\n{}\n\n{}\n\n{}\n\nReply with the rewritten section text only.",
        ctx.header(),
        section,
        stored,
        STYLE_GUIDE,
        DIRECTION_RULES,
    )
}

/// Builds one prompt covering every section.
pub fn batch_prompt(ctx: &PromptContext<'_>, sections: &[(&str, &str)]) -> String {
    let stored: serde_json::Map<String, serde_json::Value> = sections
        .iter()
        .map(|(section, text)| (section.to_string(), json!(text)))
        .collect();
    let stored = serde_json::to_string_pretty(&stored).unwrap_or_default();

    format!(
        "Rewrite every section of a personality interpretation for this person.\n\n{}\n\nStored sections (JSON):\n{}\n\n{}\n\n{}\n\nReply with a JSON object using exactly the same keys.",
        ctx.header(),
        stored,
        STYLE_GUIDE,
        DIRECTION_RULES,
    )
}
