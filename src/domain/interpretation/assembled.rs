//! Output of interpretation assembly.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::SectionVocabulary;
use crate::domain::foundation::{AnalysisId, Gender};

/// How stored text is personalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonalizationMode {
    /// Stored text only.
    #[default]
    None,
    /// One provider call per section, issued concurrently.
    PerSection,
    /// One provider call returning every section.
    Batched,
}

/// Where a section's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionSource {
    Stored,
    Personalized,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssembledSection {
    pub section: String,
    pub text: String,
    pub source: SectionSource,
}

/// Ordered, possibly personalized interpretation of one result type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssembledInterpretation {
    pub analysis_id: AnalysisId,
    pub result_key: String,
    pub gender: Gender,
    pub title: String,
    pub subtitle: Option<String>,
    pub vocabulary: SectionVocabulary,
    pub sections: Vec<AssembledSection>,
}

impl AssembledInterpretation {
    /// Section name to text, in display order.
    pub fn to_map(&self) -> IndexMap<String, String> {
        self.sections
            .iter()
            .map(|s| (s.section.clone(), s.text.clone()))
            .collect()
    }

    /// Number of sections whose text was personalized.
    pub fn personalized_count(&self) -> usize {
        self.sections
            .iter()
            .filter(|s| s.source == SectionSource::Personalized)
            .count()
    }
}
