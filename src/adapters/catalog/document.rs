//! On-disk shape of a quiz catalog file.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::domain::foundation::Gender;
use crate::domain::resolution::CompatibilityMatch;
use crate::domain::scoring::AxisWeight;

#[derive(Debug, Deserialize)]
pub(super) struct CatalogDocument {
    #[serde(default)]
    pub analyses: Vec<AnalysisDocument>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AnalysisDocument {
    pub id: String,
    /// Overrides the number of listed questions.
    #[serde(default)]
    pub question_count: Option<usize>,
    /// Kept untyped until the kind is checked.
    #[serde(default)]
    pub strategy: Option<serde_yaml::Value>,
    #[serde(default)]
    pub questions: Vec<QuestionDocument>,
    #[serde(default)]
    pub result_types: Vec<ResultTypeDocument>,
    #[serde(default)]
    pub compatibility: Vec<CompatibilityDocument>,
    /// Theme without its analysis id.
    #[serde(default)]
    pub adaptive_theme: Option<serde_yaml::Value>,
}

#[derive(Debug, Deserialize)]
pub(super) struct QuestionDocument {
    pub id: String,
    #[serde(default)]
    pub options: Vec<OptionDocument>,
}

#[derive(Debug, Deserialize)]
pub(super) struct OptionDocument {
    pub id: String,
    #[serde(default)]
    pub weights: Vec<AxisWeight>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ResultTypeDocument {
    pub key: String,
    #[serde(default)]
    pub gender: Gender,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    /// Section name to stored text, in authored order.
    #[serde(default)]
    pub sections: IndexMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CompatibilityDocument {
    pub result_key: String,
    pub best: CompatibilityMatch,
    pub worst: CompatibilityMatch,
}
