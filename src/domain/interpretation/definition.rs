//! Result-type catalog entries and their stored interpretation sections.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AnalysisId, Gender, ResultTypeId, ValidationError};

/// Static catalog entry for one (analysis, result key, gender).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultTypeDefinition {
    pub id: ResultTypeId,
    pub analysis_id: AnalysisId,
    pub result_key: String,
    pub gender: Gender,
    pub title: String,
    pub subtitle: Option<String>,
}

/// One stored section of a result type's interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interpretation {
    pub result_type_id: ResultTypeId,
    pub section: String,
    pub content: String,
}

impl Interpretation {
    /// Creates a section, rejecting a blank name or blank content.
    pub fn new(
        result_type_id: ResultTypeId,
        section: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let section = section.into();
        let content = content.into();
        if section.trim().is_empty() {
            return Err(ValidationError::empty_field("section"));
        }
        if content.trim().is_empty() {
            return Err(ValidationError::empty_field("content"));
        }
        Ok(Self {
            result_type_id,
            section,
            content,
        })
    }
}
