//! Interpretation Module - Sectioned result interpretations.
//!
//! # Components
//!
//! - `ResultTypeDefinition` / `Interpretation` - Catalog entries
//! - `SectionOrder` - Canonical ordering over two section vocabularies
//! - `AnswerPattern` - Summary of a quiz taker's choices
//! - `DirectionGuard` - Rejects personalized text that drifts to another type
//! - `prompts` - Provider prompts for personalization
//!
//! Assembly itself performs I/O and lives in the application layer.

mod answer_pattern;
mod assembled;
mod definition;
mod direction_guard;
mod errors;
pub mod prompts;
mod section_order;

pub use answer_pattern::AnswerPattern;
pub use assembled::{
    AssembledInterpretation, AssembledSection, PersonalizationMode, SectionSource,
};
pub use definition::{Interpretation, ResultTypeDefinition};
pub use direction_guard::{DirectionGuard, GuardRejection};
pub use errors::InterpretationError;
pub use section_order::{
    SectionOrder, SectionVocabulary, GENERAL_SECTIONS, GENERAL_SECTION_ALIASES, INTIMACY_SECTIONS,
    INTIMACY_SECTION_ALIASES,
};
