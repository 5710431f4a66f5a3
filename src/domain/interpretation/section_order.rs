//! Canonical ordering of interpretation sections.
//!
//! Two section vocabularies share the same ordinal slots. They overlap on
//! `Compatibility`, which sits in slot 7 of the general vocabulary and
//! slot 6 of the intimacy vocabulary, so a single flat table cannot order
//! both. The vocabulary is picked per result type from the sections present.
//!
//! Stored content may use either the English names or the Korean names the
//! catalog was first authored with; both map to the same slot.

use serde::{Deserialize, Serialize};

/// General personality sections in display order.
pub const GENERAL_SECTIONS: [&str; 8] = [
    "Personality Traits",
    "Relationships",
    "Dating Style",
    "Daily Patterns",
    "Strengths",
    "Watch Outs",
    "Compatibility",
    "One-Line Takeaway",
];

/// Intimacy sections in display order.
pub const INTIMACY_SECTIONS: [&str; 8] = [
    "Behind Closed Doors",
    "Key Traits",
    "Intimacy Style",
    "In the Moment",
    "Recommended Moves",
    "Compatibility",
    "Tonight's Simulation",
    "One-Line Summary",
];

/// Korean names of the general sections, slot for slot.
pub const GENERAL_SECTION_ALIASES: [&str; 8] = [
    "성격 특징",
    "인간관계",
    "연애 스타일",
    "일상 패턴",
    "강점",
    "주의할 점",
    "궁합",
    "한 줄 정리",
];

/// Korean names of the intimacy sections, slot for slot.
pub const INTIMACY_SECTION_ALIASES: [&str; 8] = [
    "침대 위에서의 모습",
    "주요 특징",
    "섹스 스타일",
    "섹스할 때",
    "추천 체위",
    "궁합",
    "오늘 밤 시뮬레이션",
    "한 줄 요약",
];

/// Section vocabulary of one result type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionVocabulary {
    General,
    Intimacy,
}

impl SectionVocabulary {
    fn sections(&self) -> &'static [&'static str; 8] {
        match self {
            SectionVocabulary::General => &GENERAL_SECTIONS,
            SectionVocabulary::Intimacy => &INTIMACY_SECTIONS,
        }
    }

    fn aliases(&self) -> &'static [&'static str; 8] {
        match self {
            SectionVocabulary::General => &GENERAL_SECTION_ALIASES,
            SectionVocabulary::Intimacy => &INTIMACY_SECTION_ALIASES,
        }
    }

    /// 1-based slot of a section in this vocabulary, by English or Korean name.
    pub fn slot(&self, section: &str) -> Option<usize> {
        let section = section.trim();
        self.sections()
            .iter()
            .zip(self.aliases().iter())
            .position(|(name, alias)| *name == section || *alias == section)
            .map(|i| i + 1)
    }

    fn other(&self) -> SectionVocabulary {
        match self {
            SectionVocabulary::General => SectionVocabulary::Intimacy,
            SectionVocabulary::Intimacy => SectionVocabulary::General,
        }
    }

    /// True if the section belongs only to this vocabulary.
    fn owns_exclusively(&self, section: &str) -> bool {
        self.slot(section).is_some() && self.other().slot(section).is_none()
    }
}

/// Section ordering.
pub struct SectionOrder;

impl SectionOrder {
    /// Picks the vocabulary owning more of the given sections exclusively.
    /// Ties go to `General`.
    pub fn detect<'a, I>(sections: I) -> SectionVocabulary
    where
        I: IntoIterator<Item = &'a str>,
    {
        let (mut general, mut intimacy) = (0usize, 0usize);
        for section in sections {
            if SectionVocabulary::General.owns_exclusively(section) {
                general += 1;
            } else if SectionVocabulary::Intimacy.owns_exclusively(section) {
                intimacy += 1;
            }
        }
        if intimacy > general {
            SectionVocabulary::Intimacy
        } else {
            SectionVocabulary::General
        }
    }

    /// Sorts items by section slot. Unknown sections go last in their
    /// original relative order.
    pub fn sort_by_section<T, F>(items: &mut [T], section_of: F) -> SectionVocabulary
    where
        F: Fn(&T) -> &str,
    {
        let vocabulary = Self::detect(items.iter().map(|i| section_of(i)));
        // Stable sort keeps insertion order among equal slots.
        items.sort_by_key(|item| vocabulary.slot(section_of(item)).unwrap_or(usize::MAX));
        vocabulary
    }
}
