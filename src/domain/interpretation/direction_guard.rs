//! Direction guard for personalized text.
//!
//! A personalized section must keep the conclusion of the stored text. The
//! guard rejects text that names another result type of the same analysis
//! without naming its own.

use thiserror::Error;

/// Why a personalized text was rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GuardRejection {
    #[error("personalized text is empty")]
    Empty,

    #[error("personalized text names a different result type: {0}")]
    NamesOtherType(String),
}

/// Checks personalized text against the result type it was written for.
#[derive(Debug, Clone)]
pub struct DirectionGuard {
    own_title: String,
    rival_titles: Vec<String>,
}

impl DirectionGuard {
    /// Creates a guard. Blank rival titles and the own title are ignored.
    pub fn new(own_title: impl Into<String>, rival_titles: impl IntoIterator<Item = String>) -> Self {
        let own_title = own_title.into();
        let rival_titles = rival_titles
            .into_iter()
            .filter(|t| !t.trim().is_empty() && !t.eq_ignore_ascii_case(&own_title))
            .collect();
        Self {
            own_title,
            rival_titles,
        }
    }

    /// Guard that only rejects empty text.
    pub fn permissive(own_title: impl Into<String>) -> Self {
        Self::new(own_title, Vec::new())
    }

    pub fn check(&self, text: &str) -> Result<(), GuardRejection> {
        if text.trim().is_empty() {
            return Err(GuardRejection::Empty);
        }

        let haystack = text.to_lowercase();
        if haystack.contains(&self.own_title.to_lowercase()) {
            return Ok(());
        }

        match self
            .rival_titles
            .iter()
            .find(|rival| haystack.contains(&rival.to_lowercase()))
        {
            Some(rival) => Err(GuardRejection::NamesOtherType(rival.clone())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guard() -> DirectionGuard {
        DirectionGuard::new(
            "Steady Spark",
            vec!["Quiet Storm".to_string(), "Bold Anchor".to_string(), String::new()],
        )
    }

    #[test]
    fn accepts_neutral_text() {
        assert_eq!(guard().check("You light up every room."), Ok(()));
    }

    #[test]
    fn accepts_text_naming_own_type() {
        assert_eq!(
            guard().check("As a steady spark you are nothing like a Quiet Storm."),
            Ok(())
        );
    }

    #[test]
    fn rejects_text_naming_only_another_type() {
        assert_eq!(
            guard().check("Classic quiet storm energy."),
            Err(GuardRejection::NamesOtherType("Quiet Storm".to_string()))
        );
    }

    #[test]
    fn rejects_blank_text() {
        assert_eq!(DirectionGuard::permissive("x").check(" \n"), Err(GuardRejection::Empty));
    }
}
