//! Reply sanitization and structured extraction.

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Maximum accepted reply length (64KB).
pub const MAX_REPLY_LENGTH: usize = 64_000;

/// Errors that can occur while reading a provider reply.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReplyError {
    #[error("Reply too long: {actual} bytes exceeds maximum of {max} bytes")]
    TooLong { max: usize, actual: usize },

    #[error("Reply is empty")]
    Empty,

    #[error("No JSON object found in reply")]
    NoJson,

    #[error("JSON parse error: {0}")]
    Parse(String),
}

/// Sanitizes provider replies and extracts JSON payloads from them.
#[derive(Debug, Clone, Default)]
pub struct ReplyParser;

impl ReplyParser {
    pub fn new() -> Self {
        Self
    }

    /// Cleans a free-text reply.
    ///
    /// # Steps
    /// 1. Validate length
    /// 2. Remove control characters (except newlines/tabs)
    /// 3. Strip chat-template markers
    /// 4. Trim; an empty result is an error
    pub fn sanitize(&self, reply: &str) -> Result<String, ReplyError> {
        if reply.len() > MAX_REPLY_LENGTH {
            return Err(ReplyError::TooLong {
                max: MAX_REPLY_LENGTH,
                actual: reply.len(),
            });
        }

        let mut cleaned: String = reply
            .chars()
            .filter(|c| !c.is_control() || *c == '\n' || *c == '\t' || *c == '\r')
            .collect();

        for marker in [
            "<|system|>",
            "<|assistant|>",
            "<|user|>",
            "<|im_start|>",
            "<|im_end|>",
            "[INST]",
            "[/INST]",
        ] {
            cleaned = cleaned.replace(marker, "");
        }

        let trimmed = cleaned.trim();
        if trimmed.is_empty() {
            return Err(ReplyError::Empty);
        }
        Ok(trimmed.to_string())
    }

    /// Parses the first JSON object in a reply into `T`.
    pub fn parse_json<T: DeserializeOwned>(&self, reply: &str) -> Result<T, ReplyError> {
        let sanitized = self.sanitize(reply)?;
        let json = self.locate_object(&sanitized).ok_or(ReplyError::NoJson)?;
        serde_json::from_str(json).map_err(|e| ReplyError::Parse(e.to_string()))
    }

    /// Finds a JSON object, preferring a fenced code block.
    fn locate_object<'a>(&self, s: &'a str) -> Option<&'a str> {
        if let Some(block) = self.fenced_block(s) {
            if let Some(obj) = self.balanced_object(block) {
                return Some(obj);
            }
        }
        self.balanced_object(s)
    }

    fn fenced_block<'a>(&self, s: &'a str) -> Option<&'a str> {
        let open = s.find("```")?;
        let after_fence = &s[open + 3..];
        // Skip a language tag such as `json`.
        let body_start = after_fence.find('\n').map(|i| i + 1).unwrap_or(0);
        let body = &after_fence[body_start..];
        let end = body.find("```")?;
        Some(body[..end].trim())
    }

    fn balanced_object<'a>(&self, s: &'a str) -> Option<&'a str> {
        let start = s.find('{')?;
        let mut depth = 0usize;
        let mut in_string = false;
        let mut escape_next = false;

        for (offset, c) in s[start..].char_indices() {
            if escape_next {
                escape_next = false;
                continue;
            }
            match c {
                '\\' if in_string => escape_next = true,
                '"' => in_string = !in_string,
                _ if in_string => {}
                '{' => depth += 1,
                '}' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Some(&s[start..start + offset + 1]);
                    }
                }
                _ => {}
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::HashMap;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Pair {
        a: String,
    }

    #[test]
    fn sanitize_strips_markers_and_control_chars() {
        let parser = ReplyParser::new();
        assert_eq!(
            parser.sanitize("<|im_start|>Hello\u{0007} there\n").unwrap(),
            "Hello there"
        );
    }

    #[test]
    fn sanitize_rejects_blank_reply() {
        assert_eq!(ReplyParser::new().sanitize("  \n "), Err(ReplyError::Empty));
    }

    #[test]
    fn sanitize_rejects_oversized_reply() {
        let long = "x".repeat(MAX_REPLY_LENGTH + 1);
        assert!(matches!(
            ReplyParser::new().sanitize(&long),
            Err(ReplyError::TooLong { .. })
        ));
    }

    #[test]
    fn parses_plain_json() {
        let pair: Pair = ReplyParser::new().parse_json(r#"{"a":"b"}"#).unwrap();
        assert_eq!(pair, Pair { a: "b".to_string() });
    }

    #[test]
    fn parses_fenced_json_with_preamble() {
        let reply = "Sure! Here you go:\n```json\n{\"a\": \"x { y }\"}\n```\nEnjoy";
        let pair: Pair = ReplyParser::new().parse_json(reply).unwrap();
        assert_eq!(pair.a, "x { y }");
    }

    #[test]
    fn parses_multibyte_content() {
        let reply = "결과: {\"성격 특징\": \"따뜻해요 😊\"} 끝";
        let map: HashMap<String, String> = ReplyParser::new().parse_json(reply).unwrap();
        assert_eq!(map.get("성격 특징").map(String::as_str), Some("따뜻해요 😊"));
    }

    #[test]
    fn reports_missing_json() {
        let err = ReplyParser::new().parse_json::<Pair>("no structure here").unwrap_err();
        assert_eq!(err, ReplyError::NoJson);
    }

    #[test]
    fn reports_wrong_shape() {
        let err = ReplyParser::new().parse_json::<Pair>(r#"{"b": 1}"#).unwrap_err();
        assert!(matches!(err, ReplyError::Parse(_)));
    }
}
