//! Generation Module - Handling of text returned by the generation provider.
//!
//! Provider replies are untrusted: they are sanitized before use and
//! structured replies are located inside surrounding prose or code fences.

mod reply;

pub use reply::{ReplyError, ReplyParser, MAX_REPLY_LENGTH};
